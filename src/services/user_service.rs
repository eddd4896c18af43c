use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::GoogleUserInfo;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Insert the Google account on first login; refresh the mutable profile
    /// fields on every later one.
    pub async fn upsert(&self, info: &GoogleUserInfo) -> AppResult<users::Model> {
        let now = Utc::now();
        let model = users::ActiveModel {
            google_id: Set(info.id.clone()),
            email: Set(info.email.clone()),
            name: Set(info.name.clone()),
            picture: Set(info.picture.clone()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::GoogleId)
                    .update_columns([
                        users::Column::Name,
                        users::Column::Picture,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.pool)
            .await?;

        // Re-read: on conflict the returned last_insert_id is not the row's.
        users::Entity::find()
            .filter(users::Column::GoogleId.eq(info.id.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::InternalError("Upserted user not found".to_string()))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<users::Model> {
        users::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
