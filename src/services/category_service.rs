use crate::entities::category_entity as categories;
use crate::error::{AppError, AppResult};
use crate::models::CreateCategoryRequest;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

#[derive(Clone)]
pub struct CategoryService {
    pool: DatabaseConnection,
}

impl CategoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<categories::Model> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Name must not be empty".to_string(),
            ));
        }
        if request.color.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Color must not be empty".to_string(),
            ));
        }

        let model = categories::ActiveModel {
            name: Set(request.name),
            color: Set(request.color),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model)
    }

    pub async fn index(&self) -> AppResult<Vec<categories::Model>> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list)
    }
}
