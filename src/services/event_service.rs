use crate::entities::{event_entity as events, event_expense_entity as event_expenses};
use crate::error::{AppError, AppResult};
use crate::models::{CreateEventExpenseRequest, CreateEventRequest, EventSummary};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

#[derive(Clone)]
pub struct EventService {
    pool: DatabaseConnection,
}

impl EventService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateEventRequest) -> AppResult<events::Model> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Name must not be empty".to_string(),
            ));
        }
        let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
            .map_err(|_| AppError::ValidationError("Invalid date format".to_string()))?;

        let now = Utc::now();
        let model = events::ActiveModel {
            name: Set(request.name),
            description: Set(request.description),
            date: Set(date),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model)
    }

    /// Events newest first, each with its expenses summed in (events with no
    /// expenses total 0).
    pub async fn index(&self) -> AppResult<Vec<EventSummary>> {
        let total = Expr::expr(Func::coalesce([
            Expr::col((event_expenses::Entity, event_expenses::Column::Amount)).sum(),
            Expr::val(0i64).into(),
        ]))
        .cast_as(Alias::new("BIGINT"));

        let rows = events::Entity::find()
            .select_only()
            .column(events::Column::Id)
            .column(events::Column::Name)
            .column(events::Column::Description)
            .column(events::Column::Date)
            .column_as(total, "total_expenses")
            .join(JoinType::LeftJoin, events::Relation::EventExpenses.def())
            .group_by(events::Column::Id)
            .group_by(events::Column::Name)
            .group_by(events::Column::Description)
            .group_by(events::Column::Date)
            .order_by_desc(events::Column::Date)
            .into_model::<EventSummary>()
            .all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<events::Model> {
        events::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// Physical delete; the schema cascades the event's expenses away.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = events::Entity::delete_by_id(id).exec(&self.pool).await?;

        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(())
    }

    pub async fn get_expenses(&self, event_id: i64) -> AppResult<Vec<event_expenses::Model>> {
        let list = event_expenses::Entity::find()
            .filter(event_expenses::Column::EventId.eq(event_id))
            .order_by_desc(event_expenses::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list)
    }

    pub async fn create_expense(
        &self,
        event_id: i64,
        request: CreateEventExpenseRequest,
    ) -> AppResult<event_expenses::Model> {
        if request.description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Description must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let model = event_expenses::ActiveModel {
            event_id: Set(event_id),
            amount: Set(request.amount),
            description: Set(request.description),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model)
    }
}
