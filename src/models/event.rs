use crate::entities::{event_entity as events, event_expense_entity as event_expenses};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventExpenseRequest {
    pub amount: i64,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<events::Model> for EventResponse {
    fn from(e: events::Model) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            date: e.date,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Event list row with its expenses summed in.
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub total_expenses: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventExpenseResponse {
    pub id: i64,
    pub event_id: i64,
    pub amount: i64,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<event_expenses::Model> for EventExpenseResponse {
    fn from(e: event_expenses::Model) -> Self {
        Self {
            id: e.id,
            event_id: e.event_id,
            amount: e.amount,
            description: e.description,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
