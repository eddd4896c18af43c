use crate::entities::transaction_entity as transactions;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Distinguishes "field absent" from "field explicitly null" in PATCH
/// payloads; a bare `Option` collapses both into `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub category_id: Option<i64>,
    pub amount: i64,
    /// Escape hatch for seeding/backfill: stored verbatim, skipping the
    /// running-balance computation.
    pub running_balance: Option<i64>,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    pub amount: Option<i64>,
    pub running_balance: Option<i64>,
    pub description: Option<String>,
    /// `null` clears the category; omitting the field leaves it untouched.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
}

impl UpdateTransactionRequest {
    /// Overlay only the supplied fields onto the previously loaded row
    /// (merge-before-update).
    ///
    /// An explicit `running_balance` replaces the row's stored balance
    /// verbatim; otherwise an amount change shifts it by the same delta the
    /// cascade applies to later rows.
    pub fn apply_to(&self, transaction: &mut transactions::Model) {
        let old_amount = transaction.amount;

        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(description) = &self.description {
            transaction.description = description.clone();
        }
        if let Some(category_id) = self.category_id {
            transaction.category_id = category_id;
        }
        match self.running_balance {
            Some(running_balance) => transaction.running_balance = running_balance,
            None => {
                let delta = transaction.amount - old_amount;
                transaction.running_balance -= delta;
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub category_id: Option<i64>,
    pub amount: i64,
    pub running_balance: i64,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(t: transactions::Model) -> Self {
        Self {
            id: t.id,
            category_id: t.category_id,
            amount: t.amount,
            running_balance: t.running_balance,
            description: t.description,
            date: t.date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Index row: transaction joined with its category's display fields
/// (null when uncategorized).
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct TransactionWithCategory {
    pub id: i64,
    pub category_id: Option<i64>,
    pub amount: i64,
    pub running_balance: i64,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AmountResponse {
    pub amount: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthExpense {
    pub month: String,
    pub amount: i64,
}

#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct DailyExpense {
    pub date: NaiveDate,
    pub amount: i64,
}

/// Per-category sum over the 30-day category window.
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct CategoryExpense {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_model() -> transactions::Model {
        transactions::Model {
            id: 1,
            category_id: Some(2),
            amount: 1000,
            running_balance: 5000,
            description: "Groceries".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_apply_overlays_only_supplied_fields() {
        let mut tx = base_model();
        let payload = UpdateTransactionRequest {
            description: Some("Dining out".to_string()),
            ..Default::default()
        };
        payload.apply_to(&mut tx);
        assert_eq!(tx.description, "Dining out");
        assert_eq!(tx.amount, 1000);
        assert_eq!(tx.running_balance, 5000);
        assert_eq!(tx.category_id, Some(2));
    }

    #[test]
    fn test_apply_explicit_null_clears_category() {
        let mut tx = base_model();
        let payload: UpdateTransactionRequest =
            serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        payload.apply_to(&mut tx);
        assert_eq!(tx.category_id, None);
    }

    #[test]
    fn test_apply_omitted_category_untouched() {
        let mut tx = base_model();
        let payload: UpdateTransactionRequest =
            serde_json::from_str(r#"{"amount": 1500}"#).unwrap();
        payload.apply_to(&mut tx);
        assert_eq!(tx.category_id, Some(2));
        assert_eq!(tx.amount, 1500);
    }

    #[test]
    fn test_apply_amount_change_shifts_own_balance() {
        let mut tx = base_model();
        let payload: UpdateTransactionRequest =
            serde_json::from_str(r#"{"amount": 1500}"#).unwrap();
        payload.apply_to(&mut tx);
        assert_eq!(tx.running_balance, 4500);
    }

    #[test]
    fn test_apply_balance_override_wins_over_shift() {
        let mut tx = base_model();
        let payload: UpdateTransactionRequest =
            serde_json::from_str(r#"{"amount": 1500, "running_balance": 123}"#).unwrap();
        payload.apply_to(&mut tx);
        assert_eq!(tx.running_balance, 123);
    }
}
