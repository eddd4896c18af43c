use crate::entities::transaction_entity as transactions;
use crate::error::{AppError, AppResult};
use crate::models::{CreateTransactionRequest, TransactionWithCategory};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

/// Owns the transactions table and its running-balance invariant: ordered by
/// ascending id, each row's balance is the previous row's balance minus this
/// row's amount.
#[derive(Clone)]
pub struct LedgerService {
    pool: DatabaseConnection,
}

/// Balance for a newly appended transaction.
fn next_running_balance(previous_balance: Option<i64>, amount: i64) -> i64 {
    previous_balance.unwrap_or(0) - amount
}

impl LedgerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Insert a transaction. When the payload carries no `running_balance`
    /// override, the balance is derived from the most recently created
    /// transaction; an empty ledger is the base case, not an error.
    ///
    /// A supplied override is stored verbatim with no consistency check
    /// against earlier rows (seeding/backfill escape hatch).
    pub async fn create(
        &self,
        request: CreateTransactionRequest,
    ) -> AppResult<transactions::Model> {
        if request.description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Description must not be empty".to_string(),
            ));
        }
        let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
            .map_err(|_| AppError::ValidationError("Invalid date format".to_string()))?;

        // The frontend sends 0 for "no category".
        let category_id = match request.category_id {
            Some(0) | None => None,
            other => other,
        };

        let running_balance = match request.running_balance {
            Some(balance) => balance,
            None => match self.get_last().await {
                Ok(last) => next_running_balance(Some(last.running_balance), request.amount),
                Err(AppError::NotFound(_)) => next_running_balance(None, request.amount),
                Err(e) => return Err(e),
            },
        };

        let now = Utc::now();
        let model = transactions::ActiveModel {
            category_id: Set(category_id),
            amount: Set(request.amount),
            running_balance: Set(running_balance),
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

    pub async fn get_by_id(&self, id: i64) -> AppResult<transactions::Model> {
        transactions::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    /// The transaction with the maximum id, i.e. the newest in balance order.
    pub async fn get_last(&self) -> AppResult<transactions::Model> {
        transactions::Entity::find()
            .order_by_desc(transactions::Column::Id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    /// All transactions, newest id first, joined with the category's display
    /// fields (null for uncategorized rows). No pagination.
    pub async fn index(&self) -> AppResult<Vec<TransactionWithCategory>> {
        use crate::entities::category_entity as categories;

        let rows = transactions::Entity::find()
            .column_as(categories::Column::Name, "category_name")
            .column_as(categories::Column::Color, "category_color")
            .join(JoinType::LeftJoin, transactions::Relation::Category.def())
            .order_by_desc(transactions::Column::Id)
            .into_model::<TransactionWithCategory>()
            .all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Physical delete. Later rows' running balances are intentionally left
    /// stale; only amount-changing updates cascade.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = transactions::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;

        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        Ok(())
    }

    /// Persist a fully-merged transaction and, when its amount changed,
    /// cascade the delta onto every chronologically later row
    /// (`running_balance -= new_amount - old_amount` for all id > this id).
    ///
    /// Runs as a single database transaction: a failure mid-cascade rolls
    /// everything back, so readers never observe a partially-cascaded ledger.
    pub async fn update_with_cascade(
        &self,
        transaction: transactions::Model,
        old_amount: i64,
    ) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let existing = transactions::Entity::find_by_id(transaction.id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        let mut model = existing.into_active_model();
        model.amount = Set(transaction.amount);
        model.running_balance = Set(transaction.running_balance);
        model.description = Set(transaction.description.clone());
        model.category_id = Set(transaction.category_id);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&txn).await?;

        if transaction.amount != old_amount {
            let delta = transaction.amount - old_amount;
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::RunningBalance,
                    Expr::col(transactions::Column::RunningBalance).sub(delta),
                )
                .filter(transactions::Column::Id.gt(transaction.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_transaction_balance_is_negated_amount() {
        assert_eq!(next_running_balance(None, 500), -500);
    }

    #[test]
    fn test_balance_chains_from_previous() {
        assert_eq!(next_running_balance(Some(5000), 1000), 4000);
        assert_eq!(next_running_balance(Some(4000), -2500), 6500);
    }
}
