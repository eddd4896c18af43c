use crate::entities::{category_entity as categories, transaction_entity as transactions};
use crate::error::{AppError, AppResult};
use crate::models::{CategoryExpense, DailyExpense};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

/// Reserved payday marker category; its rows are income, not expenses.
const INCOME_CATEGORY: &str = "Gajian";

/// Read-only expense/balance aggregates over the transactions table.
///
/// All category-joined sums use an inner join, so uncategorized transactions
/// are silently excluded from them.
#[derive(Clone)]
pub struct AggregationService {
    pool: DatabaseConnection,
}

#[derive(Debug, sea_orm::FromQueryResult)]
struct SumRow {
    amount: Option<i64>,
}

fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::ValidationError("Invalid date format".to_string()))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

fn sum_amount() -> sea_orm::sea_query::SimpleExpr {
    // CAST keeps the decoded type at bigint; Postgres widens SUM(bigint)
    // to numeric otherwise.
    Expr::expr(Func::coalesce([
        Expr::col((transactions::Entity, transactions::Column::Amount)).sum(),
        Expr::val(0i64).into(),
    ]))
    .cast_as(Alias::new("BIGINT"))
}

impl AggregationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn expenses_by_month(&self, date: &str) -> AppResult<i64> {
        self.expenses_in_month(parse_date(date)?).await
    }

    /// Sum of expense amounts over the calendar month containing `date`,
    /// excluding the income marker category. 0 when nothing matches.
    pub async fn expenses_in_month(&self, date: NaiveDate) -> AppResult<i64> {
        let start = month_start(date);
        let end = next_month_start(date);

        let row = transactions::Entity::find()
            .select_only()
            .column_as(sum_amount(), "amount")
            .join(JoinType::InnerJoin, transactions::Relation::Category.def())
            .filter(categories::Column::Name.ne(INCOME_CATEGORY))
            .filter(transactions::Column::Date.gte(start))
            .filter(transactions::Column::Date.lt(end))
            .into_model::<SumRow>()
            .one(&self.pool)
            .await?;

        Ok(row.and_then(|r| r.amount).unwrap_or(0))
    }

    /// Per-category sums over the 30-day window ending at the start of the
    /// month containing `date`: `(month_start - 30 days, month_start]`.
    pub async fn expenses_by_month_category(&self, date: &str) -> AppResult<Vec<CategoryExpense>> {
        let start_of_month = month_start(parse_date(date)?);
        let window_start = start_of_month - Duration::days(30);

        let rows = transactions::Entity::find()
            .select_only()
            .column_as(categories::Column::Id, "id")
            .column_as(categories::Column::Name, "name")
            .column_as(categories::Column::Color, "color")
            .column_as(sum_amount(), "amount")
            .join(JoinType::InnerJoin, transactions::Relation::Category.def())
            .filter(transactions::Column::Date.gt(window_start))
            .filter(transactions::Column::Date.lte(start_of_month))
            .group_by(categories::Column::Id)
            .group_by(categories::Column::Name)
            .group_by(categories::Column::Color)
            .into_model::<CategoryExpense>()
            .all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Per-day expense sums over the 30 days ending today, with the same
    /// join and income-exclusion semantics as the monthly sum.
    pub async fn expenses_last_30_days(&self) -> AppResult<Vec<DailyExpense>> {
        let today = Utc::now().date_naive();
        let window_start = today - Duration::days(30);

        let rows = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::Date, "date")
            .column_as(sum_amount(), "amount")
            .join(JoinType::InnerJoin, transactions::Relation::Category.def())
            .filter(categories::Column::Name.ne(INCOME_CATEGORY))
            .filter(transactions::Column::Date.gt(window_start))
            .filter(transactions::Column::Date.lte(today))
            .group_by(transactions::Column::Date)
            .order_by_asc(transactions::Column::Date)
            .into_model::<DailyExpense>()
            .all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Running balance of the latest transaction dated on or before `date`
    /// (ties broken by id, the canonical chronological order). Absence is 0,
    /// never an error.
    pub async fn balance_by_date(&self, date: &str) -> AppResult<i64> {
        let date = parse_date(date)?;

        let row = transactions::Entity::find()
            .filter(transactions::Column::Date.lte(date))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .one(&self.pool)
            .await?;

        Ok(row.map(|t| t.running_balance).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        assert_eq!(month_start(d), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(
            next_month_start(d),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_month_bounds_december_rolls_over() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            next_month_start(d),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }
}
