use actix_web::{web, HttpResponse, ResponseError, Result};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::models::{AmountResponse, MonthExpense};
use crate::services::AggregationService;
use crate::utils::backdate;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DateQuery {
    /// Anchor date, `YYYY-MM-DD`.
    pub date: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses_by_month",
    tag = "summary",
    params(DateQuery),
    responses(
        (status = 200, description = "Expense sum for the month containing the date", body = AmountResponse),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn get_expenses_by_month(
    aggregation: web::Data<AggregationService>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    match aggregation.expenses_by_month(&query.date).await {
        Ok(amount) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": AmountResponse { amount }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses_by_months",
    tag = "summary",
    params(DateQuery),
    responses(
        (status = 200, description = "14-month expense series, ascending, anchor month last")
    )
)]
pub async fn get_expenses_by_months(
    aggregation: web::Data<AggregationService>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    // An unparseable date gives an empty series, not an error.
    let dates = backdate(&query.date);

    let mut series = Vec::with_capacity(dates.len());
    for month_date in &dates {
        let amount = match aggregation.expenses_in_month(*month_date).await {
            Ok(amount) => amount,
            Err(e) => return Ok(e.error_response()),
        };
        series.push(MonthExpense {
            month: month_date.format("%Y-%m-%d").to_string(),
            amount,
        });
    }

    // backdate() walks anchor-first; the charts want ascending order
    series.reverse();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": series
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses_by_month_category",
    tag = "summary",
    params(DateQuery),
    responses(
        (status = 200, description = "Per-category sums over the 30-day window before the month start"),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn get_expenses_by_month_category(
    aggregation: web::Data<AggregationService>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    match aggregation.expenses_by_month_category(&query.date).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses_last_30_days",
    tag = "summary",
    responses(
        (status = 200, description = "Per-day expense sums for the trailing 30 days")
    )
)]
pub async fn get_expenses_last_30_days(
    aggregation: web::Data<AggregationService>,
) -> Result<HttpResponse> {
    match aggregation.expenses_last_30_days().await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/balance_by_date",
    tag = "summary",
    params(DateQuery),
    responses(
        (status = 200, description = "Running balance as of the date; 0 when no transaction qualifies", body = AmountResponse),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn get_balance_by_date(
    aggregation: web::Data<AggregationService>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    match aggregation.balance_by_date(&query.date).await {
        Ok(amount) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": AmountResponse { amount }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn summary_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/expenses_by_month", web::get().to(get_expenses_by_month))
        .route("/expenses_by_months", web::get().to(get_expenses_by_months))
        .route(
            "/expenses_by_month_category",
            web::get().to(get_expenses_by_month_category),
        )
        .route(
            "/expenses_last_30_days",
            web::get().to(get_expenses_last_30_days),
        )
        .route("/balance_by_date", web::get().to(get_balance_by_date));
}
