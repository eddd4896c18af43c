use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("auth_token"))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::google_auth,
        handlers::auth::google_callback,
        handlers::auth::logout,
        handlers::auth::logged_user,
        handlers::health::health_check,
        handlers::transaction::create_transaction,
        handlers::transaction::index_transactions,
        handlers::transaction::get_transaction,
        handlers::transaction::update_transaction,
        handlers::transaction::delete_transaction,
        handlers::summary::get_expenses_by_month,
        handlers::summary::get_expenses_by_months,
        handlers::summary::get_expenses_by_month_category,
        handlers::summary::get_expenses_last_30_days,
        handlers::summary::get_balance_by_date,
        handlers::category::create_category,
        handlers::category::index_categories,
        handlers::event::create_event,
        handlers::event::index_events,
        handlers::event::get_event,
        handlers::event::delete_event,
        handlers::event::get_event_expenses,
        handlers::event::create_event_expense,
    ),
    components(
        schemas(
            CreateTransactionRequest,
            UpdateTransactionRequest,
            TransactionResponse,
            TransactionWithCategory,
            AmountResponse,
            MonthExpense,
            DailyExpense,
            CategoryExpense,
            CreateCategoryRequest,
            CategoryResponse,
            CreateEventRequest,
            CreateEventExpenseRequest,
            EventResponse,
            EventSummary,
            EventExpenseResponse,
            UserResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Google OAuth login and session"),
        (name = "transactions", description = "Transaction ledger with running balances"),
        (name = "summary", description = "Expense and balance aggregates"),
        (name = "categories", description = "Transaction categories"),
        (name = "events", description = "Events and their expenses"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
