use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::LedgerService;

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_transaction(
    ledger: web::Data<LedgerService>,
    request: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    match ledger.create(request.into_inner()).await {
        Ok(transaction) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": TransactionResponse::from(transaction)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All transactions, newest id first, with category fields"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn index_transactions(ledger: web::Data<LedgerService>) -> Result<HttpResponse> {
    match ledger.index().await {
        Ok(transactions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transactions
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    tag = "transactions",
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction found", body = TransactionResponse),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    ledger: web::Data<LedgerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match ledger.get_by_id(path.into_inner()).await {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": TransactionResponse::from(transaction)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/transactions/{id}",
    tag = "transactions",
    params(("id" = i64, Path, description = "Transaction id")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn update_transaction(
    ledger: web::Data<LedgerService>,
    path: web::Path<i64>,
    request: web::Json<UpdateTransactionRequest>,
) -> Result<HttpResponse> {
    // Merge-before-update: load the current row, overlay only the supplied
    // fields, then persist with the pre-mutation amount so an amount change
    // cascades onto later rows.
    let mut transaction = match ledger.get_by_id(path.into_inner()).await {
        Ok(t) => t,
        Err(e) => return Ok(e.error_response()),
    };
    let old_amount = transaction.amount;

    request.into_inner().apply_to(&mut transaction);

    match ledger
        .update_with_cascade(transaction.clone(), old_amount)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": TransactionResponse::from(transaction)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    tag = "transactions",
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn delete_transaction(
    ledger: web::Data<LedgerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match ledger.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn transaction_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::post().to(create_transaction))
            .route("", web::get().to(index_transactions))
            .route("/{id}", web::get().to(get_transaction))
            .route("/{id}", web::patch().to(update_transaction))
            .route("/{id}", web::delete().to(delete_transaction)),
    );
}
