use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::EventService;

#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_event(
    event_service: web::Data<EventService>,
    request: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    match event_service.create(request.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": EventResponse::from(event)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "events",
    responses(
        (status = 200, description = "All events with summed expenses, newest first")
    )
)]
pub async fn index_events(event_service: web::Data<EventService>) -> Result<HttpResponse> {
    match event_service.index().await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match event_service.get_by_id(path.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": EventResponse::from(event)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match event_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/expenses",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Expenses of the event, newest first"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event_expenses(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let event = match event_service.get_by_id(path.into_inner()).await {
        Ok(event) => event,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service.get_expenses(event.id).await {
        Ok(expenses) => {
            let items: Vec<EventExpenseResponse> = expenses
                .into_iter()
                .map(EventExpenseResponse::from)
                .collect();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": items
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/expenses",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    request_body = CreateEventExpenseRequest,
    responses(
        (status = 201, description = "Event expense created", body = EventExpenseResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn create_event_expense(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
    request: web::Json<CreateEventExpenseRequest>,
) -> Result<HttpResponse> {
    let event = match event_service.get_by_id(path.into_inner()).await {
        Ok(event) => event,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service
        .create_expense(event.id, request.into_inner())
        .await
    {
        Ok(expense) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": EventExpenseResponse::from(expense)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn event_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::post().to(create_event))
            .route("", web::get().to(index_events))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::delete().to(delete_event))
            .route("/{id}/expenses", web::get().to(get_event_expenses))
            .route("/{id}/expenses", web::post().to(create_event_expense)),
    );
}
