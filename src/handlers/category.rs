use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::CategoryService;

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_category(
    category_service: web::Data<CategoryService>,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    match category_service.create(request.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": CategoryResponse::from(category)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories")
    )
)]
pub async fn index_categories(
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse> {
    match category_service.index().await {
        Ok(categories) => {
            let items: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": items
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::post().to(create_category))
            .route("", web::get().to(index_categories)),
    );
}
