use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::AppError;
use crate::services::AuthService;

#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub code: String,
}

const AUTH_COOKIE: &str = "auth_token";

fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .max_age(CookieDuration::seconds(max_age_seconds))
        .http_only(true)
        .finish()
}

#[utoipa::path(
    get,
    path = "/api/auth/google",
    tag = "auth",
    responses(
        (status = 307, description = "Redirect to Google's consent screen")
    )
)]
pub async fn google_auth(
    auth_service: web::Data<AuthService>,
    query: web::Query<AuthQuery>,
) -> Result<HttpResponse> {
    let url = auth_service.authorize_url(&query.state);
    Ok(HttpResponse::TemporaryRedirect()
        .append_header(("Location", url))
        .finish())
}

#[utoipa::path(
    get,
    path = "/api/auth/google/callback",
    tag = "auth",
    responses(
        (status = 307, description = "Session cookie set, redirect to the dashboard"),
        (status = 403, description = "Account not allowed")
    )
)]
pub async fn google_callback(
    auth_service: web::Data<AuthService>,
    config: web::Data<Config>,
    query: web::Query<AuthQuery>,
) -> Result<HttpResponse> {
    match auth_service.login_with_code(&query.code).await {
        Ok((_user, token)) => {
            let cookie = session_cookie(token, auth_service.session_max_age());
            Ok(HttpResponse::TemporaryRedirect()
                .cookie(cookie)
                .append_header(("Location", format!("{}/dashboard", config.frontend_url)))
                .finish())
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cookie cleared, redirect to the frontend")
    )
)]
pub async fn logout(config: web::Data<Config>) -> Result<HttpResponse> {
    let mut cookie = session_cookie(String::new(), 0);
    cookie.make_removal();

    Ok(HttpResponse::SeeOther()
        .cookie(cookie)
        .append_header(("Location", config.frontend_url.clone()))
        .finish())
}

#[utoipa::path(
    get,
    path = "/api/auth/logged_user",
    tag = "auth",
    responses(
        (status = 200, description = "Currently logged-in user", body = crate::models::UserResponse),
        (status = 401, description = "No valid session")
    )
)]
pub async fn logged_user(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let token = match req.cookie(AUTH_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            return Ok(
                AppError::AuthError("Missing session token".to_string()).error_response(),
            )
        }
    };

    match auth_service.logged_user(&token).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/google", web::get().to(google_auth))
            .route("/google/callback", web::get().to(google_callback))
            .route("/logout", web::post().to(logout))
            .route("/logged_user", web::get().to(logged_user)),
    );
}
