use crate::config::GoogleConfig;
use crate::error::{AppError, AppResult};
use crate::models::{GoogleTokenResponse, GoogleUserInfo, UserResponse};
use crate::services::UserService;
use crate::utils::JwtService;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google OAuth login flow: consent redirect, code exchange, profile fetch,
/// user upsert, session token issuance.
#[derive(Clone)]
pub struct AuthService {
    http: reqwest::Client,
    config: GoogleConfig,
    user_service: UserService,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(config: GoogleConfig, user_service: UserService, jwt_service: JwtService) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            user_service,
            jwt_service,
        }
    }

    /// URL of Google's consent screen for this client.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=email%20profile&state={}",
            GOOGLE_AUTH_URL, self.config.client_id, self.config.redirect_uri, state
        )
    }

    /// Exchange the callback code, fetch the Google profile, and mint a
    /// session token. Only the configured Google account may log in.
    pub async fn login_with_code(&self, code: &str) -> AppResult<(UserResponse, String)> {
        let token: GoogleTokenResponse = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::ExternalApiError(format!("Google token exchange failed: {e}")))?
            .json()
            .await?;

        let info: GoogleUserInfo = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::ExternalApiError(format!("Google userinfo failed: {e}")))?
            .json()
            .await?;

        if info.id != self.config.allowed_google_id {
            return Err(AppError::Forbidden);
        }

        let user = self.user_service.upsert(&info).await?;
        let session = self.jwt_service.generate_token(user.id)?;

        Ok((UserResponse::from(user), session))
    }

    /// Resolve a session token back to its user.
    pub async fn logged_user(&self, token: &str) -> AppResult<UserResponse> {
        let claims = self.jwt_service.verify_token(token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Malformed session token".to_string()))?;

        let user = self.user_service.get_by_id(user_id).await?;
        Ok(UserResponse::from(user))
    }

    pub fn session_max_age(&self) -> i64 {
        self.jwt_service.get_expires_in()
    }
}
