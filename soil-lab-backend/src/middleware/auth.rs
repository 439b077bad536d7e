// soil-lab-backend/src/middleware/auth.rs

use crate::domain::actor::Actor;
use crate::domain::role_model::Role;
use crate::error::AppError;
use crate::utils::jwt::JwtManager;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// JWT認証ミドルウェアの設定
#[derive(Clone)]
pub struct AuthMiddlewareConfig {
    pub jwt_manager: Arc<JwtManager>,
    pub access_token_cookie_name: String,
    pub skip_auth_paths: Vec<String>,
}

impl AuthMiddlewareConfig {
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            jwt_manager,
            access_token_cookie_name: ACCESS_TOKEN_COOKIE.to_string(),
            skip_auth_paths: vec!["/health".to_string()],
        }
    }
}

/// トークンを検証し、リクエスト主体 `Actor` を拡張に格納する
///
/// ロールラベルが正規の6ロールに一致しないトークンは認証失敗として扱う。
pub async fn jwt_auth_middleware(
    State(config): State<AuthMiddlewareConfig>,
    headers: HeaderMap,
    cookie_jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    if should_skip_auth(&path, &config.skip_auth_paths) {
        debug!("Skipping auth for path: {}", path);
        return Ok(next.run(request).await);
    }

    let token = extract_token(&headers, &cookie_jar, &config.access_token_cookie_name).ok_or_else(
        || {
            warn!(path = %path, "Missing authentication token");
            AppError::Unauthorized("Authentication required".to_string())
        },
    )?;

    let claims = config
        .jwt_manager
        .verify_access_token(&token)
        .map_err(|e| {
            warn!(path = %path, error = %e, "Invalid access token");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

    let role = Role::parse(&claims.role).map_err(|e| {
        warn!(path = %path, uid = %claims.sub, error = %e, "Token carries an unknown role");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let actor = Actor::new(claims.sub, claims.email, role, claims.organization_id);
    debug!(
        uid = %actor.uid,
        role = %actor.role,
        organization_id = ?actor.organization_id,
        "Request authenticated"
    );

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

/// CORS ミドルウェア設定
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true) // Cookie送信を許可
        .max_age(std::time::Duration::from_secs(3600))
}

// --- ヘルパー関数 ---

/// リクエストからトークンを抽出（Authorizationヘッダー優先、Cookieはフォールバック）
fn extract_token(headers: &HeaderMap, cookie_jar: &CookieJar, cookie_name: &str) -> Option<String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer ").map(|s| s.trim().to_string()))
        .filter(|token| !token.is_empty());

    let cookie_token = cookie_jar
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string());

    auth_header.or(cookie_token)
}

fn should_skip_auth(path: &str, skip_paths: &[String]) -> bool {
    skip_paths
        .iter()
        .any(|skip_path| path == skip_path || path.starts_with(&format!("{}/", skip_path)))
}

// --- Axum Extractors ---

impl<S> axum::extract::FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
