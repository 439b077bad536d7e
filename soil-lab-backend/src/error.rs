// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 権限判定のクライアント向けメッセージ（拒否理由は決して返さない）
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied";

/// 組織ディレクトリ（外部コラボレーター）のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Organization directory unavailable: {0}")]
    Unavailable(String),

    #[error("Organization directory lookup timed out after {0}ms")]
    Timeout(u64),
}

/// アクセス制御コアのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// 正規の6ロール以外のラベル。上流のデータ不整合なので必ず伝搬させる
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// strictモードでのみ呼び出し元へ返される
    #[error("Organization lookup failed for {organization_id}: {reason}")]
    OrganizationLookupFailed { organization_id: i32, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    /// 汎用の拒否エラー
    pub fn access_denied() -> Self {
        AppError::Forbidden(ACCESS_DENIED_MESSAGE.to_string())
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::UnknownRole(label) => {
                error!(role = %label, "Stored role label is not canonical");
                AppError::InternalServerError(format!("Unknown role: {}", label))
            }
            AccessError::OrganizationLookupFailed {
                organization_id,
                reason,
            } => AppError::ExternalServiceError(format!(
                "Organization lookup failed for {}: {}",
                organization_id, reason
            )),
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        AppError::ExternalServiceError(err.to_string())
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::DbErr(db_err) => {
                error!(error = ?db_err, "Database error"); // サーバーログには詳細を出す

                let status = match db_err {
                    sea_orm::DbErr::RecordNotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };

                let (message, details) = match &db_err {
                    sea_orm::DbErr::RecordNotFound(entity) => (
                        "The requested resource was not found".to_string(),
                        Some(json!({ "entity": entity })),
                    ),
                    sea_orm::DbErr::Exec(_msg) => (
                        "A database operation failed".to_string(),
                        Some(json!({ "operation": "exec", "hint": "Check database connection" })),
                    ),
                    sea_orm::DbErr::Query(_msg) => (
                        "A database query failed".to_string(),
                        Some(json!({ "operation": "query", "hint": "Check query syntax" })),
                    ),
                    _ => ("A database error occurred".to_string(), None),
                };

                (
                    status,
                    ErrorResponse::new(message, "database_error").with_details(details),
                )
            }
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(message, "not_found"),
            ),
            AppError::ValidationFailure(errors) => {
                let field_errors: HashMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map_or_else(|| "Invalid value".to_string(), |m| m.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();
                let mut response =
                    ErrorResponse::new("Validation failed".to_string(), "validation_errors");
                response.validation_errors = Some(field_errors);
                (StatusCode::BAD_REQUEST, response)
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "bad_request"),
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(message, "unauthorized"),
            ),
            // 拒否理由や対象の存在有無はクライアントに漏らさない
            AppError::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(ACCESS_DENIED_MESSAGE.to_string(), "forbidden"),
            ),
            AppError::InternalServerError(message) => {
                error!(message = %message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "An internal server error occurred".to_string(),
                        "internal_server_error",
                    ),
                )
            }
            AppError::ExternalServiceError(message) => {
                error!(message = %message, "External service error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(
                        "External service error".to_string(),
                        "external_service_error",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: String, error_type: &str) -> Self {
        Self {
            success: false,
            error: message.clone(),
            message,
            details: None,
            validation_errors: None,
            error_type: error_type.to_string(),
        }
    }

    fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_never_echoes_reason() {
        let response =
            AppError::Forbidden("target user belongs to org 7".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_access_error_mapping() {
        let err: AppError = AccessError::UnknownRole("SUPER_ADMIN".to_string()).into();
        assert!(matches!(err, AppError::InternalServerError(_)));

        let err: AppError = AccessError::OrganizationLookupFailed {
            organization_id: 3,
            reason: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
