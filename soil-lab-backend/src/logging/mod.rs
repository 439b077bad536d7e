// src/logging/mod.rs

use crate::domain::actor::Actor;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

#[macro_export]
macro_rules! log_with_context {
    ($level:expr, $msg:expr $(, $($key:tt => $value:expr),* $(,)?)?) => {
        match $level {
            tracing::Level::ERROR => {
                tracing::error!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::WARN => {
                tracing::warn!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::INFO => {
                tracing::info!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::DEBUG => {
                tracing::debug!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            _ => {}
        }
    };
}

// リクエストコンテキスト
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub path: String,
    pub method: String,
}

impl RequestContext {
    fn from_request(req: &Request<Body>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            path: req.uri().path().to_string(),
            method: req.method().to_string(),
        }
    }
}

// ロギングミドルウェア（認証より内側で動くので主体が取れる）
//
// リクエストごとに span を張り、主体の uid / ロール / 所属組織を載せる。
// アクセス解決側のログはこの span の中で出力される。
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    let context = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| RequestContext::from_request(&req));

    let span = tracing::info_span!(
        "request",
        request_id = %context.request_id,
        actor_uid = tracing::field::Empty,
        actor_role = tracing::field::Empty,
        home_organization_id = tracing::field::Empty,
    );
    if let Some(actor) = req.extensions().get::<Actor>() {
        span.record("actor_uid", actor.uid.as_str());
        span.record("actor_role", actor.role.as_str());
        if let Some(organization_id) = actor.organization_id {
            span.record("home_organization_id", organization_id);
        }
    }

    span.in_scope(|| {
        log_with_context!(
            tracing::Level::DEBUG,
            "Request started",
            "method" => &context.method,
            "path" => &context.path,
        );
    });

    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis();

    span.in_scope(|| {
        if status == StatusCode::FORBIDDEN {
            // 拒否理由はレスポンスに出さないので、ここで経路だけ残す
            log_with_context!(
                tracing::Level::WARN,
                "Access denied",
                "method" => &context.method,
                "path" => &context.path,
                "duration_ms" => duration_ms,
            );
            return;
        }
        log_with_context!(
            status_level(status),
            "Request completed",
            "method" => &context.method,
            "path" => &context.path,
            "status" => status.as_u16(),
            "duration_ms" => duration_ms,
        );
    });

    response
}

fn status_level(status: StatusCode) -> tracing::Level {
    if status.is_server_error() {
        tracing::Level::ERROR
    } else if status.is_client_error() {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    }
}

// RequestContextを生成するミドルウェア
pub async fn inject_request_context(mut req: Request<Body>, next: Next) -> Response {
    let context = RequestContext::from_request(&req);
    req.extensions_mut().insert(context);
    next.run(req).await
}
