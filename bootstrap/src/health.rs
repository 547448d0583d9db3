//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bistro_adapter_postgres::check_connection;
use bistro_telemetry::HealthStatus;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use sqlx::PgPool;

/// 运维端点共享状态
#[derive(Clone, Default)]
pub struct PlatformState {
    pub postgres_pool: Option<PgPool>,
    pub metrics: Option<PrometheusHandle>,
}

/// 运维路由
pub fn platform_routes(state: PlatformState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(render_metrics))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 就绪检查：存储可用时返回 200，否则 503
async fn readiness_check(State(state): State<PlatformState>) -> impl IntoResponse {
    let mut status = HealthStatus::new();

    match &state.postgres_pool {
        Some(pool) => match check_connection(pool).await {
            Ok(()) => status.add_check("postgres", true, None),
            Err(e) => status.add_check("postgres", false, Some(e.to_string())),
        },
        None => status.add_check("storage", true, Some("in-memory".to_string())),
    }

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn render_metrics(State(state): State<PlatformState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics recorder not installed".to_string(),
        ),
    }
}
