//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use bistro_config::{AppConfig, CorsConfig};
use bistro_errors::AppResult;
use bistro_telemetry::init_metrics;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cors::cors_layer;
use crate::health::{PlatformState, platform_routes};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 这是所有服务的统一入口点。它负责：
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志）与 Prometheus recorder
/// 3. 创建基础设施资源（数据库连接池）
/// 4. 调用服务提供的闭包构建业务路由
/// 5. 挂载运维端点、请求追踪与 CORS
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     bistro_bootstrap::run("config", |infra| async move {
///         Ok(my_routes(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run<F, Fut>(config_dir: &str, app_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    dotenvy::dotenv().ok();
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let metrics = match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder not installed: {}", e);
            None
        }
    };

    // 3. 创建基础设施
    let infra = Infrastructure::from_config(&config).await?;
    let platform = PlatformState {
        postgres_pool: infra.postgres_pool(),
        metrics,
    };

    // 4. 构建业务路由
    let routes = app_builder(infra).await?;
    let app = compose_app(routes, platform, &config.cors);

    // 5. 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}

/// 合并业务路由与运维路由，并挂载请求追踪与 CORS
pub fn compose_app(routes: Router, platform: PlatformState, cors: &CorsConfig) -> Router {
    routes
        .merge(platform_routes(platform))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
}
