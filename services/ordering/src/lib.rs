//! ordering - 菜单与购物车服务
//!
//! 提供菜单项与购物车项的增删改查 HTTP 接口

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use bistro_adapter_postgres::{MigrationManager, PostgresRepository};
use bistro_errors::AppResult;
use sqlx::PgPool;
use tracing::info;

use api::{AppState, api_routes};
use domain::{CartItem, MenuItem};

/// 构建业务路由
///
/// 传入连接池时先执行迁移并使用 PostgreSQL 仓储，否则使用内存仓储
pub async fn build_routes(pool: Option<PgPool>) -> AppResult<Router> {
    let state = match pool {
        Some(pool) => {
            let result = MigrationManager::new(pool.clone())
                .migrate(&infrastructure::persistence::migrations())
                .await?;
            info!(
                applied = result.applied_count(),
                skipped = result.skipped.len(),
                "Schema migrations complete"
            );

            AppState::new(
                Arc::new(PostgresRepository::<MenuItem>::new(pool.clone())),
                Arc::new(PostgresRepository::<CartItem>::new(pool)),
            )
        }
        None => AppState::in_memory(),
    };

    Ok(api_routes(state))
}
