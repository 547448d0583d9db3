//! 基础设施资源管理
//!
//! 由 bootstrap 统一初始化，再交给服务构建路由

use std::time::Duration;

use bistro_adapter_postgres::{PostgresConfig, create_pool};
use bistro_config::{AppConfig, DatabaseConfig, StorageBackend};
use bistro_errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// PostgreSQL 连接池（`memory` 后端时为空）
    postgres_pool: Option<PgPool>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let postgres_pool = match config.database.backend {
            StorageBackend::Postgres => {
                let pool = create_pool(&pool_config(&config.database)?).await?;
                info!(
                    "PostgreSQL connection pool created (max_connections: {})",
                    config.database.max_connections
                );
                Some(pool)
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage, data is lost on restart");
                None
            }
        };

        Ok(Self { postgres_pool })
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> Option<PgPool> {
        self.postgres_pool.clone()
    }
}

fn pool_config(database: &DatabaseConfig) -> AppResult<PostgresConfig> {
    let url = database
        .url
        .as_ref()
        .ok_or_else(|| AppError::config("database.url is not set"))?;

    Ok(PostgresConfig::new(url.expose_secret().as_str())
        .with_pool_bounds(database.min_connections, database.max_connections)
        .with_timeouts(
            Duration::from_secs(database.connect_timeout_secs),
            Duration::from_secs(database.idle_timeout_secs),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn test_pool_config_follows_database_settings() {
        let database = DatabaseConfig {
            url: Some(Secret::new("postgres://localhost/bistro".to_string())),
            max_connections: 9,
            min_connections: 3,
            connect_timeout_secs: 4,
            idle_timeout_secs: 60,
            ..Default::default()
        };

        let config = pool_config(&database).unwrap();
        assert_eq!(config.url, "postgres://localhost/bistro");
        assert_eq!((config.min_connections, config.max_connections), (3, 9));
        assert_eq!(config.acquire_timeout, Duration::from_secs(4));
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_pool_config_requires_url() {
        let err = pool_config(&DatabaseConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
