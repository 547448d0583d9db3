//! ordering 服务入口

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    bistro_bootstrap::run("config", |infra| async move {
        ordering::build_routes(infra.postgres_pool()).await
    })
    .await
}
