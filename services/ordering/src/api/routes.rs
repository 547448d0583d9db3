//! 路由定义

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use bistro_adapter_memory::InMemoryRepository;
use bistro_ports::{Repository, Resource};

use super::handlers;
use crate::application::ResourceHandler;
use crate::domain::{CartItem, MenuItem};

/// 路由共享状态
///
/// 由启动流程注入存储句柄，不使用全局连接
#[derive(Clone)]
pub struct AppState {
    pub menu: Arc<ResourceHandler<MenuItem>>,
    pub cart: Arc<ResourceHandler<CartItem>>,
}

impl AppState {
    pub fn new(
        menu_repo: Arc<dyn Repository<MenuItem>>,
        cart_repo: Arc<dyn Repository<CartItem>>,
    ) -> Self {
        Self {
            menu: Arc::new(ResourceHandler::new(menu_repo)),
            cart: Arc::new(ResourceHandler::new(cart_repo)),
        }
    }

    /// 内存存储（`memory` 后端与测试）
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<MenuItem>::new()),
            Arc::new(InMemoryRepository::<CartItem>::new()),
        )
    }
}

/// 业务路由
pub fn api_routes(state: AppState) -> Router {
    let menu = resource_routes::<MenuItem>()
        .route(
            "/update/{id}",
            put(handlers::update::<MenuItem>).patch(handlers::update::<MenuItem>),
        )
        .with_state(state.menu);

    let cart = resource_routes::<CartItem>()
        .route("/delete", delete(handlers::delete_all::<CartItem>))
        .with_state(state.cart);

    Router::new().nest("/menu-item", menu).nest("/cart", cart)
}

/// 每种资源共有的增删查路由
fn resource_routes<R: Resource>() -> Router<Arc<ResourceHandler<R>>> {
    Router::new()
        .route("/add", post(handlers::add::<R>))
        .route("/get", get(handlers::list::<R>))
        .route("/get/{id}", get(handlers::get_by_id::<R>))
        .route("/delete/{id}", delete(handlers::delete_by_id::<R>))
}

