//! HTTP 接口层

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::JsonObject;
pub use routes::{AppState, api_routes};
