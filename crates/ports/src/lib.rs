//! ports - 抽象 trait 层
//!
//! 定义资源契约与仓储接口，存储实现位于 adapters

mod repository;
mod resource;

pub use repository::*;
pub use resource::*;
