//! 领域层
//!
//! 包含菜单项与购物车项实体，以及写入前的必填字段校验

pub mod entities;
pub mod validation;

pub use entities::*;
pub use validation::*;
