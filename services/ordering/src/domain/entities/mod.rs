//! 实体定义

mod cart_item;
mod menu_item;

pub use cart_item::*;
pub use menu_item::*;
