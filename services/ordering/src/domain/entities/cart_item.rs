//! 购物车项实体

use bistro_ports::{RecordId, Resource};
use serde::{Deserialize, Serialize};

/// 购物车项
///
/// 与菜单项之间没有外键关联，标题允许重复
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: RecordId,
    pub title: String,
    pub price: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
}

/// 新建购物车项载荷
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCartItem {
    pub title: String,
    pub price: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
}

impl Resource for CartItem {
    type Draft = NewCartItem;

    const NAME: &'static str = "cart item";
    const TABLE: &'static str = "cart";
    const FIELDS: &'static [&'static str] = &["title", "price", "type", "img"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn draft_title(draft: &Self::Draft) -> &str {
        &draft.title
    }

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self {
        Self {
            id,
            title: draft.title,
            price: draft.price,
            kind: draft.kind,
            img: draft.img,
        }
    }
}
