//! 菜单项实体

use bistro_ports::{Patchable, RecordId, Resource};
use serde::{Deserialize, Serialize};

/// 描述的最大字符数，与存储列 `VARCHAR(144)` 一致
pub const DESCRIPTION_MAX_CHARS: usize = 144;

/// 菜单项
///
/// 序列化结果即响应结构，字段顺序与声明一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: RecordId,
    pub title: String,
    /// 价格（整数货币单位）
    pub price: i32,
    /// 描述，最长 [`DESCRIPTION_MAX_CHARS`] 字符
    pub description: String,
    /// 餐段，如 breakfast / lunch / dinner
    pub meal: String,
    /// 菜品分类
    #[serde(rename = "type")]
    pub kind: String,
    /// 图片地址
    pub img: String,
}

/// 新建菜单项载荷
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMenuItem {
    pub title: String,
    pub price: i32,
    pub description: String,
    pub meal: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
}

/// 菜单项局部更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MenuItemPatch {
    pub title: Option<String>,
    pub price: Option<i32>,
    pub description: Option<String>,
    pub meal: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub img: Option<String>,
}

impl Resource for MenuItem {
    type Draft = NewMenuItem;

    const NAME: &'static str = "menu item";
    const TABLE: &'static str = "menu_item";
    const FIELDS: &'static [&'static str] = &["title", "price", "description", "meal", "type", "img"];

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
            description: draft.description,
            meal: draft.meal,
            kind: draft.kind,
            img: draft.img,
        }
    }

    fn check_draft(draft: &Self::Draft) -> Result<(), String> {
        check_description(&draft.description)
    }
}

/// 按字符（而非字节）计数
fn check_description(description: &str) -> Result<(), String> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(format!(
            "'description' must be at most {} characters (got {}).",
            DESCRIPTION_MAX_CHARS, len
        ));
    }
    Ok(())
}

fn overwrite<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

impl Patchable for MenuItem {
    type Patch = MenuItemPatch;

    fn apply_patch(&mut self, patch: Self::Patch) -> bool {
        let mut changed = false;
        changed |= overwrite(&mut self.title, patch.title);
        changed |= overwrite(&mut self.price, patch.price);
        changed |= overwrite(&mut self.description, patch.description);
        changed |= overwrite(&mut self.meal, patch.meal);
        changed |= overwrite(&mut self.kind, patch.kind);
        changed |= overwrite(&mut self.img, patch.img);
        changed
    }

    fn check_patch(patch: &Self::Patch) -> Result<(), String> {
        match &patch.description {
            Some(description) => check_description(description),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pancakes() -> MenuItem {
        MenuItem {
            id: 1,
            title: "Pancakes".to_string(),
            price: 8,
            description: "Fluffy stack".to_string(),
            meal: "breakfast".to_string(),
            kind: "sweet".to_string(),
            img: "pancakes.jpg".to_string(),
        }
    }

    #[test]
    fn test_serializes_exactly_declared_fields() {
        let value = serde_json::to_value(pancakes()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "Pancakes",
                "price": 8,
                "description": "Fluffy stack",
                "meal": "breakfast",
                "type": "sweet",
                "img": "pancakes.jpg"
            })
        );
    }

    #[test]
    fn test_fields_match_serialized_keys() {
        let value = serde_json::to_value(pancakes()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.retain(|k| *k != "id");
        keys.sort_unstable();

        let mut fields = MenuItem::FIELDS.to_vec();
        fields.sort_unstable();
        assert_eq!(keys, fields);
    }

    #[test]
    fn test_patch_price_only() {
        let mut item = pancakes();
        let patch: MenuItemPatch = serde_json::from_value(json!({ "price": 10 })).unwrap();

        assert!(item.apply_patch(patch));
        assert_eq!(item.price, 10);
        assert_eq!(MenuItem { price: 8, ..item }, pancakes());
    }

    #[test]
    fn test_patch_null_and_absent_mean_no_change() {
        let mut item = pancakes();
        let patch: MenuItemPatch =
            serde_json::from_value(json!({ "title": null, "meal": null })).unwrap();

        assert!(!item.apply_patch(patch));
        assert_eq!(item, pancakes());
    }

    #[test]
    fn test_from_draft_keeps_values() {
        let draft: NewMenuItem = serde_json::from_value(json!({
            "title": "Pancakes",
            "price": 8,
            "description": "Fluffy stack",
            "meal": "breakfast",
            "type": "sweet",
            "img": "pancakes.jpg"
        }))
        .unwrap();

        assert_eq!(MenuItem::from_draft(1, draft), pancakes());
    }
}
