//! 写入前校验
//!
//! 检查必填字段是否出现；字段缺失或为 `null` 视为缺失，空字符串与 0 视为已提供。
//! 反序列化后再检查资源自身的字段约束（如描述长度）。

use bistro_errors::{AppError, AppResult};
use bistro_ports::{Patchable, Resource};
use serde_json::{Map, Value};

/// 按声明顺序返回第一个缺失的必填字段
pub fn first_missing_field<'a>(body: &Map<String, Value>, required: &[&'a str]) -> Option<&'a str> {
    required
        .iter()
        .copied()
        .find(|field| matches!(body.get(*field), None | Some(Value::Null)))
}

/// 校验新建载荷并转换为草稿
///
/// 只报告第一个缺失字段
pub fn validate_draft<R: Resource>(body: Map<String, Value>) -> AppResult<R::Draft> {
    if let Some(field) = first_missing_field(&body, R::FIELDS) {
        return Err(AppError::validation(format!("Data must have a '{}' key.", field)));
    }

    let draft = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::validation(format!("Invalid {} data: {}", R::NAME, e)))?;
    R::check_draft(&draft).map_err(AppError::validation)?;

    Ok(draft)
}

/// 解析局部更新载荷，不做必填校验
pub fn parse_patch<R: Patchable>(body: Map<String, Value>) -> AppResult<R::Patch> {
    let patch = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::validation(format!("Invalid {} data: {}", R::NAME, e)))?;
    R::check_patch(&patch).map_err(AppError::validation)?;

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, MenuItem};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a json object"),
        }
    }

    #[test]
    fn test_reports_first_missing_in_declaration_order() {
        let body = object(json!({ "title": "Pancakes", "meal": "breakfast" }));
        assert_eq!(first_missing_field(&body, MenuItem::FIELDS), Some("price"));

        let body = object(json!({ "price": 8 }));
        assert_eq!(first_missing_field(&body, MenuItem::FIELDS), Some("title"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let body = object(json!({ "title": "Toast", "price": 2, "type": null, "img": "t.jpg" }));
        assert_eq!(first_missing_field(&body, CartItem::FIELDS), Some("type"));
    }

    #[test]
    fn test_empty_string_and_zero_are_present() {
        let body = object(json!({ "title": "", "price": 0, "type": "", "img": "" }));
        assert_eq!(first_missing_field(&body, CartItem::FIELDS), None);

        let draft = validate_draft::<CartItem>(body).unwrap();
        assert_eq!(draft.price, 0);
        assert_eq!(draft.title, "");
    }

    #[test]
    fn test_validate_draft_names_missing_field() {
        let body = object(json!({
            "title": "Pancakes",
            "price": 8,
            "description": "Fluffy stack",
            "meal": "breakfast",
            "type": "sweet"
        }));

        let err = validate_draft::<MenuItem>(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Data must have a 'img' key.");
    }

    #[test]
    fn test_validate_draft_rejects_wrong_types() {
        let body = object(json!({ "title": "Toast", "price": "cheap", "type": "savory", "img": "t.jpg" }));

        let err = validate_draft::<CartItem>(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let body = object(json!({ "title": "Toast", "price": 2, "type": "savory", "img": "t.jpg", "qty": 3 }));
        assert!(validate_draft::<CartItem>(body).is_ok());
    }

    #[test]
    fn test_description_limit_counts_characters() {
        let mut body = object(json!({
            "title": "Crêpes",
            "price": 9,
            "meal": "breakfast",
            "type": "sweet",
            "img": "crepes.jpg"
        }));

        // 144 个双字节字符：字节数超过 144，字符数恰好 144
        body.insert("description".to_string(), Value::from("é".repeat(144)));
        assert!(validate_draft::<MenuItem>(body.clone()).is_ok());

        body.insert("description".to_string(), Value::from("é".repeat(145)));
        let err = validate_draft::<MenuItem>(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("at most 144 characters"));
    }

    #[test]
    fn test_patch_description_limit() {
        let body = object(json!({ "description": "x".repeat(145) }));
        assert!(matches!(parse_patch::<MenuItem>(body), Err(AppError::Validation(_))));

        let body = object(json!({ "description": "x".repeat(144) }));
        assert!(parse_patch::<MenuItem>(body).is_ok());
    }

    #[test]
    fn test_parse_patch_accepts_empty_body() {
        let patch = parse_patch::<MenuItem>(Map::new()).unwrap();
        assert_eq!(patch, Default::default());
    }
}
