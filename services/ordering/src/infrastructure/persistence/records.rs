//! 行映射
//!
//! `type` 是 SQL 关键字，列名需要加引号，映射到实体的 `kind`

use bistro_adapter_postgres::{ColumnValue, PgRecord};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::domain::{CartItem, MenuItem, NewCartItem, NewMenuItem};

impl<'r> FromRow<'r, PgRow> for MenuItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            meal: row.try_get("meal")?,
            kind: row.try_get("type")?,
            img: row.try_get("img")?,
        })
    }
}

impl PgRecord for MenuItem {
    fn draft_values(draft: &NewMenuItem) -> Vec<ColumnValue> {
        vec![
            draft.title.as_str().into(),
            draft.price.into(),
            draft.description.as_str().into(),
            draft.meal.as_str().into(),
            draft.kind.as_str().into(),
            draft.img.as_str().into(),
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            self.title.as_str().into(),
            self.price.into(),
            self.description.as_str().into(),
            self.meal.as_str().into(),
            self.kind.as_str().into(),
            self.img.as_str().into(),
        ]
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            kind: row.try_get("type")?,
            img: row.try_get("img")?,
        })
    }
}

impl PgRecord for CartItem {
    fn draft_values(draft: &NewCartItem) -> Vec<ColumnValue> {
        vec![
            draft.title.as_str().into(),
            draft.price.into(),
            draft.kind.as_str().into(),
            draft.img.as_str().into(),
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            self.title.as_str().into(),
            self.price.into(),
            self.kind.as_str().into(),
            self.img.as_str().into(),
        ]
    }
}
