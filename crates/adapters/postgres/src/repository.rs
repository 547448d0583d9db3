//! 通用 PostgreSQL 仓储
//!
//! SQL 由资源的表名与字段声明生成，每条语句自动提交

use std::marker::PhantomData;

use async_trait::async_trait;
use bistro_errors::{AppError, AppResult};
use bistro_ports::{RecordId, Repository, Resource};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgPool, Postgres};
use tracing::debug;

/// 列值
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Int(i32),
    Text(String),
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// 可映射到 PostgreSQL 行的资源
///
/// 列值顺序必须与 `Resource::FIELDS` 一致
pub trait PgRecord: Resource + for<'r> FromRow<'r, PgRow> + Unpin {
    fn draft_values(draft: &Self::Draft) -> Vec<ColumnValue>;

    fn values(&self) -> Vec<ColumnValue>;
}

/// 预生成的 SQL 语句
#[derive(Debug, Clone)]
struct Statements {
    select_all: String,
    select_by_id: String,
    select_by_title: String,
    insert: String,
    update: String,
    delete: String,
    delete_all: String,
}

impl Statements {
    fn for_resource<R: Resource>() -> Self {
        let columns = R::FIELDS
            .iter()
            .map(|field| format!("\"{}\"", field))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=R::FIELDS.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = R::FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| format!("\"{}\" = ${}", field, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let table = R::TABLE;

        Self {
            select_all: format!("SELECT id, {columns} FROM {table} ORDER BY id"),
            select_by_id: format!("SELECT id, {columns} FROM {table} WHERE id = $1"),
            select_by_title: format!(
                "SELECT id, {columns} FROM {table} WHERE \"title\" = $1 ORDER BY id LIMIT 1"
            ),
            insert: format!(
                "INSERT INTO {table} ({columns}) VALUES ({placeholders}) RETURNING id, {columns}"
            ),
            update: format!(
                "UPDATE {table} SET {assignments} WHERE id = ${}",
                R::FIELDS.len() + 1
            ),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
            delete_all: format!("DELETE FROM {table}"),
        }
    }
}

fn bind_query<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: Vec<ColumnValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = match value {
            ColumnValue::Int(v) => query.bind(v),
            ColumnValue::Text(v) => query.bind(v),
        };
    }
    query
}

fn bind_query_as<'q, R>(
    mut query: QueryAs<'q, Postgres, R, PgArguments>,
    values: Vec<ColumnValue>,
) -> QueryAs<'q, Postgres, R, PgArguments> {
    for value in values {
        query = match value {
            ColumnValue::Int(v) => query.bind(v),
            ColumnValue::Text(v) => query.bind(v),
        };
    }
    query
}

/// 基于 PostgreSQL 的资源仓储
pub struct PostgresRepository<R> {
    pool: PgPool,
    statements: Statements,
    _resource: PhantomData<fn() -> R>,
}

impl<R: PgRecord> PostgresRepository<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statements: Statements::for_resource::<R>(),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: PgRecord> Repository<R> for PostgresRepository<R> {
    async fn find_all(&self) -> AppResult<Vec<R>> {
        sqlx::query_as::<_, R>(&self.statements.select_all)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list {}: {}", R::TABLE, e)))
    }

    async fn find_by_id(&self, id: RecordId) -> AppResult<Option<R>> {
        sqlx::query_as::<_, R>(&self.statements.select_by_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query {}: {}", R::TABLE, e)))
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<R>> {
        sqlx::query_as::<_, R>(&self.statements.select_by_title)
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query {}: {}", R::TABLE, e)))
    }

    async fn insert(&self, draft: R::Draft) -> AppResult<R> {
        let query = sqlx::query_as::<_, R>(&self.statements.insert);
        let entity = bind_query_as(query, R::draft_values(&draft))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert {}: {}", R::TABLE, e)))?;

        debug!(table = R::TABLE, id = entity.id(), "Row inserted");
        Ok(entity)
    }

    async fn update(&self, entity: &R) -> AppResult<()> {
        let query = sqlx::query(&self.statements.update);
        let result = bind_query(query, entity.values())
            .bind(entity.id())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update {}: {}", R::TABLE, e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("{} {} not found", R::NAME, entity.id())));
        }

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> AppResult<()> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete {}: {}", R::TABLE, e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("{} {} not found", R::NAME, id)));
        }

        Ok(())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query(&self.statements.delete_all)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear {}: {}", R::TABLE, e)))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    struct Dish {
        id: RecordId,
        title: String,
        price: i32,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct DishDraft {
        title: String,
        price: i32,
    }

    impl Resource for Dish {
        type Draft = DishDraft;

        const NAME: &'static str = "dish";
        const TABLE: &'static str = "dish";
        const FIELDS: &'static [&'static str] = &["title", "price"];

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
            }
        }
    }

    #[test]
    fn test_statements_follow_field_declaration() {
        let statements = Statements::for_resource::<Dish>();

        assert_eq!(
            statements.select_all,
            "SELECT id, \"title\", \"price\" FROM dish ORDER BY id"
        );
        assert_eq!(
            statements.insert,
            "INSERT INTO dish (\"title\", \"price\") VALUES ($1, $2) RETURNING id, \"title\", \"price\""
        );
        assert_eq!(
            statements.update,
            "UPDATE dish SET \"title\" = $1, \"price\" = $2 WHERE id = $3"
        );
        assert_eq!(statements.delete, "DELETE FROM dish WHERE id = $1");
        assert_eq!(statements.delete_all, "DELETE FROM dish");
        assert!(statements.select_by_title.contains("WHERE \"title\" = $1"));
    }

    #[test]
    fn test_column_value_conversions() {
        assert_eq!(ColumnValue::from(8), ColumnValue::Int(8));
        assert_eq!(ColumnValue::from("pancakes.jpg"), ColumnValue::Text("pancakes.jpg".to_string()));
    }
}
