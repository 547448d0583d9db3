//! bistro-adapter-memory - 内存仓储
//!
//! 与 PostgreSQL 仓储遵循相同的契约：ID 单调递增且删除后不复用，列表按 ID 顺序返回

use std::collections::BTreeMap;

use async_trait::async_trait;
use bistro_errors::{AppError, AppResult};
use bistro_ports::{RecordId, Repository, Resource};
use tokio::sync::RwLock;
use tracing::debug;

struct Table<R> {
    rows: BTreeMap<RecordId, R>,
    next_id: RecordId,
}

/// 内存资源仓储
pub struct InMemoryRepository<R> {
    table: RwLock<Table<R>>,
}

impl<R: Resource> InMemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 当前行数
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R: Resource> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Resource> Repository<R> for InMemoryRepository<R> {
    async fn find_all(&self) -> AppResult<Vec<R>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: RecordId) -> AppResult<Option<R>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<R>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|row| row.title() == title)
            .cloned())
    }

    async fn insert(&self, draft: R::Draft) -> AppResult<R> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| AppError::database(format!("{} id space exhausted", R::TABLE)))?;

        let entity = R::from_draft(id, draft);
        table.rows.insert(id, entity.clone());

        debug!(table = R::TABLE, id, "Row inserted");
        Ok(entity)
    }

    async fn update(&self, entity: &R) -> AppResult<()> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("{} {} not found", R::NAME, entity.id()))),
        }
    }

    async fn delete(&self, id: RecordId) -> AppResult<()> {
        match self.table.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("{} {} not found", R::NAME, id))),
        }
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut table = self.table.write().await;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize)]
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

    fn draft(title: &str, price: i32) -> DishDraft {
        DishDraft {
            title: title.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_ids() {
        let repo = InMemoryRepository::<Dish>::new();

        let first = repo.insert(draft("Pancakes", 8)).await.unwrap();
        let second = repo.insert(draft("Pancakes", 8)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.title, second.title);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryRepository::<Dish>::new();

        let first = repo.insert(draft("Waffles", 9)).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.insert(draft("Waffles", 9)).await.unwrap();

        assert!(second.id > first.id);
        assert!(repo.find_by_id(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_title_returns_first_match() {
        let repo = InMemoryRepository::<Dish>::new();
        let first = repo.insert(draft("Toast", 3)).await.unwrap();
        repo.insert(draft("Toast", 4)).await.unwrap();

        let found = repo.find_by_title("Toast").await.unwrap().unwrap();
        assert_eq!(found, first);
        assert!(repo.find_by_title("Bagel").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows_are_not_found() {
        let repo = InMemoryRepository::<Dish>::new();
        let ghost = Dish {
            id: 42,
            title: "Ghost".to_string(),
            price: 1,
        };

        assert!(matches!(repo.update(&ghost).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(42).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_overwrites_row() {
        let repo = InMemoryRepository::<Dish>::new();
        let mut dish = repo.insert(draft("Omelette", 7)).await.unwrap();

        dish.price = 11;
        repo.update(&dish).await.unwrap();

        let stored = repo.find_by_id(dish.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 11);
        assert_eq!(stored.title, "Omelette");
    }

    #[tokio::test]
    async fn test_delete_all_for_any_count() {
        for n in 0..4 {
            let repo = InMemoryRepository::<Dish>::new();
            for i in 0..n {
                repo.insert(draft("Item", i)).await.unwrap();
            }

            assert_eq!(repo.delete_all().await.unwrap(), n as u64);
            assert!(repo.find_all().await.unwrap().is_empty());
        }
    }
}
