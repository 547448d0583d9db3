//! Repository trait 定义

use async_trait::async_trait;
use bistro_errors::AppResult;

use crate::{RecordId, Resource};

/// 资源仓储
///
/// 每个写操作立即提交；查找不到时返回 `None` 而不是错误。
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// 查询全部（存储自然顺序）
    async fn find_all(&self) -> AppResult<Vec<R>>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: RecordId) -> AppResult<Option<R>>;

    /// 根据标题查找第一条
    async fn find_by_title(&self, title: &str) -> AppResult<Option<R>>;

    /// 插入并返回带生成 ID 的实体
    async fn insert(&self, draft: R::Draft) -> AppResult<R>;

    /// 持久化实体的全部字段，记录不存在时返回 NotFound
    async fn update(&self, entity: &R) -> AppResult<()>;

    /// 删除，记录不存在时返回 NotFound
    async fn delete(&self, id: RecordId) -> AppResult<()>;

    /// 删除该类型的全部记录，返回删除数量
    async fn delete_all(&self) -> AppResult<u64>;
}
