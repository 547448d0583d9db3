//! 资源应用服务
//!
//! 组合 校验 → 仓储 的写路径与读路径，每个请求只触达一次存储写入

use std::sync::Arc;

use bistro_errors::{AppError, AppResult};
use bistro_ports::{Patchable, RecordId, Repository, Resource};
use metrics::counter;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::domain::{parse_patch, validate_draft};

/// 资源处理器
pub struct ResourceHandler<R: Resource> {
    repo: Arc<dyn Repository<R>>,
}

impl<R: Resource> ResourceHandler<R> {
    pub fn new(repo: Arc<dyn Repository<R>>) -> Self {
        Self { repo }
    }

    /// 新建资源
    ///
    /// 校验失败时不访问存储
    #[instrument(name = "handler::add", skip_all, fields(resource = R::NAME))]
    pub async fn add(&self, body: Map<String, Value>) -> AppResult<R> {
        let draft = validate_draft::<R>(body).inspect_err(|e| {
            warn!("Rejected {} payload: {}", R::NAME, e);
        })?;

        // 标题允许重复，查询结果只用于观察
        if let Some(existing) = self.repo.find_by_title(R::draft_title(&draft)).await? {
            debug!(existing_id = existing.id(), "Title already present, inserting anyway");
        }

        let entity = self.repo.insert(draft).await?;
        record_write::<R>("insert");
        info!(id = entity.id(), "Created {}", R::NAME);

        Ok(entity)
    }

    /// 查询全部
    pub async fn list(&self) -> AppResult<Vec<R>> {
        self.repo.find_all().await
    }

    /// 按 ID 查询，不存在时返回 `None`
    pub async fn get(&self, id: RecordId) -> AppResult<Option<R>> {
        self.repo.find_by_id(id).await
    }

    /// 按 ID 删除
    #[instrument(name = "handler::delete", skip(self), fields(resource = R::NAME))]
    pub async fn delete(&self, id: RecordId) -> AppResult<()> {
        self.repo.delete(id).await.inspect_err(|e| {
            if matches!(e, AppError::NotFound(_)) {
                warn!("Delete of missing {} {}", R::NAME, id);
            }
        })?;

        record_write::<R>("delete");
        info!("Deleted {} {}", R::NAME, id);
        Ok(())
    }

    /// 删除全部，集合为空时同样成功
    #[instrument(name = "handler::delete_all", skip(self), fields(resource = R::NAME))]
    pub async fn delete_all(&self) -> AppResult<u64> {
        let removed = self.repo.delete_all().await?;
        record_write::<R>("delete_all");
        info!(removed, "Deleted all {} rows", R::TABLE);
        Ok(removed)
    }
}

impl<R: Patchable> ResourceHandler<R> {
    /// 局部更新
    ///
    /// 只覆盖载荷中提供的字段；空载荷是成功的空操作，但记录必须存在
    #[instrument(name = "handler::update", skip(self, body), fields(resource = R::NAME))]
    pub async fn update(&self, id: RecordId, body: Map<String, Value>) -> AppResult<R> {
        let patch = parse_patch::<R>(body)?;

        let mut entity = self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Update of missing {} {}", R::NAME, id);
            AppError::not_found(format!("{} {} not found", R::NAME, id))
        })?;

        if entity.apply_patch(patch) {
            self.repo.update(&entity).await?;
            record_write::<R>("update");
            info!("Updated {} {}", R::NAME, id);
        } else {
            debug!("Empty patch for {} {}, nothing to write", R::NAME, id);
        }

        Ok(entity)
    }
}

fn record_write<R: Resource>(operation: &'static str) {
    counter!("ordering_writes_total", "resource" => R::TABLE, "operation" => operation)
        .increment(1);
}
