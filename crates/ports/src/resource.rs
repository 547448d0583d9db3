//! 资源契约
//!
//! 每种持久化实体共享同一套 CRUD 形态：字段声明、草稿（新建载荷）、局部更新。

use serde::{de::DeserializeOwned, Serialize};

/// 记录主键（由存储生成）
pub type RecordId = i32;

/// 可持久化资源
///
/// `Serialize` 的输出即响应结构：按声明顺序输出 `id` 与全部公开字段。
pub trait Resource: Serialize + Clone + Send + Sync + 'static {
    /// 新建载荷，包含除 `id` 外的全部字段
    type Draft: DeserializeOwned + Clone + Send + Sync + 'static;

    /// 资源名称，用于响应消息与日志
    const NAME: &'static str;

    /// 表名
    const TABLE: &'static str;

    /// 字段声明顺序（不含 `id`），同时也是必填字段的校验顺序
    const FIELDS: &'static [&'static str];

    fn id(&self) -> RecordId;

    fn title(&self) -> &str;

    /// 草稿中的标题
    fn draft_title(draft: &Self::Draft) -> &str;

    /// 由存储分配的 id 与草稿构造实体
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// 草稿的字段约束，违反时返回错误描述
    fn check_draft(_draft: &Self::Draft) -> Result<(), String> {
        Ok(())
    }
}

/// 支持局部更新的资源
pub trait Patchable: Resource {
    /// 局部更新载荷，缺省字段与 `null` 都表示不修改
    type Patch: DeserializeOwned + Default + Send + Sync + 'static;

    /// 应用局部更新，返回是否有字段被覆盖
    fn apply_patch(&mut self, patch: Self::Patch) -> bool;

    /// 局部更新的字段约束
    fn check_patch(_patch: &Self::Patch) -> Result<(), String> {
        Ok(())
    }
}
