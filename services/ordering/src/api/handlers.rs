//! HTTP 处理函数
//!
//! 对所有资源通用，成功响应体为 JSON 字符串或序列化后的实体

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bistro_errors::{AppError, AppResult};
use bistro_ports::{Patchable, RecordId, Resource};

use super::extract::JsonObject;
use crate::application::ResourceHandler;

pub type HandlerState<R> = State<Arc<ResourceHandler<R>>>;

/// POST /add
pub async fn add<R: Resource>(
    State(handler): HandlerState<R>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<String>)> {
    handler.add(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(format!("You've added a new {}!", R::NAME)),
    ))
}

/// GET /get
pub async fn list<R: Resource>(State(handler): HandlerState<R>) -> AppResult<Json<Vec<R>>> {
    Ok(Json(handler.list().await?))
}

/// GET /get/{id}
///
/// 记录不存在时返回 `null`
pub async fn get_by_id<R: Resource>(
    State(handler): HandlerState<R>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<R>>> {
    let id = parse_id(&id)?;
    Ok(Json(handler.get(id).await?))
}

/// DELETE /delete/{id}
pub async fn delete_by_id<R: Resource>(
    State(handler): HandlerState<R>,
    Path(id): Path<String>,
) -> AppResult<Json<String>> {
    let id = parse_id(&id)?;
    handler.delete(id).await?;
    Ok(Json(format!("The {} has been deleted", R::NAME)))
}

/// PUT|PATCH /update/{id}
pub async fn update<R: Patchable>(
    State(handler): HandlerState<R>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<String>> {
    let id = parse_id(&id)?;
    handler.update(id, body).await?;
    Ok(Json(format!("{} has been updated.", capitalize(R::NAME))))
}

/// DELETE /delete
pub async fn delete_all<R: Resource>(State(handler): HandlerState<R>) -> AppResult<Json<String>> {
    handler.delete_all().await?;
    Ok(Json(format!("All your {}s have been deleted.", R::NAME)))
}

/// 解析路径中的 ID，非整数返回 400
pub fn parse_id(raw: &str) -> AppResult<RecordId> {
    raw.trim()
        .parse::<RecordId>()
        .map_err(|_| AppError::validation(format!("Invalid id '{}'", raw)))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
