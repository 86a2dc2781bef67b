use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::{ApiError, ApiResult};
use crate::models::PlaylistEntry;
use crate::state::AppState;

/// Query parameter names carrying the object key, in priority order / 对象名参数（按优先级）
pub const OBJECT_NAME_PARAMS: &[&str] = &["objname", "objName"];

/// Presign query as raw pairs; parameters may repeat / 预签名查询参数（允许重复）
#[derive(Debug, Default)]
pub struct PresignQuery {
    pairs: Vec<(String, String)>,
}

impl PresignQuery {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First non-empty `objname`, else first non-empty `objName` / 第一个非空的对象名
    pub fn object_name(&self) -> Option<&str> {
        OBJECT_NAME_PARAMS.iter().find_map(|param| {
            self.pairs
                .iter()
                .find(|(k, v)| k.as_str() == *param && !v.is_empty())
                .map(|(_, v)| v.as_str())
        })
    }
}

/// GET /list - 获取播放列表（第一个条目附带预签名URL）
pub async fn list_objects(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PlaylistEntry>>> {
    let entries = state.library.playlist().await?;
    tracing::debug!("list_objects: {} entries from bucket {}", entries.len(), state.library.bucket());
    Ok(Json(entries))
}

/// GET /getpresign?objname= - 获取单个对象的预签名URL
pub async fn get_presigned_url(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<String> {
    let query = PresignQuery::new(pairs);
    let object_name = query.object_name().ok_or(ApiError::MissingObjectName)?;

    let url = state.library.presign(object_name).await?;
    tracing::debug!("get_presigned_url: {}", url);
    Ok(url)
}
