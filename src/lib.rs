pub mod api;
pub mod config;
pub mod models;
pub mod player;
pub mod state;
pub mod storage;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the HTTP router / 构建路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::server::health_check))
        // 播放器初始化时调用
        .route("/list", get(api::media::list_objects))
        .route("/list/v1", get(api::media::list_objects))
        // 播放到某个对象时获取其预签名URL
        .route("/getpresign", get(api::media::get_presigned_url))
        .route("/getpresign/v1", get(api::media::get_presigned_url))
        // Embedded player static files
        .fallback(api::assets::serve_embedded_file)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
