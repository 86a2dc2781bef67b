use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embed player static files (compile-time embed from web/) / 嵌入播放器静态文件
#[derive(RustEmbed)]
#[folder = "web/"]
pub struct PlayerAssets;

fn asset_response(content_type: &str, data: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type.to_string())], Body::from(data)).into_response()
}

/// Handle embedded static file requests / 处理嵌入的静态文件请求
pub async fn serve_embedded_file(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(content) = PlayerAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return asset_response(mime.as_ref(), content.data.into_owned());
    }

    // 文件不存在时返回index.html
    if let Some(content) = PlayerAssets::get("index.html") {
        return asset_response("text/html; charset=utf-8", content.data.into_owned());
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
