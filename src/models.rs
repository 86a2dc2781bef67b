use serde::Serialize;

/// Playlist entry sent to the browser player / 播放列表条目
///
/// Field names match what the player script expects (`Key`, `URL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    #[serde(rename = "Key")]
    pub key: String,
    /// Presigned URL, only set for the first entry / 预签名URL，仅第一个条目携带
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PlaylistEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.url = Some(url);
        self
    }
}

/// Object key within a bucket / 存储桶内的对象键
pub type ObjectKey = String;
