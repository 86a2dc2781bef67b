//! Playlist and signing logic shared by the HTTP handlers / 播放列表与签名逻辑

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::models::PlaylistEntry;
use crate::storage::{ObjectStore, PRESIGN_EXPIRY};

/// Media library bound to one bucket / 绑定单个存储桶的媒体库
#[derive(Clone)]
pub struct MediaLibrary {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    expiry: Duration,
}

impl MediaLibrary {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            expiry: PRESIGN_EXPIRY,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Build the playlist for the player / 生成播放列表
    ///
    /// Only the first entry is signed up front; the player asks for the rest
    /// when it gets to them. Any failure discards the whole list.
    pub async fn playlist(&self) -> Result<Vec<PlaylistEntry>> {
        let keys = self.store.list_objects(&self.bucket).await?;

        let mut entries: Vec<PlaylistEntry> = keys.into_iter().map(PlaylistEntry::new).collect();

        if let Some(first) = entries.first_mut() {
            let url = self.presign(&first.key).await?;
            first.url = Some(url);
        }

        Ok(entries)
    }

    /// Presigned GET URL for one object / 生成单个对象的预签名URL
    pub async fn presign(&self, key: &str) -> Result<String> {
        self.store.presign_get(&self.bucket, key, self.expiry).await
    }
}
