//! In-memory object store / 内存对象存储
//!
//! Stands in for a real bucket in tests. URLs it signs look
//! like S3 query-string presigned URLs but are only checked by this type.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::models::ObjectKey;
use super::ObjectStore;

/// Failure injected into a [`MemoryStore`] / 注入的故障
#[derive(Debug, Clone, Default)]
struct Faults {
    list: Option<String>,
    presign: Option<String>,
}

pub struct MemoryStore {
    base_url: String,
    secret: String,
    /// bucket -> keys in listing order
    buckets: BTreeMap<String, Vec<ObjectKey>>,
    faults: Faults,
}

impl MemoryStore {
    pub fn new(base_url: &str, secret: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret: secret.to_string(),
            buckets: BTreeMap::new(),
            faults: Faults::default(),
        }
    }

    /// Add a bucket with the given keys / 添加存储桶
    pub fn with_bucket<I, S>(mut self, bucket: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ObjectKey>,
    {
        self.buckets
            .insert(bucket.to_string(), keys.into_iter().map(Into::into).collect());
        self
    }

    /// Make every listing call fail with `message` / 列举时返回错误
    pub fn fail_list(mut self, message: &str) -> Self {
        self.faults.list = Some(message.to_string());
        self
    }

    /// Make every signing call fail with `message` / 签名时返回错误
    pub fn fail_presign(mut self, message: &str) -> Self {
        self.faults.presign = Some(message.to_string());
        self
    }

    fn signature(&self, bucket: &str, key: &str, date: &str, expires: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(format!("GET\n/{}/{}\n{}\n{}", bucket, key, date, expires).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check a URL produced by [`ObjectStore::presign_get`] / 校验签名
    pub fn verify(&self, url: &str) -> bool {
        let Some((path, query)) = url
            .strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.split_once('?'))
        else {
            return false;
        };
        let Some((bucket, encoded_key)) = path.split_once('/') else {
            return false;
        };
        let Ok(key) = urlencoding::decode(encoded_key) else {
            return false;
        };

        let param = |name: &str| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        };

        match (param("X-Amz-Date"), param("X-Amz-Expires"), param("X-Amz-Signature")) {
            (Some(date), Some(expires), Some(sig)) => match expires.parse::<u64>() {
                Ok(expires) => self.signature(bucket, &key, &date, expires) == sig,
                Err(_) => false,
            },
            _ => false,
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectKey>> {
        if let Some(message) = &self.faults.list {
            return Err(anyhow!("{}", message));
        }
        self.buckets
            .get(bucket)
            .cloned()
            .ok_or_else(|| anyhow!("The specified bucket does not exist: {}", bucket))
    }

    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String> {
        if let Some(message) = &self.faults.presign {
            return Err(anyhow!("{}", message));
        }
        let date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let expires = ttl.as_secs();
        let signature = self.signature(bucket, key, &date, expires);

        Ok(format!(
            "{}/{}/{}?X-Amz-Date={}&X-Amz-Expires={}&X-Amz-Signature={}",
            self.base_url,
            bucket,
            urlencoding::encode(key),
            date,
            expires,
            signature
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_keeps_order() {
        let store = MemoryStore::new("http://mem", "secret")
            .with_bucket("music", ["b.mp3", "a.mp3", "c/d.ogg"]);
        let keys = store.list_objects("music").await.unwrap();
        assert_eq!(keys, vec!["b.mp3", "a.mp3", "c/d.ogg"]);

        assert!(store.list_objects("video").await.is_err());
    }

    #[tokio::test]
    async fn test_presign_verifies() {
        let store = MemoryStore::new("http://mem/", "secret").with_bucket("music", ["a b.mp3"]);
        let url = store
            .presign_get("music", "a b.mp3", Duration::from_secs(1000))
            .await
            .unwrap();

        assert!(url.starts_with("http://mem/music/a%20b.mp3?"));
        assert!(store.verify(&url));
        assert!(!store.verify(&url.replace("X-Amz-Expires=1000", "X-Amz-Expires=9999")));

        let other = MemoryStore::new("http://mem", "other");
        assert!(!other.verify(&url));
    }

    #[tokio::test]
    async fn test_injected_faults() {
        let store = MemoryStore::new("http://mem", "secret")
            .with_bucket("music", ["a.mp3"])
            .fail_presign("Access Denied");
        assert!(store.list_objects("music").await.is_ok());
        let err = store
            .presign_get("music", "a.mp3", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Access Denied");
    }
}
