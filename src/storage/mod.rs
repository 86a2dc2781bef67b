use async_trait::async_trait;
use anyhow::Result;
use std::time::Duration;

use crate::models::ObjectKey;

pub mod memory;
pub mod s3;

pub use self::memory::MemoryStore;
pub use self::s3::S3Store;

/// Fixed lifetime of every presigned URL handed to the player / 预签名URL有效期
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(1000);

/// Object storage interface (only the two primitives the player needs) / 对象存储接口
///
/// Implementations must not cache: every call goes to the backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name, used in logs / 后端名称
    fn name(&self) -> &str;

    /// List every object key in `bucket`, recursively, in listing order / 递归列出所有对象
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectKey>>;

    /// Presigned GET URL for `key`, valid for `ttl` / 生成预签名下载URL
    ///
    /// Signing does not check that the object exists.
    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String>;
}
