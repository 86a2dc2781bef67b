//! Application configuration module / 应用配置模块
//!
//! Flags are parsed once with clap, credentials are resolved from the
//! environment, and the result is frozen into an [`AppConfig`] that is shared
//! read-only by every request handler.
//! 启动时解析一次，之后只读。

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

/// Access key environment variables, in priority order / 访问密钥环境变量（按优先级）
pub const ACCESS_KEY_ENVS: &[&str] = &["ACCESS_KEY", "AWS_ACCESS_KEY", "AWS_ACCESS_KEY_ID"];

/// Secret key environment variables, in priority order / 私有密钥环境变量（按优先级）
pub const SECRET_KEY_ENVS: &[&str] = &["SECRET_KEY", "AWS_SECRET_KEY", "AWS_SECRET_ACCESS_KEY"];

/// Session token for temporary credentials / 临时凭证会话令牌
pub const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

/// Command line flags / 命令行参数
#[derive(Debug, Clone, Parser)]
#[command(name = "media-player")]
#[command(author, version, about = "Browser media player backed by an S3-compatible bucket", long_about = None)]
pub struct Cli {
    /// Bucket name for operations on the object storage
    #[arg(short = 'b', long = "bucket", default_value = "")]
    pub bucket: String,

    /// Object storage endpoint, defaults to amazon s3
    #[arg(short = 'e', long = "endpoint", default_value = "s3.amazonaws.com")]
    pub endpoint: String,

    /// Use plain http instead of https
    #[arg(short = 'i', long = "insecure")]
    pub insecure: bool,

    /// HTTP listen address
    #[arg(long = "http", default_value = ":8080")]
    pub http: String,

    /// Signing region
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Force path-style bucket addressing (implied for non-AWS endpoints)
    #[arg(long)]
    pub path_style: bool,
}

/// Configuration errors, all fatal at startup / 配置错误（启动时致命）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Bucket name cannot be empty.")]
    MissingBucket,

    #[error("Env variable '{}' not set", ACCESS_KEY_ENVS.join(", "))]
    MissingAccessKey,

    #[error("Env variable '{}' not set", SECRET_KEY_ENVS.join(", "))]
    MissingSecretKey,

    #[error("Invalid listen address: {0}")]
    InvalidListenAddress(String),
}

/// Object storage connection settings / 对象存储连接配置
#[derive(Debug, Clone, Serialize)]
pub struct StorageConfig {
    /// Endpoint host, optionally with scheme / 端点地址
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    #[serde(skip_serializing)]
    pub access_key: String,
    #[serde(skip_serializing)]
    pub secret_key: String,
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    /// true for http only / 仅使用http
    pub insecure: bool,
    pub path_style: bool,
}

impl StorageConfig {
    /// Endpoint URL with scheme / 带协议的端点URL
    ///
    /// An endpoint that already names its scheme is kept verbatim.
    pub fn endpoint_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        let scheme = if self.insecure { "http" } else { "https" };
        format!("{}://{}", scheme, endpoint)
    }

    /// Whether requests should use path-style addressing / 是否使用路径风格
    ///
    /// Amazon endpoints use virtual hosts; everything else (MinIO and friends)
    /// gets path style.
    pub fn use_path_style(&self) -> bool {
        self.path_style || !self.endpoint.contains("amazonaws.com")
    }
}

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// Server bind address / 服务器绑定地址
    pub listen: String,
}

impl AppConfig {
    /// Build configuration from parsed flags and the process environment / 从参数和环境变量构建配置
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Build configuration using `lookup` for environment variables / 使用自定义查找函数构建配置
    pub fn resolve<F>(cli: Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if cli.bucket.trim().is_empty() {
            return Err(ConfigError::MissingBucket);
        }

        let access_key = first_non_empty(ACCESS_KEY_ENVS, &lookup).ok_or(ConfigError::MissingAccessKey)?;
        let secret_key = first_non_empty(SECRET_KEY_ENVS, &lookup).ok_or(ConfigError::MissingSecretKey)?;
        let session_token = lookup(SESSION_TOKEN_ENV).filter(|v| !v.is_empty());

        let listen = normalize_listen_address(&cli.http)?;

        Ok(Self {
            storage: StorageConfig {
                endpoint: cli.endpoint,
                region: cli.region,
                bucket: cli.bucket.trim().to_string(),
                access_key,
                secret_key,
                session_token,
                insecure: cli.insecure,
                path_style: cli.path_style,
            },
            listen,
        })
    }

    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> &str {
        &self.listen
    }
}

/// First non-empty value among `names` / 按顺序返回第一个非空的环境变量值
pub fn first_non_empty<F>(names: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.is_empty())
}

/// Turn `:8080` into `0.0.0.0:8080` / 补全监听地址
pub fn normalize_listen_address(addr: &str) -> Result<String, ConfigError> {
    let addr = addr.trim();
    let full = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };

    match full.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(full),
        _ => Err(ConfigError::InvalidListenAddress(addr.to_string())),
    }
}
