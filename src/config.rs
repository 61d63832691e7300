//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了同步层的配置结构和解析逻辑。

use crate::error::{Result, SyncError};
use crate::serialization::{CodecEnum, JsonCodec};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_VERSION: u32 = 1;

/// 同步层配置
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub config_version: Option<u32>,
    /// 编解码方式
    #[serde(default)]
    pub serialization: SerializationType,
    /// 存储配置
    #[serde(default)]
    pub store: StoreConfig,
}

/// 编解码类型枚举
#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SerializationType {
    /// JSON编解码
    #[default]
    Json,
    /// JSON编解码 + gzip压缩
    JsonGzip,
}

/// 存储配置
///
/// 定义底层键值存储的连接参数
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// 连接字符串
    pub connection_string: SecretString,
    /// 建立连接的超时（毫秒）
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
    /// 是否启用TLS
    #[serde(default)]
    pub enable_tls: bool,
}

fn default_connection_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_string: SecretString::from("redis://127.0.0.1:6379".to_string()),
            connection_timeout_ms: default_connection_timeout_ms(),
            enable_tls: false,
        }
    }
}

impl Config {
    /// 从TOML文件加载配置
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 返回解析并校验后的配置或错误
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| SyncError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if let Some(version) = self.config_version {
            if version != CONFIG_VERSION {
                return Err(SyncError::Configuration(format!(
                    "Unsupported config version: {}",
                    version
                )));
            }
        }
        if self.store.connection_string.expose_secret().is_empty() {
            return Err(SyncError::Configuration(
                "Store connection string must not be empty".to_string(),
            ));
        }
        if self.store.connection_timeout_ms == 0 {
            return Err(SyncError::Configuration(
                "connection_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// 按配置构造编解码器
    pub fn codec(&self) -> CodecEnum {
        match self.serialization {
            SerializationType::Json => CodecEnum::Json(JsonCodec::new()),
            SerializationType::JsonGzip => CodecEnum::Json(JsonCodec::with_compression()),
        }
    }
}
