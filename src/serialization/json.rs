//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了JSON编解码器的实现。

use super::Codec;
use crate::entity::AttrMap;
use crate::error::{Result, SyncError};

/// JSON编解码器
///
/// 键按UTF-8字节编码，属性表基于serde_json编码
#[derive(Clone)]
pub struct JsonCodec {
    /// 是否启用压缩
    compress: bool,
}

impl JsonCodec {
    /// 创建新的JSON编解码器
    pub fn new() -> Self {
        Self { compress: false }
    }

    /// 创建启用压缩的JSON编解码器
    pub fn with_compression() -> Self {
        Self { compress: true }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonCodec {
    fn key_to_bytes(&self, key: &str) -> Vec<u8> {
        key.as_bytes().to_vec()
    }

    fn key_from_bytes(&self, data: &[u8]) -> Result<String> {
        String::from_utf8(data.to_vec()).map_err(|e| SyncError::Serialization(e.to_string()))
    }

    /// 序列化属性表为JSON字节数组
    ///
    /// # 参数
    ///
    /// * `value` - 要序列化的属性表
    ///
    /// # 返回值
    ///
    /// 返回序列化后的字节数组或错误
    fn value_to_bytes(&self, value: &AttrMap) -> Result<Vec<u8>> {
        let json_bytes =
            serde_json::to_vec(value).map_err(|e| SyncError::Serialization(e.to_string()))?;

        if self.compress {
            // 使用压缩
            #[cfg(feature = "flate2")]
            {
                use flate2::write::GzEncoder;
                use flate2::Compression;
                use std::io::Write;

                let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
                encoder
                    .write_all(&json_bytes)
                    .map_err(|e| SyncError::Serialization(e.to_string()))?;
                encoder
                    .finish()
                    .map_err(|e| SyncError::Serialization(e.to_string()))
            }

            #[cfg(not(feature = "flate2"))]
            {
                // 如果没有启用flate2特性，返回未压缩的数据
                Ok(json_bytes)
            }
        } else {
            Ok(json_bytes)
        }
    }

    /// 从JSON字节数组反序列化属性表
    fn value_from_bytes(&self, data: &[u8]) -> Result<AttrMap> {
        let json_bytes = if self.compress {
            // 解压缩
            #[cfg(feature = "flate2")]
            {
                use flate2::read::GzDecoder;
                use std::io::Read;

                let mut decoder = GzDecoder::new(data);
                let mut decoded = Vec::new();
                decoder
                    .read_to_end(&mut decoded)
                    .map_err(|e| SyncError::Serialization(e.to_string()))?;
                decoded
            }

            #[cfg(not(feature = "flate2"))]
            {
                // 如果没有启用flate2特性，直接使用原始数据
                data.to_vec()
            }
        } else {
            data.to_vec()
        };

        serde_json::from_slice(&json_bytes).map_err(|e| SyncError::Serialization(e.to_string()))
    }
}
