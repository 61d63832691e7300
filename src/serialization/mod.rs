//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存键与属性表的编解码机制。

pub mod json;

use crate::entity::AttrMap;
use crate::error::Result;

pub use json::JsonCodec;

/// 编解码器特征
///
/// 定义键与属性表到二进制形式的双向转换接口。
/// 对任意键 `k` 与属性表 `m`，要求
/// `key_from_bytes(key_to_bytes(k)) == k` 且
/// `value_from_bytes(value_to_bytes(m)) == m`。
pub trait Codec: Send + Sync {
    /// 序列化缓存键
    fn key_to_bytes(&self, key: &str) -> Vec<u8>;

    /// 反序列化缓存键
    fn key_from_bytes(&self, data: &[u8]) -> Result<String>;

    /// 序列化属性表
    fn value_to_bytes(&self, value: &AttrMap) -> Result<Vec<u8>>;

    /// 反序列化属性表
    fn value_from_bytes(&self, data: &[u8]) -> Result<AttrMap>;
}

/// 编解码器枚举
///
/// 配置驱动的具体编解码器选择
#[derive(Clone)]
pub enum CodecEnum {
    Json(JsonCodec),
}

impl Codec for CodecEnum {
    fn key_to_bytes(&self, key: &str) -> Vec<u8> {
        match self {
            CodecEnum::Json(c) => c.key_to_bytes(key),
        }
    }

    fn key_from_bytes(&self, data: &[u8]) -> Result<String> {
        match self {
            CodecEnum::Json(c) => c.key_from_bytes(data),
        }
    }

    fn value_to_bytes(&self, value: &AttrMap) -> Result<Vec<u8>> {
        match self {
            CodecEnum::Json(c) => c.value_to_bytes(value),
        }
    }

    fn value_from_bytes(&self, data: &[u8]) -> Result<AttrMap> {
        match self {
            CodecEnum::Json(c) => c.value_from_bytes(data),
        }
    }
}
