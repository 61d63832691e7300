//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了键值存储边界：直接读写的存储接口与
//! 延迟批量写入的管道接口。

pub mod memory;
pub mod redis;

use crate::error::Result;
use async_trait::async_trait;

pub use self::memory::{MemoryPipeline, MemoryStore};
pub use self::redis::{RedisPipeline, RedisStore};

/// 存储接口
///
/// 面向字节的键值存储能力。传输层故障原样向调用方传播，
/// 本层不做重试、包装或超时处理。
#[async_trait]
pub trait Store: Send + Sync {
    /// 读取缓存值
    ///
    /// # 参数
    ///
    /// * `key` - 序列化后的缓存键
    ///
    /// # 返回值
    ///
    /// 键不存在时返回 `None`
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// 写入缓存值
    async fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()>;

    /// 批量读取缓存值
    ///
    /// 返回值与 `keys` 一一对应。默认实现逐键读取，
    /// 支持批量取数的后端应覆盖为单次往返。
    async fn get_many(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.get(key).await?);
        }
        Ok(values)
    }
}

/// 管道接口
///
/// 入队的set操作保持FIFO顺序，flush时机由调用方掌控，
/// 不属于同步层。单个管道句柄假定单写者驱动。
pub trait Pipeline: Send {
    /// 入队一个set操作（延迟执行）
    fn enqueue_set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// 当前已入队未刷出的操作数
    fn len(&self) -> usize;

    /// 是否没有待刷出的操作
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
