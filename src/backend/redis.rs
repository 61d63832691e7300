//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基于Redis的存储与管道实现。

use crate::backend::{Pipeline, Store};
use crate::config::StoreConfig;
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use secrecy::ExposeSecret;
use tokio::time::{timeout, Duration};
use tracing::{debug, instrument};

/// Redis存储实现
///
/// 单机模式，基于ConnectionManager复用连接。
/// 命令执行不在本层附加超时，阻塞时长由Redis客户端决定。
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// 按配置建立Redis连接
    ///
    /// # 参数
    ///
    /// * `config` - 存储配置
    ///
    /// # 返回值
    ///
    /// 返回新的RedisStore实例或错误
    #[instrument(skip(config), level = "info", name = "connect_store")]
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let connection_string_secret = &config.connection_string;
        let connection_string = if config.enable_tls
            && !connection_string_secret
                .expose_secret()
                .starts_with("rediss://")
        {
            connection_string_secret
                .expose_secret()
                .replace("redis://", "rediss://")
        } else {
            connection_string_secret.expose_secret().to_string()
        };

        let client = Client::open(connection_string.as_str())?;
        let manager = match timeout(
            Duration::from_millis(config.connection_timeout_ms),
            client.get_connection_manager(),
        )
        .await
        {
            Ok(res) => res?,
            Err(_) => {
                return Err(SyncError::Timeout(format!(
                    "Connection timed out after {}ms",
                    config.connection_timeout_ms
                )));
            }
        };
        debug!("RedisStore connected");
        Ok(Self { manager })
    }

    /// 创建绑定到本存储连接的写管道
    pub fn pipeline(&self) -> RedisPipeline {
        RedisPipeline::new(self.manager.clone())
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    /// 单次MGET往返完成批量读取
    async fn get_many(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.manager.clone();
        let mut cmd = redis::cmd("MGET");
        for key in keys {
            cmd.arg(key.as_slice());
        }
        let values: Vec<Option<Vec<u8>>> = cmd.query_async(&mut conn).await?;
        Ok(values)
    }
}

/// Redis写管道
///
/// 封装redis::Pipeline，入队保持FIFO顺序；flush由调用方显式
/// 触发，作为一个批次提交。
pub struct RedisPipeline {
    manager: ConnectionManager,
    pipe: redis::Pipeline,
    pending: usize,
}

impl RedisPipeline {
    fn new(manager: ConnectionManager) -> Self {
        Self {
            manager,
            pipe: redis::pipe(),
            pending: 0,
        }
    }

    /// 将入队的操作作为一个批次提交
    ///
    /// 空管道直接返回。提交失败时错误原样传播，已入队的
    /// 操作被丢弃，部分失败的处置属于调用方。
    pub async fn flush(&mut self) -> Result<()> {
        if self.pending == 0 {
            return Ok(());
        }
        let pipe = std::mem::replace(&mut self.pipe, redis::pipe());
        let count = self.pending;
        self.pending = 0;

        let mut conn = self.manager.clone();
        let _: () = pipe.query_async(&mut conn).await?;
        debug!("flushed {} pipelined operations", count);
        Ok(())
    }
}

impl Pipeline for RedisPipeline {
    fn enqueue_set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.pipe.set(key, value).ignore();
        self.pending += 1;
    }

    fn len(&self) -> usize {
        self.pending
    }
}
