//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了面向调用方的同步客户端：把存储、编解码器
//! 和同步操作组合成一个句柄。

use crate::backend::{Pipeline, RedisStore, Store};
use crate::config::Config;
use crate::entity::CacheEntity;
use crate::error::Result;
use crate::serialization::CodecEnum;
use crate::sync::{self, SyncContext, WriteDispatch};
use crate::target::Target;
use tracing::instrument;

/// 同步客户端
///
/// 持有存储与编解码器，按调用构造操作上下文。
/// 不同客户端实例之间无共享可变状态，可并发使用。
pub struct SyncedStore<S: Store> {
    store: S,
    codec: CodecEnum,
}

impl SyncedStore<RedisStore> {
    /// 按配置连接Redis并构造客户端
    pub async fn connect(config: &Config) -> Result<Self> {
        let store = RedisStore::connect(&config.store).await?;
        Ok(Self::new(store, config.codec()))
    }
}

impl<S: Store> SyncedStore<S> {
    /// 由存储与编解码器构造客户端
    pub fn new(store: S, codec: CodecEnum) -> Self {
        Self { store, codec }
    }

    /// 底层存储句柄
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 编解码器
    pub fn codec(&self) -> &CodecEnum {
        &self.codec
    }

    /// 读同步：取回缓存属性并条件合并进目标
    ///
    /// # 参数
    ///
    /// * `alias` - 类型别名
    /// * `id_attr` - 标识符属性名
    /// * `filter_attrs` - 限定合并的属性列表，空表示全部
    /// * `target` - 单个或集合目标（可变借用）
    #[instrument(skip(self, target), level = "debug")]
    pub async fn select<T: CacheEntity>(
        &self,
        alias: &str,
        id_attr: &str,
        filter_attrs: &[&str],
        target: Target<&mut T>,
    ) -> Result<()> {
        let ctx = SyncContext::new(alias, id_attr, &self.codec).with_filter(filter_attrs);
        sync::select(&self.store, &ctx, target).await
    }

    /// 写同步：立即写入存储
    #[instrument(skip(self, target), level = "debug")]
    pub async fn add_object<T: CacheEntity>(
        &self,
        alias: &str,
        id_attr: &str,
        target: Target<&T>,
    ) -> Result<()> {
        let ctx = SyncContext::new(alias, id_attr, &self.codec);
        let mut dispatch = WriteDispatch::Direct(&self.store);
        sync::add_object(&mut dispatch, &ctx, target).await
    }

    /// 写同步：入队到管道，由调用方在外部flush
    #[instrument(skip(self, pipeline, target), level = "debug")]
    pub async fn add_object_pipelined<T: CacheEntity>(
        &self,
        pipeline: &mut dyn Pipeline,
        alias: &str,
        id_attr: &str,
        target: Target<&T>,
    ) -> Result<()> {
        let ctx = SyncContext::new(alias, id_attr, &self.codec);
        let mut dispatch = WriteDispatch::Pipelined(pipeline);
        sync::add_object(&mut dispatch, &ctx, target).await
    }
}
