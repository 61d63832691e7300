//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了进程内存储实现，供测试以及无外部依赖的
//! 场景使用；get/set调用次数可观测，便于验证守卫行为。

use crate::backend::{Pipeline, Store};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// 进程内存储
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<Vec<u8>, Vec<u8>>>>,
    get_calls: Arc<AtomicU64>,
    set_calls: Arc<AtomicU64>,
}

impl MemoryStore {
    /// 创建空的进程内存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建绑定到本存储的写管道
    pub fn pipeline(&self) -> MemoryPipeline {
        MemoryPipeline {
            store: self.clone(),
            queue: Vec::new(),
        }
    }

    /// 当前存储的键数量
    pub fn entry_count(&self) -> usize {
        self.data.read().unwrap().len()
    }

    /// get（含批量）被调用的键次数
    pub fn get_calls(&self) -> u64 {
        self.get_calls.load(Ordering::Relaxed)
    }

    /// set被调用的次数
    pub fn set_calls(&self) -> u64 {
        self.set_calls.load(Ordering::Relaxed)
    }

    /// 直接读取原始值，供测试断言最终状态
    pub fn raw(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.read().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::Relaxed);
        self.data.write().unwrap().insert(key.to_vec(), value);
        Ok(())
    }

    async fn get_many(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>> {
        self.get_calls.fetch_add(keys.len() as u64, Ordering::Relaxed);
        let data = self.data.read().unwrap();
        Ok(keys.iter().map(|key| data.get(key).cloned()).collect())
    }
}

/// 进程内写管道
///
/// 入队保持FIFO顺序，`flush_into_store`把整个批次按序应用。
pub struct MemoryPipeline {
    store: MemoryStore,
    queue: Vec<(Vec<u8>, Vec<u8>)>,
}

impl MemoryPipeline {
    /// 按入队顺序将批次应用到存储
    pub async fn flush_into_store(&mut self) -> Result<()> {
        for (key, value) in self.queue.drain(..) {
            self.store.set_calls.fetch_add(1, Ordering::Relaxed);
            self.store.data.write().unwrap().insert(key, value);
        }
        Ok(())
    }
}

impl Pipeline for MemoryPipeline {
    fn enqueue_set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.queue.push((key, value));
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
