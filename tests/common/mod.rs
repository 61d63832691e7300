//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了测试的通用工具函数和测试替身。

use async_trait::async_trait;
use oxsync::backend::Store;
use oxsync::entity::attr_map_of;
use oxsync::error::{Result, SyncError};
use oxsync::{AttrMap, AttrValue, CacheEntity};
use serde::Serialize;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn setup_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .try_init()
            .ok();
    });
}

/// 测试用领域对象
///
/// 字段全部可缺失，便于覆盖标识符缺失与条件合并的各种分支
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[allow(dead_code)]
impl TestUser {
    pub fn with_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn full(id: u64, name: &str, email: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }
    }
}

impl CacheEntity for TestUser {
    fn attr(&self, name: &str) -> Option<AttrValue> {
        match name {
            "id" => self.id.map(AttrValue::from),
            "name" => self.name.clone().map(AttrValue::from),
            "email" => self.email.clone().map(AttrValue::from),
            _ => None,
        }
    }

    fn to_attr_map(&self) -> Option<AttrMap> {
        attr_map_of(self)
    }

    fn merge_cached(&mut self, cached: &AttrMap, _key_prefix: &str) {
        // 只填充尚未持有值的字段，绝不覆盖既有状态
        if self.name.is_none() {
            if let Some(name) = cached.get("name").and_then(AttrValue::as_str) {
                self.name = Some(name.to_string());
            }
        }
        if self.email.is_none() {
            if let Some(email) = cached.get("email").and_then(AttrValue::as_str) {
                self.email = Some(email.to_string());
            }
        }
    }
}

/// 故障存储替身，任何操作都以后端错误拒绝
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>> {
        Err(SyncError::BackendError("simulated outage".to_string()))
    }

    async fn set(&self, _key: &[u8], _value: Vec<u8>) -> Result<()> {
        Err(SyncError::BackendError("simulated outage".to_string()))
    }
}
