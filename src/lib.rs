//! oxsync - 对象缓存同步层
//!
//! 以"类型别名.标识符"为键，把缓存中的属性数据水合进领域对象，
//! 并把对象状态持久化回键值存储，支持管道化的批量写入。

#![doc(html_root_url = "https://docs.rs/oxsync/0.1.0")]

pub use serde;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;

pub mod backend;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod key;
pub mod metrics;
pub mod serialization;
pub mod sync;
pub mod target;

// Re-export commonly used items
pub use client::SyncedStore;
pub use config::Config;
pub use entity::{AttrMap, AttrValue, CacheEntity};
pub use error::{Result, SyncError};
pub use sync::{SyncContext, WriteDispatch};
pub use target::Target;

/// oxsync 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
