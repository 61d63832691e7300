//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了同步层的错误类型和处理机制。

use thiserror::Error;

/// 同步层错误类型枚举
///
/// 数据形态问题（空别名、空标识符、空属性表）不属于错误，
/// 同步操作对其静默跳过；此处只描述基础设施类故障。
#[derive(Error, Debug)]
pub enum SyncError {
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 存储后端操作失败
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Redis错误
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    /// IO错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 超时错误
    #[error("Timeout error: {0}")]
    Timeout(String),
}

/// 同步操作结果类型别名
///
/// 简化错误处理，所有同步操作都返回此类型
pub type Result<T> = std::result::Result<T, SyncError>;
