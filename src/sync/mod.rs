//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了对象缓存同步的核心：操作上下文、写派发方式，
//! 以及读（select）写（add_object）两个同步器。

pub mod read;
pub mod write;

use crate::backend::{Pipeline, Store};
use crate::key::KEY_SEPARATOR;
use crate::serialization::Codec;

pub use read::select;
pub use write::{add_object, set_store_data};

/// 操作上下文
///
/// 一次逻辑同步操作的不可变参数记录：类型别名、标识符属性名、
/// 可选的读取属性过滤列表、编解码器。按操作创建，用后即弃，
/// 不跨调用保有身份。
pub struct SyncContext<'a> {
    /// 类型别名，作为键的命名空间前缀
    pub alias: &'a str,
    /// 标识符属性名
    pub id_attr: &'a str,
    /// 读取时限定取回/合并的属性列表，空表示全部
    pub filter_attrs: &'a [&'a str],
    /// 编解码器
    pub codec: &'a dyn Codec,
}

impl<'a> SyncContext<'a> {
    /// 创建无过滤的操作上下文
    pub fn new(alias: &'a str, id_attr: &'a str, codec: &'a dyn Codec) -> Self {
        Self {
            alias,
            id_attr,
            filter_attrs: &[],
            codec,
        }
    }

    /// 附加读取属性过滤列表
    pub fn with_filter(mut self, filter_attrs: &'a [&'a str]) -> Self {
        self.filter_attrs = filter_attrs;
        self
    }

    /// 合并用的键前缀 `"{alias}."`
    pub(crate) fn key_prefix(&self) -> String {
        format!("{}{}", self.alias, KEY_SEPARATOR)
    }
}

/// 写派发方式
///
/// 携带管道句柄时写操作只入队（延迟生效），否则立即写入存储。
pub enum WriteDispatch<'a> {
    /// 立即写入存储
    Direct(&'a dyn Store),
    /// 入队到管道，由调用方在外部flush
    Pipelined(&'a mut dyn Pipeline),
}
