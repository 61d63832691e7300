//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了领域类型接入同步层的能力接口：属性读取、
//! 对象转属性表、以及条件合并。

use serde::Serialize;

/// 属性值
pub type AttrValue = serde_json::Value;

/// 属性表
///
/// 属性名到属性值的映射，键唯一，顺序无关紧要。
/// 写路径上表示待持久化的对象字段，读路径上表示取回的缓存字段。
pub type AttrMap = serde_json::Map<String, AttrValue>;

/// 可缓存实体特征
///
/// 领域类型按类型显式实现的接入能力，取代运行时反射：
/// 暴露"读属性"、"转属性表"、"条件合并"三个操作。
pub trait CacheEntity {
    /// 读取单个属性值
    ///
    /// 标识符属性解析为 `None` 或 JSON null 时视为标识符缺失。
    fn attr(&self, name: &str) -> Option<AttrValue>;

    /// 将对象转换为属性表
    ///
    /// 形态不受支持时返回 `None` 或空表，不允许失败。
    fn to_attr_map(&self) -> Option<AttrMap>;

    /// 将取回的缓存属性表合并进对象
    ///
    /// 只允许填充对象尚未持有有效值的属性，绝不覆盖调用方已
    /// 设置的状态。`key_prefix` 为 `"{alias}."`，实现可用它给
    /// 来自缓存的属性做命名空间标记，也可以忽略。
    fn merge_cached(&mut self, cached: &AttrMap, key_prefix: &str);
}

/// 条件合并
///
/// 属性表载体的默认合并策略：只填充目标中缺失或为 null 的属性，
/// 已存在的有效值保持不变。
pub fn conditional_merge(target: &mut AttrMap, cached: &AttrMap) {
    for (name, value) in cached {
        let absent = matches!(target.get(name), None | Some(AttrValue::Null));
        if absent {
            target.insert(name.clone(), value.clone());
        }
    }
}

/// 将任意可序列化值转换为属性表
///
/// 序列化结果不是JSON对象（或序列化失败）时返回 `None`，
/// 供 [`CacheEntity::to_attr_map`] 的实现使用。
pub fn attr_map_of<T: Serialize>(value: &T) -> Option<AttrMap> {
    match serde_json::to_value(value) {
        Ok(AttrValue::Object(map)) => Some(map),
        _ => None,
    }
}

impl CacheEntity for AttrMap {
    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.get(name).cloned()
    }

    fn to_attr_map(&self) -> Option<AttrMap> {
        if self.is_empty() {
            None
        } else {
            Some(self.clone())
        }
    }

    fn merge_cached(&mut self, cached: &AttrMap, _key_prefix: &str) {
        conditional_merge(self, cached);
    }
}
