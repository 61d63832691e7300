//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了同步层的指标收集，核心是把静默跳过策略
//! 变成可观测的计数，避免错配的写入被无声丢弃。

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 指标收集器
///
/// 收集同步层的跳过与派发计数
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    /// 跳过计数
    /// key: "alias:op:reason"
    pub skips_total: Arc<Mutex<HashMap<String, u64>>>,
    /// 操作计数
    /// key: "alias:op:outcome"（outcome: direct/pipelined/hit/miss）
    pub ops_total: Arc<Mutex<HashMap<String, u64>>>,
}

lazy_static! {
    /// 全局指标实例
    pub static ref GLOBAL_METRICS: Metrics = Metrics::default();
}

impl Metrics {
    /// 记录一次静默跳过
    ///
    /// # 参数
    ///
    /// * `alias` - 类型别名（空白别名记为 "-"）
    /// * `op` - 操作类型（select/add）
    /// * `reason` - 跳过原因（null_id/blank_alias/empty_map/no_map/empty_id_render）
    pub fn record_skip(&self, alias: &str, op: &str, reason: &str) {
        let alias = if alias.trim().is_empty() { "-" } else { alias };
        let key = format!("{}:{}:{}", alias, op, reason);
        let mut map = self.skips_total.lock().unwrap();
        *map.entry(key).or_insert(0) += 1;
    }

    /// 记录一次同步操作结果
    pub fn record_op(&self, alias: &str, op: &str, outcome: &str) {
        let key = format!("{}:{}:{}", alias, op, outcome);
        let mut map = self.ops_total.lock().unwrap();
        *map.entry(key).or_insert(0) += 1;
    }

    /// 读取某个跳过计数，主要供测试断言使用
    pub fn skip_count(&self, alias: &str, op: &str, reason: &str) -> u64 {
        let key = format!("{}:{}:{}", alias, op, reason);
        let map = self.skips_total.lock().unwrap();
        map.get(&key).copied().unwrap_or(0)
    }
}

/// 获取指标字符串
///
/// 将所有指标格式化为字符串返回，用于监控系统采集
pub fn get_metrics_string() -> String {
    let metrics = &GLOBAL_METRICS;
    let skips = metrics.skips_total.lock().unwrap();
    let ops = metrics.ops_total.lock().unwrap();

    let mut output = String::new();
    for (k, v) in skips.iter() {
        output.push_str(&format!("sync_skips_total{{labels=\"{}\"}} {}\n", k, v));
    }
    for (k, v) in ops.iter() {
        output.push_str(&format!("sync_ops_total{{labels=\"{}\"}} {}\n", k, v));
    }
    output
}
