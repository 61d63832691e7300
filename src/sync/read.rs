//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了读同步器：按缓存键批量取回属性表，
//! 并将其条件合并进目标对象。

use super::SyncContext;
use crate::backend::Store;
use crate::entity::{AttrMap, CacheEntity};
use crate::error::Result;
use crate::key::{compose_key, render_id};
use crate::metrics::GLOBAL_METRICS;
use crate::target::Target;
use tracing::{debug, warn};

/// 读同步（select）
///
/// 逐个解析目标：读取标识符属性、拼接缓存键，然后对全部
/// 已解析的键执行一次批量取数，再按过滤列表裁剪并条件合并
/// 进各自的目标对象。标识符缺失的目标静默跳过并计数；
/// 缓存未命中不合并任何属性，也不报错。
///
/// # 参数
///
/// * `store` - 存储句柄
/// * `ctx` - 操作上下文
/// * `target` - 单个或集合目标（可变借用）
pub async fn select<T: CacheEntity>(
    store: &dyn Store,
    ctx: &SyncContext<'_>,
    target: Target<&mut T>,
) -> Result<()> {
    let mut resolved: Vec<(&mut T, Vec<u8>)> = Vec::new();

    for item in target {
        let id = match item.attr(ctx.id_attr) {
            Some(value) if !value.is_null() => value,
            _ => {
                GLOBAL_METRICS.record_skip(ctx.alias, "select", "null_id");
                debug!(
                    alias = ctx.alias,
                    id_attr = ctx.id_attr,
                    "skip select: identifier attribute is null"
                );
                continue;
            }
        };
        if render_id(&id).is_empty() {
            GLOBAL_METRICS.record_skip(ctx.alias, "select", "empty_id_render");
            warn!(alias = ctx.alias, "identifier renders empty, degenerate cache key");
        }
        let key = compose_key(ctx.alias, &id);
        resolved.push((item, ctx.codec.key_to_bytes(&key)));
    }

    if resolved.is_empty() {
        return Ok(());
    }

    // 一次批量往返取回全部键，合并语义仍然按目标逐个进行
    let keys: Vec<Vec<u8>> = resolved.iter().map(|(_, key)| key.clone()).collect();
    let fetched = store.get_many(&keys).await?;

    let prefix = ctx.key_prefix();
    for ((item, _), raw) in resolved.into_iter().zip(fetched) {
        let raw = match raw {
            Some(raw) => raw,
            None => {
                GLOBAL_METRICS.record_op(ctx.alias, "select", "miss");
                continue;
            }
        };
        let cached = ctx.codec.value_from_bytes(&raw)?;
        let cached = restrict(cached, ctx.filter_attrs);
        item.merge_cached(&cached, &prefix);
        GLOBAL_METRICS.record_op(ctx.alias, "select", "hit");
    }
    Ok(())
}

/// 按过滤列表裁剪取回的属性表，空列表表示全部保留
fn restrict(cached: AttrMap, filter_attrs: &[&str]) -> AttrMap {
    if filter_attrs.is_empty() {
        return cached;
    }
    let mut restricted = AttrMap::new();
    for name in filter_attrs {
        if let Some(value) = cached.get(*name) {
            restricted.insert((*name).to_string(), value.clone());
        }
    }
    restricted
}
