//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了写同步器：对象转属性表、标识符解析、
//! 序列化后立即写入或入队管道。

use super::{SyncContext, WriteDispatch};
use crate::entity::{AttrMap, AttrValue, CacheEntity};
use crate::error::Result;
use crate::key::{compose_key, is_blank, render_id};
use crate::metrics::GLOBAL_METRICS;
use crate::target::Target;
use tracing::{debug, warn};

/// 写同步（add_object）
///
/// 逐个解析目标：转属性表、从表中按标识符属性名取出标识符，
/// 交给 [`set_store_data`] 派发。转换得不到属性表的目标静默
/// 跳过并计数。
///
/// # 参数
///
/// * `dispatch` - 写派发方式（立即或管道）
/// * `ctx` - 操作上下文
/// * `target` - 单个或集合目标
pub async fn add_object<T: CacheEntity>(
    dispatch: &mut WriteDispatch<'_>,
    ctx: &SyncContext<'_>,
    target: Target<&T>,
) -> Result<()> {
    for item in target {
        let map = match item.to_attr_map() {
            Some(map) if !map.is_empty() => map,
            _ => {
                GLOBAL_METRICS.record_skip(ctx.alias, "add", "no_map");
                debug!(alias = ctx.alias, "skip add: item yields no attribute map");
                continue;
            }
        };
        let id = map.get(ctx.id_attr).cloned();
        set_store_data(dispatch, ctx, &map, id.as_ref()).await?;
    }
    Ok(())
}

/// 写入一份属性表
///
/// 别名空白、属性表为空或标识符缺失时整体不产生任何变更
/// （无操作而非错误），并记录跳过计数。其余情况序列化键值后
/// 按派发方式写出；传输层故障原样传播。对同一键重复写入相同
/// 内容遵循最后写入者生效，无可观测差异。
pub async fn set_store_data(
    dispatch: &mut WriteDispatch<'_>,
    ctx: &SyncContext<'_>,
    map: &AttrMap,
    id: Option<&AttrValue>,
) -> Result<()> {
    if is_blank(ctx.alias) {
        GLOBAL_METRICS.record_skip(ctx.alias, "add", "blank_alias");
        debug!("skip add: blank alias");
        return Ok(());
    }
    if map.is_empty() {
        GLOBAL_METRICS.record_skip(ctx.alias, "add", "empty_map");
        debug!(alias = ctx.alias, "skip add: empty attribute map");
        return Ok(());
    }
    let id = match id {
        Some(value) if !value.is_null() => value,
        _ => {
            GLOBAL_METRICS.record_skip(ctx.alias, "add", "null_id");
            debug!(
                alias = ctx.alias,
                id_attr = ctx.id_attr,
                "skip add: identifier is null"
            );
            return Ok(());
        }
    };
    if render_id(id).is_empty() {
        GLOBAL_METRICS.record_skip(ctx.alias, "add", "empty_id_render");
        warn!(alias = ctx.alias, "identifier renders empty, degenerate cache key");
    }

    let key = compose_key(ctx.alias, id);
    let key_bytes = ctx.codec.key_to_bytes(&key);
    let value_bytes = ctx.codec.value_to_bytes(map)?;

    match dispatch {
        WriteDispatch::Direct(store) => {
            debug!(key = %key, "set store data");
            store.set(&key_bytes, value_bytes).await?;
            GLOBAL_METRICS.record_op(ctx.alias, "add", "direct");
        }
        WriteDispatch::Pipelined(pipeline) => {
            debug!(key = %key, "enqueue store data");
            pipeline.enqueue_set(key_bytes, value_bytes);
            GLOBAL_METRICS.record_op(ctx.alias, "add", "pipelined");
        }
    }
    Ok(())
}
