//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存键的命名规则：类型别名推导与键的拼接。

use crate::entity::AttrValue;

/// 键分隔符
///
/// 别名与标识符之间的分隔符。分隔符不做转义，别名或标识符中
/// 含有字面 `.` 时存在键冲突的风险。
pub const KEY_SEPARATOR: char = '.';

/// 从类型推导别名
///
/// 取类型简单名（`::` 路径的最后一段，去掉泛型参数），
/// 并将首字母小写。纯函数，结果确定。
///
/// # 返回值
///
/// 返回推导出的别名字符串
pub fn derive_alias<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let simple = base.rsplit("::").next().unwrap_or(base);
    first_char_to_lowercase(simple)
}

/// 拼接缓存键
///
/// 产生 `"{alias}.{id}"`，标识符按其外部字符串表示渲染。
/// 纯函数，无任何I/O。
///
/// # 参数
///
/// * `alias` - 类型别名
/// * `id` - 标识符属性值
pub fn compose_key(alias: &str, id: &AttrValue) -> String {
    format!("{}{}{}", alias, KEY_SEPARATOR, render_id(id))
}

/// 渲染标识符
///
/// 字符串值按原文渲染（不带JSON引号），其余值使用其JSON文本形式。
pub fn render_id(id: &AttrValue) -> String {
    match id {
        AttrValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 判断字符串是否为空白
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn first_char_to_lowercase(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
