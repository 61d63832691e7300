//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了同步目标的单个/集合分类与统一的一或多迭代。

/// 同步目标
///
/// 把"单个对象"与"同类对象集合"收敛为一个迭代骨架，
/// 读写同步器因此无需关心目标的元素个数。
/// `One(None)` 表示目标缺失，向下游退化为无操作。
#[derive(Debug, Clone)]
pub enum Target<I> {
    /// 单个目标（可能缺失）
    One(Option<I>),
    /// 同类目标集合（元素个数可以为零或一）
    Many(Vec<I>),
}

impl<I> Target<I> {
    /// 由一个确定存在的目标构造
    pub fn one(item: I) -> Self {
        Target::One(Some(item))
    }

    /// 解析后的目标个数
    pub fn len(&self) -> usize {
        match self {
            Target::One(None) => 0,
            Target::One(Some(_)) => 1,
            Target::Many(items) => items.len(),
        }
    }

    /// 是否没有任何可解析目标
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<I> From<Option<I>> for Target<I> {
    fn from(item: Option<I>) -> Self {
        Target::One(item)
    }
}

impl<I> From<Vec<I>> for Target<I> {
    fn from(items: Vec<I>) -> Self {
        Target::Many(items)
    }
}

impl<'a, I> From<&'a mut [I]> for Target<&'a mut I> {
    fn from(items: &'a mut [I]) -> Self {
        Target::Many(items.iter_mut().collect())
    }
}

impl<'a, I> From<&'a [I]> for Target<&'a I> {
    fn from(items: &'a [I]) -> Self {
        Target::Many(items.iter().collect())
    }
}

/// 目标迭代器
pub enum TargetIter<I> {
    One(std::option::IntoIter<I>),
    Many(std::vec::IntoIter<I>),
}

impl<I> Iterator for TargetIter<I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        match self {
            TargetIter::One(iter) => iter.next(),
            TargetIter::Many(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            TargetIter::One(iter) => iter.size_hint(),
            TargetIter::Many(iter) => iter.size_hint(),
        }
    }
}

impl<I> IntoIterator for Target<I> {
    type Item = I;
    type IntoIter = TargetIter<I>;

    fn into_iter(self) -> TargetIter<I> {
        match self {
            Target::One(item) => TargetIter::One(item.into_iter()),
            Target::Many(items) => TargetIter::Many(items.into_iter()),
        }
    }
}
