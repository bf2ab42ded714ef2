// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/model.rs - 模型
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

pub trait Model {
  type Input;
  type Output;
  type Error;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

pub trait WithLabel: Sized + std::fmt::Debug {
  fn to_label_str(&self) -> String;
}

/// 单只手的分类结果，`hand` 为该手在帧内的序号
#[derive(Debug, Clone, PartialEq)]
pub struct GestureItem<T> {
  pub hand: usize,
  pub kind: T,
}

/// 一帧的分类结果，按输入顺序每只手一项
#[derive(Debug, Clone, PartialEq)]
pub struct GestureResult<T> {
  pub items: Box<[GestureItem<T>]>,
}

impl<T> GestureResult<T> {
  /// 帧内没有检测到手
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }
}

impl<T: WithLabel> GestureResult<T> {
  pub fn labels(&self) -> Vec<String> {
    self.items.iter().map(|item| item.kind.to_label_str()).collect()
  }
}

impl<T> FromIterator<T> for GestureResult<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let items = iter
      .into_iter()
      .enumerate()
      .map(|(hand, kind)| GestureItem { hand, kind })
      .collect();
    Self { items }
  }
}

mod classifier;
mod gesture;
mod rule;

pub use self::classifier::{ClassifierError, GestureClassifier, GestureClassifierBuilder, classify};
pub use self::gesture::Gesture;
pub use self::rule::{GESTURE_RULES, GestureRule, Predicate, is_fist, is_palm, is_thumbs_up};
