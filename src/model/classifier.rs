// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/model/classifier.rs - 手势分类器
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

use thiserror::Error;
use tracing::{debug, info, trace};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  hand::{Hand, HandError, LandmarkFrame},
  model::{GESTURE_RULES, Gesture, GestureResult, Model},
};

#[derive(Error, Debug)]
pub enum ClassifierError {
  #[error("URI 方案不匹配: 期望 '{expected}', 实际 '{actual}'")]
  SchemeMismatch {
    expected: &'static str,
    actual: String,
  },
  #[error("第 {hand} 只手不满足输入约定: {source}")]
  Hand {
    hand: usize,
    #[source]
    source: HandError,
  },
  #[error("第 {0} 帧没有检测到手")]
  NoHand(u64),
}

/// 对单只手分类
///
/// 先检查输入约定，再按 [`GESTURE_RULES`] 的声明顺序求值，返回第一个命中的手势；
/// 全部未命中时返回 [`Gesture::Unknown`]。纯函数，无状态、无日志。
pub fn classify(hand: &Hand) -> Result<Gesture, HandError> {
  let hand = hand.validate()?;
  Ok(
    GESTURE_RULES
      .iter()
      .find(|rule| rule.matches(&hand))
      .map_or(Gesture::Unknown, |rule| rule.gesture),
  )
}

/// 帧级分类器，逐手独立分类
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
  strict: bool,
}

impl GestureClassifier {
  pub fn new() -> Self {
    Self::default()
  }

  /// 为 true 时，没有手的帧视为错误
  pub fn with_strict(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  pub fn is_strict(&self) -> bool {
    self.strict
  }

  pub fn classify(&self, hand: &Hand) -> Result<Gesture, HandError> {
    classify(hand)
  }
}

impl Model for GestureClassifier {
  type Input = LandmarkFrame;
  type Output = GestureResult<Gesture>;
  type Error = ClassifierError;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    if input.hands.is_empty() {
      if self.strict {
        return Err(ClassifierError::NoHand(input.index));
      }
      debug!("第 {} 帧没有检测到手", input.index);
    }

    let result = input
      .hands
      .iter()
      .enumerate()
      .map(|(idx, hand)| {
        classify(hand).map_err(|source| ClassifierError::Hand { hand: idx, source })
      })
      .collect::<Result<GestureResult<Gesture>, _>>()?;

    trace!("第 {} 帧分类结果: {:?}", input.index, result);
    Ok(result)
  }
}

pub struct GestureClassifierBuilder {
  strict: bool,
}

impl FromUrlWithScheme for GestureClassifierBuilder {
  const SCHEME: &'static str = "gesture";
}

impl FromUrl for GestureClassifierBuilder {
  type Error = ClassifierError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(ClassifierError::SchemeMismatch {
        expected: Self::SCHEME,
        actual: url.scheme().to_string(),
      });
    }

    let strict = url.query_pairs().any(|(k, _)| k == "strict");

    Ok(GestureClassifierBuilder { strict })
  }
}

impl GestureClassifierBuilder {
  pub fn build(self) -> GestureClassifier {
    info!("加载手势规则 {} 条", GESTURE_RULES.len());
    for (order, rule) in GESTURE_RULES.iter().enumerate() {
      debug!("规则 {}: {}", order + 1, rule.name());
    }
    if self.strict {
      debug!("严格模式: 无手帧视为错误");
    }
    GestureClassifier::new().with_strict(self.strict)
  }
}
