// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/hand.rs - 手部关键点定义
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

use std::{fmt, ops::Index};

use serde::{
  Deserialize, Deserializer, Serialize,
  de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
};
use thiserror::Error;

/// 单只手的关键点数量
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// 归一化图像坐标下的关键点，原点在左上角，y 轴向下
///
/// 反序列化接受 `{"x": .., "y": .., ...}` 或 `[x, y, ...]`，
/// 深度 `z` 等其余字段被忽略。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Landmark {
  pub x: f64,
  pub y: f64,
}

impl Landmark {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite()
  }
}

impl From<(f64, f64)> for Landmark {
  fn from((x, y): (f64, f64)) -> Self {
    Self { x, y }
  }
}

struct LandmarkVisitor;

impl<'de> Visitor<'de> for LandmarkVisitor {
  type Value = Landmark;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("关键点对象 {x, y} 或数组 [x, y, ...]")
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Landmark, A::Error> {
    let x = seq
      .next_element()?
      .ok_or_else(|| de::Error::invalid_length(0, &self))?;
    let y = seq
      .next_element()?
      .ok_or_else(|| de::Error::invalid_length(1, &self))?;
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(Landmark { x, y })
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Landmark, A::Error> {
    let mut x = None;
    let mut y = None;
    while let Some(key) = map.next_key::<String>()? {
      match key.as_str() {
        "x" if x.is_none() => x = Some(map.next_value()?),
        "y" if y.is_none() => y = Some(map.next_value()?),
        "x" | "y" => return Err(de::Error::duplicate_field("x/y")),
        _ => {
          map.next_value::<IgnoredAny>()?;
        }
      }
    }
    let x = x.ok_or_else(|| de::Error::missing_field("x"))?;
    let y = y.ok_or_else(|| de::Error::missing_field("y"))?;
    Ok(Landmark { x, y })
  }
}

impl<'de> Deserialize<'de> for Landmark {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(LandmarkVisitor)
  }
}

/// 上游提供的手部数据不满足约定时的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandError {
  #[error("手部关键点数量不符: 期望 {expected} 个, 实际 {actual} 个")]
  LandmarkCount { expected: usize, actual: usize },
  #[error("第 {index} 个关键点坐标不是有限数值")]
  NonFiniteLandmark { index: usize },
}

/// 一只手的有序关键点序列
///
/// 下标即关键点身份（见 `WRIST` .. `PINKY_TIP`）。构造时不做检查，
/// 以便不合约定的输入也能被表示，并在分类前由 [`Hand::validate`] 拒绝。
/// 规则只作用于检查后得到的 [`ValidHand`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
  landmarks: Box<[Landmark]>,
}

impl From<Vec<Landmark>> for Hand {
  fn from(landmarks: Vec<Landmark>) -> Self {
    Self {
      landmarks: landmarks.into_boxed_slice(),
    }
  }
}

impl From<[Landmark; HAND_LANDMARK_COUNT]> for Hand {
  fn from(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
    Self {
      landmarks: Box::new(landmarks),
    }
  }
}

impl Hand {
  pub fn len(&self) -> usize {
    self.landmarks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.landmarks.is_empty()
  }

  pub fn landmarks(&self) -> &[Landmark] {
    &self.landmarks
  }

  pub fn get(&self, index: usize) -> Option<&Landmark> {
    self.landmarks.get(index)
  }

  /// 检查关键点数量为 21 且所有坐标均为有限数值
  pub fn validate(&self) -> Result<ValidHand<'_>, HandError> {
    let landmarks: &[Landmark; HAND_LANDMARK_COUNT] =
      self.landmarks[..]
        .try_into()
        .map_err(|_| HandError::LandmarkCount {
          expected: HAND_LANDMARK_COUNT,
          actual: self.landmarks.len(),
        })?;

    match landmarks.iter().position(|lm| !lm.is_finite()) {
      Some(index) => Err(HandError::NonFiniteLandmark { index }),
      None => Ok(ValidHand { landmarks }),
    }
  }
}

/// 通过检查的手部视图，下标访问不会越界
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidHand<'a> {
  landmarks: &'a [Landmark; HAND_LANDMARK_COUNT],
}

impl ValidHand<'_> {
  pub fn landmarks(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
    self.landmarks
  }
}

impl Index<usize> for ValidHand<'_> {
  type Output = Landmark;

  fn index(&self, index: usize) -> &Self::Output {
    &self.landmarks[index]
  }
}

impl Index<usize> for Hand {
  type Output = Landmark;

  fn index(&self, index: usize) -> &Self::Output {
    &self.landmarks[index]
  }
}

/// 一帧中检测到的所有手
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkFrame {
  /// 帧序号，从 1 开始
  pub index: u64,
  pub hands: Vec<Hand>,
}

impl LandmarkFrame {
  pub fn new(index: u64, hands: Vec<Hand>) -> Self {
    Self { index, hands }
  }
}
