// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/output/record.rs - 分类结果记录格式
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

use serde::Serialize;

use crate::{
  hand::LandmarkFrame,
  model::{GestureResult, WithLabel},
};

/// 帧内没有手时的显示文本
pub const NO_HAND_LABEL: &str = "None";

/// 一帧的记录，序列化为 `{"frame": N, "gestures": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
  pub frame: u64,
  pub gestures: Vec<String>,
}

impl FrameRecord {
  pub fn new<T: WithLabel>(frame: &LandmarkFrame, result: &GestureResult<T>) -> Self {
    Self {
      frame: frame.index,
      gestures: result.labels(),
    }
  }
}

/// 叠加显示用的文本，多只手以逗号分隔
pub fn overlay_text<T: WithLabel>(result: &GestureResult<T>) -> String {
  if result.is_empty() {
    NO_HAND_LABEL.to_string()
  } else {
    result.labels().join(", ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Gesture;

  #[test]
  fn test_overlay_text() {
    let empty: GestureResult<Gesture> = std::iter::empty().collect();
    assert_eq!(overlay_text(&empty), "None");

    let result: GestureResult<Gesture> = [Gesture::ThumbsUp, Gesture::Unknown].into_iter().collect();
    assert_eq!(overlay_text(&result), "Thumbs Up, Unknown");
  }

  #[test]
  fn test_frame_record_json() {
    let frame = LandmarkFrame::new(9, Vec::new());
    let result: GestureResult<Gesture> = [Gesture::Palm].into_iter().collect();
    let record = FrameRecord::new(&frame, &result);
    assert_eq!(
      serde_json::to_string(&record).unwrap(),
      r#"{"frame":9,"gestures":["Palm"]}"#
    );
  }
}
