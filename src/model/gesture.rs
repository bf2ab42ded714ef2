// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/model/gesture.rs - 手势标签
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

use std::fmt;

use serde::Serialize;

use crate::model::WithLabel;

/// 分类结果：规则表中声明的手势，或没有规则命中时的 `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gesture {
  Fist,
  Palm,
  #[serde(rename = "Thumbs Up")]
  ThumbsUp,
  Unknown,
}

impl Gesture {
  pub const fn name(&self) -> &'static str {
    match self {
      Gesture::Fist => "Fist",
      Gesture::Palm => "Palm",
      Gesture::ThumbsUp => "Thumbs Up",
      Gesture::Unknown => "Unknown",
    }
  }
}

impl fmt::Display for Gesture {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl WithLabel for Gesture {
  fn to_label_str(&self) -> String {
    self.name().to_string()
  }
}
