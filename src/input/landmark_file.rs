// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/input/landmark_file.rs - JSON Lines 关键点输入
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

use std::{
  fs::File,
  io::{BufRead, BufReader, Lines, StdinLock},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  hand::{Hand, LandmarkFrame},
};

#[derive(Error, Debug)]
pub enum LandmarkFileInputError {
  #[error("URI 方案不匹配: 期望 '{expected}', 实际 '{actual}'")]
  SchemeMismatch {
    expected: &'static str,
    actual: String,
  },
  #[error("路径解码失败: {0}")]
  PathDecodeError(#[from] std::string::FromUtf8Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("第 {line} 行解析失败: {source}")]
  ParseError {
    line: u64,
    #[source]
    source: serde_json::Error,
  },
}

/// `{"hands": [...]}` 形式的帧，其余字段忽略
#[derive(Deserialize)]
struct FrameObject {
  hands: Vec<Hand>,
}

/// 每行一帧，可以是 `{"hands": [...]}`，也可以直接是手的数组
///
/// 按首个非空白字符选择形式，解析错误保留 serde_json 给出的位置信息。
pub fn parse_frame_line(line: &str) -> Result<Vec<Hand>, serde_json::Error> {
  if line.trim_start().starts_with('{') {
    serde_json::from_str::<FrameObject>(line).map(|frame| frame.hands)
  } else {
    serde_json::from_str::<Vec<Hand>>(line)
  }
}

/// 逐行读取关键点帧，跳过空行
pub struct LandmarkReader<R> {
  lines: Lines<R>,
  line_number: u64,
  frame_index: u64,
}

impl<R: BufRead> LandmarkReader<R> {
  pub fn new(reader: R) -> Self {
    Self {
      lines: reader.lines(),
      line_number: 0,
      frame_index: 0,
    }
  }
}

impl<R: BufRead> Iterator for LandmarkReader<R> {
  type Item = Result<LandmarkFrame, LandmarkFileInputError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let line = self.lines.next()?;
      self.line_number += 1;
      let line = match line {
        Ok(line) => line,
        Err(e) => {
          error!("读取第 {} 行失败: {}", self.line_number, e);
          return Some(Err(e.into()));
        }
      };

      if line.trim().is_empty() {
        continue;
      }

      let hands = match parse_frame_line(&line) {
        Ok(hands) => hands,
        Err(source) => {
          error!("第 {} 行关键点解析失败: {}", self.line_number, source);
          return Some(Err(LandmarkFileInputError::ParseError {
            line: self.line_number,
            source,
          }));
        }
      };

      self.frame_index += 1;
      debug!("读取第 {} 帧, 手的数量: {}", self.frame_index, hands.len());
      return Some(Ok(LandmarkFrame::new(self.frame_index, hands)));
    }
  }
}

pub struct LandmarkFileInput {
  reader: LandmarkReader<BufReader<File>>,
}

impl FromUrlWithScheme for LandmarkFileInput {
  const SCHEME: &'static str = "landmarks";
}

impl FromUrl for LandmarkFileInput {
  type Error = LandmarkFileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(LandmarkFileInputError::SchemeMismatch {
        expected: Self::SCHEME,
        actual: url.scheme().to_string(),
      });
    }

    let path = urlencoding::decode(url.path())?.into_owned();
    info!("打开关键点文件: {}", path);
    let file = File::open(&path)?;

    Ok(LandmarkFileInput {
      reader: LandmarkReader::new(BufReader::new(file)),
    })
  }
}

impl LandmarkFileInput {
  pub fn into_frames(self) -> LandmarkReader<BufReader<File>> {
    self.reader
  }
}

pub struct StdinInput {
  reader: LandmarkReader<StdinLock<'static>>,
}

impl FromUrlWithScheme for StdinInput {
  const SCHEME: &'static str = "stdin";
}

impl FromUrl for StdinInput {
  type Error = LandmarkFileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(LandmarkFileInputError::SchemeMismatch {
        expected: Self::SCHEME,
        actual: url.scheme().to_string(),
      });
    }

    info!("从标准输入读取关键点");
    Ok(StdinInput {
      reader: LandmarkReader::new(std::io::stdin().lock()),
    })
  }
}

impl StdinInput {
  pub fn into_frames(self) -> LandmarkReader<StdinLock<'static>> {
    self.reader
  }
}
