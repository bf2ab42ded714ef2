// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/output/jsonl_record.rs - JSON Lines 记录输出
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
  fs::{File, OpenOptions},
  io::{BufWriter, Write},
  path::Path,
  sync::{Mutex, PoisonError},
};

use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  hand::LandmarkFrame,
  model::{GestureResult, WithLabel},
  output::{Render, record::FrameRecord},
};

#[derive(Error, Debug)]
pub enum JsonlRecordOutputError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("路径解码失败: {0}")]
  PathDecodeError(#[from] std::string::FromUtf8Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("序列化错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

/// 每帧向文件追加一行 JSON
pub struct JsonlRecordOutput {
  writer: Mutex<BufWriter<File>>,
}

impl FromUrlWithScheme for JsonlRecordOutput {
  const SCHEME: &'static str = "jsonl";
}

impl FromUrl for JsonlRecordOutput {
  type Error = JsonlRecordOutputError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(JsonlRecordOutputError::SchemeMismatch(format!(
        "期望保存方式 '{}', 实际保存方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    let path = urlencoding::decode(uri.path())?.into_owned();
    let append = uri.query_pairs().any(|(k, _)| k == "append");

    if let Some(parent) = Path::new(&path).parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
      .create(true)
      .write(true)
      .append(append)
      .truncate(!append)
      .open(&path)?;
    info!("记录分类结果到文件: {} (追加: {})", path, append);

    Ok(JsonlRecordOutput {
      writer: Mutex::new(BufWriter::new(file)),
    })
  }
}

impl JsonlRecordOutput {
  fn write_record(&self, record: &FrameRecord) -> Result<(), JsonlRecordOutputError> {
    let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
  }
}

impl<T: WithLabel> Render<LandmarkFrame, GestureResult<T>> for JsonlRecordOutput {
  type Error = JsonlRecordOutputError;

  fn render_result(
    &self,
    frame: &LandmarkFrame,
    result: &GestureResult<T>,
  ) -> Result<(), Self::Error> {
    self.write_record(&FrameRecord::new(frame, result))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Gesture;

  fn jsonl_url(path: &Path, query: &str) -> Url {
    let url = Url::from_file_path(path).unwrap();
    Url::parse(&format!("{}{}", url.as_str().replacen("file", "jsonl", 1), query)).unwrap()
  }

  fn render(output: &JsonlRecordOutput, index: u64, gestures: &[Gesture]) {
    let frame = LandmarkFrame::new(index, Vec::new());
    let result: GestureResult<Gesture> = gestures.iter().copied().collect();
    output.render_result(&frame, &result).unwrap();
  }

  #[test]
  fn test_records_one_line_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.jsonl");
    let output = JsonlRecordOutput::from_url(&jsonl_url(&path, "")).unwrap();

    render(&output, 1, &[Gesture::Fist]);
    render(&output, 2, &[]);
    render(&output, 3, &[Gesture::ThumbsUp, Gesture::Unknown]);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
      content,
      "{\"frame\":1,\"gestures\":[\"Fist\"]}\n\
       {\"frame\":2,\"gestures\":[]}\n\
       {\"frame\":3,\"gestures\":[\"Thumbs Up\",\"Unknown\"]}\n"
    );
  }

  #[test]
  fn test_truncate_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.jsonl");
    std::fs::write(&path, "stale\n").unwrap();

    let output = JsonlRecordOutput::from_url(&jsonl_url(&path, "")).unwrap();
    render(&output, 1, &[Gesture::Palm]);
    drop(output);
    assert_eq!(
      std::fs::read_to_string(&path).unwrap(),
      "{\"frame\":1,\"gestures\":[\"Palm\"]}\n"
    );

    let output = JsonlRecordOutput::from_url(&jsonl_url(&path, "?append")).unwrap();
    render(&output, 2, &[Gesture::Fist]);
    drop(output);
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
  }
}
