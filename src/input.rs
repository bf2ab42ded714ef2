// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/input.rs - 关键点输入
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

use std::io::StdinLock;

use thiserror::Error;

use crate::{FromUrl, FromUrlWithScheme, hand::LandmarkFrame};

mod landmark_file;
pub use self::landmark_file::{
  LandmarkFileInputError, LandmarkReader, StdinInput, parse_frame_line,
};

#[cfg(feature = "landmark_file_input")]
pub use self::landmark_file::LandmarkFileInput;

#[derive(Error, Debug)]
pub enum InputError {
  #[error("关键点输入错误: {0}")]
  LandmarkFileInputError(#[from] LandmarkFileInputError),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub enum InputWrapper {
  #[cfg(feature = "landmark_file_input")]
  LandmarkFile(LandmarkFileInput),
  Stdin(StdinInput),
}

impl FromUrl for InputWrapper {
  type Error = InputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "landmark_file_input")]
    {
      if url.scheme() == LandmarkFileInput::SCHEME {
        let input = LandmarkFileInput::from_url(url)?;
        return Ok(InputWrapper::LandmarkFile(input));
      }
    }
    if url.scheme() == StdinInput::SCHEME {
      let input = StdinInput::from_url(url)?;
      return Ok(InputWrapper::Stdin(input));
    }
    Err(InputError::SchemeMismatch)
  }
}

impl InputWrapper {
  pub fn into_frames(self) -> InputWrapperIter {
    match self {
      #[cfg(feature = "landmark_file_input")]
      InputWrapper::LandmarkFile(input) => InputWrapperIter::LandmarkFile(input.into_frames()),
      InputWrapper::Stdin(input) => InputWrapperIter::Stdin(input.into_frames()),
    }
  }
}

pub enum InputWrapperIter {
  #[cfg(feature = "landmark_file_input")]
  LandmarkFile(LandmarkReader<std::io::BufReader<std::fs::File>>),
  Stdin(LandmarkReader<StdinLock<'static>>),
}

impl Iterator for InputWrapperIter {
  type Item = Result<LandmarkFrame, InputError>;

  fn next(&mut self) -> Option<Self::Item> {
    match self {
      #[cfg(feature = "landmark_file_input")]
      InputWrapperIter::LandmarkFile(input) => input.next().map(|r| r.map_err(InputError::from)),
      InputWrapperIter::Stdin(input) => input.next().map(|r| r.map_err(InputError::from)),
    }
  }
}
