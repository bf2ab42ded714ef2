// 该文件是 Shoushi （手势识别） 项目的一部分。
// tests/pipeline.rs - 输入、分类、输出串联测试
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

use std::{cell::RefCell, convert::Infallible, io::Cursor, path::Path, rc::Rc};

use url::Url;

use shoushi::{
  FromUrl,
  hand::LandmarkFrame,
  input::{InputWrapper, LandmarkReader},
  model::{Gesture, GestureClassifier, GestureResult},
  output::{OutputWrapper, Render},
  task::{ContinuousTask, OneShotTask, RepeatShotTask, Task, TaskSummary},
};

/// 记录每次渲染的帧号与手势
#[derive(Clone, Default)]
struct Recorder {
  rendered: Rc<RefCell<Vec<(u64, Vec<Gesture>)>>>,
}

impl Render<LandmarkFrame, GestureResult<Gesture>> for Recorder {
  type Error = Infallible;

  fn render_result(
    &self,
    frame: &LandmarkFrame,
    result: &GestureResult<Gesture>,
  ) -> Result<(), Self::Error> {
    let gestures = result.items.iter().map(|item| item.kind).collect();
    self.rendered.borrow_mut().push((frame.index, gestures));
    Ok(())
  }
}

/// 四指指根与下一关节的 y，以及拇指 IP/指尖的 x
fn hand_json(finger_ys: [(f64, f64); 4], thumb_ip_x: f64, thumb_tip_x: f64) -> String {
  let mut points = vec![(0.5f64, 0.5f64); 21];
  for (base, (base_y, next_y)) in [5usize, 9, 13, 17].into_iter().zip(finger_ys) {
    points[base].1 = base_y;
    points[base + 1].1 = next_y;
  }
  points[3].0 = thumb_ip_x;
  points[4].0 = thumb_tip_x;
  let points: Vec<String> = points
    .iter()
    .map(|(x, y)| format!(r#"{{"x": {}, "y": {}}}"#, x, y))
    .collect();
  format!("[{}]", points.join(", "))
}

const CURLED: (f64, f64) = (0.75, 0.5);
const EXTENDED: (f64, f64) = (0.5, 0.75);

fn sample_lines() -> String {
  let fist = hand_json([CURLED; 4], 0.5, 0.25);
  let palm = hand_json([EXTENDED; 4], 0.5, 0.25);
  let thumbs_up = hand_json([CURLED, CURLED, CURLED, EXTENDED], 0.5, 0.25);
  let short = "[[0.5, 0.5], [0.5, 0.5]]";
  [
    format!(r#"{{"hands": [{}]}}"#, fist),
    format!("[{}, {}]", palm, thumbs_up),
    String::new(),
    format!("[{}]", short),
    "[]".to_string(),
  ]
  .join("\n")
}

#[test]
fn continuous_task_skips_frames_that_break_preconditions() {
  let recorder = Recorder::default();
  let input = LandmarkReader::new(Cursor::new(sample_lines()));

  let summary = ContinuousTask::default()
    .with_interrupt(false)
    .run_task(input, GestureClassifier::new(), recorder.clone())
    .unwrap();

  assert_eq!(
    summary,
    TaskSummary {
      frames: 4,
      skipped: 1
    }
  );
  assert_eq!(
    *recorder.rendered.borrow(),
    vec![
      (1, vec![Gesture::Fist]),
      (2, vec![Gesture::Palm, Gesture::ThumbsUp]),
      (4, vec![]),
    ]
  );
}

#[test]
fn continuous_task_honours_frame_number() {
  let recorder = Recorder::default();
  let input = LandmarkReader::new(Cursor::new(sample_lines()));

  let summary = ContinuousTask::default()
    .with_interrupt(false)
    .with_frame_number(Some(2))
    .run_task(input, GestureClassifier::new(), recorder.clone())
    .unwrap();

  assert_eq!(summary.frames, 2);
  assert_eq!(recorder.rendered.borrow().len(), 2);
}

#[test]
fn continuous_task_with_zero_frame_number_reads_nothing() {
  let recorder = Recorder::default();
  let input = LandmarkReader::new(Cursor::new(sample_lines()));

  let summary = ContinuousTask::default()
    .with_interrupt(false)
    .with_frame_number(Some(0))
    .run_task(input, GestureClassifier::new(), recorder.clone())
    .unwrap();

  assert_eq!(summary, TaskSummary::default());
  assert!(recorder.rendered.borrow().is_empty());
}

#[test]
fn continuous_task_stops_on_malformed_input() {
  let recorder = Recorder::default();
  let input = LandmarkReader::new(Cursor::new("[]\nnot json\n[]\n"));

  let result = ContinuousTask::default()
    .with_interrupt(false)
    .run_task(input, GestureClassifier::new(), recorder.clone());

  assert!(result.is_err());
  assert_eq!(recorder.rendered.borrow().len(), 1);
}

#[test]
fn one_shot_task_propagates_precondition_failure() {
  let input = LandmarkReader::new(Cursor::new("[[[0.5, 0.5]]]\n"));
  let result = OneShotTask.run_task(input, GestureClassifier::new(), Recorder::default());
  assert!(result.is_err());
}

#[test]
fn one_shot_task_without_frames_fails() {
  let input = LandmarkReader::new(Cursor::new(""));
  let result = OneShotTask.run_task(input, GestureClassifier::new(), Recorder::default());
  assert!(result.is_err());
}

#[test]
fn repeat_shot_task_renders_the_first_frame_repeatedly() {
  let recorder = Recorder::default();
  let input = LandmarkReader::new(Cursor::new(sample_lines()));

  RepeatShotTask::default()
    .with_repeat(3)
    .run_task(input, GestureClassifier::new(), recorder.clone())
    .unwrap();

  assert_eq!(
    *recorder.rendered.borrow(),
    vec![(1, vec![Gesture::Fist]); 3]
  );
}

fn scheme_url(scheme: &str, path: &Path) -> Url {
  let url = Url::from_file_path(path).unwrap();
  Url::parse(&url.as_str().replacen("file", scheme, 1)).unwrap()
}

#[cfg(all(feature = "landmark_file_input", feature = "jsonl_output"))]
#[test]
fn file_to_jsonl_pipeline() {
  let dir = tempfile::tempdir().unwrap();
  let input_path = dir.path().join("frames.jsonl");
  let output_path = dir.path().join("gestures.jsonl");
  std::fs::write(&input_path, sample_lines()).unwrap();

  let input = InputWrapper::from_url(&scheme_url("landmarks", &input_path)).unwrap();
  let output = OutputWrapper::from_url(&scheme_url("jsonl", &output_path)).unwrap();

  ContinuousTask::default()
    .with_interrupt(false)
    .run_task(input.into_frames(), GestureClassifier::new(), output)
    .unwrap();

  let content = std::fs::read_to_string(&output_path).unwrap();
  let lines: Vec<_> = content.lines().collect();
  assert_eq!(
    lines,
    [
      r#"{"frame":1,"gestures":["Fist"]}"#,
      r#"{"frame":2,"gestures":["Palm","Thumbs Up"]}"#,
      r#"{"frame":4,"gestures":[]}"#,
    ]
  );
}
