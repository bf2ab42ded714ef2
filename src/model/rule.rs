// 该文件是 Shoushi （手势识别） 项目的一部分。
// src/model/rule.rs - 手势规则表
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

use crate::{
  hand::{INDEX_MCP, MIDDLE_MCP, PINKY_MCP, RING_MCP, THUMB_IP, THUMB_TIP, ValidHand},
  model::Gesture,
};

/// 规则谓词，只接受通过检查的手
pub type Predicate = fn(&ValidHand<'_>) -> bool;

/// 具名谓词
#[derive(Debug, Clone, Copy)]
pub struct GestureRule {
  pub gesture: Gesture,
  pub predicate: Predicate,
}

impl GestureRule {
  pub const fn new(gesture: Gesture, predicate: Predicate) -> Self {
    Self { gesture, predicate }
  }

  pub fn name(&self) -> &'static str {
    self.gesture.name()
  }

  pub fn matches(&self, hand: &ValidHand<'_>) -> bool {
    (self.predicate)(hand)
  }
}

/// 按声明顺序求值，第一个命中的规则胜出
pub static GESTURE_RULES: [GestureRule; 3] = [
  GestureRule::new(Gesture::Fist, is_fist),
  GestureRule::new(Gesture::Palm, is_palm),
  GestureRule::new(Gesture::ThumbsUp, is_thumbs_up),
];

// 每组取指根关节与其后一个关节比较
const FINGER_BASES: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
// 不含小指
const THUMBS_UP_FINGER_BASES: [usize; 3] = [INDEX_MCP, MIDDLE_MCP, RING_MCP];

fn curled(hand: &ValidHand<'_>, base: usize) -> bool {
  hand[base].y > hand[base + 1].y
}

fn extended(hand: &ValidHand<'_>, base: usize) -> bool {
  hand[base].y < hand[base + 1].y
}

pub fn is_fist(hand: &ValidHand<'_>) -> bool {
  FINGER_BASES.iter().all(|&base| curled(hand, base))
}

pub fn is_palm(hand: &ValidHand<'_>) -> bool {
  FINGER_BASES.iter().all(|&base| extended(hand, base))
}

pub fn is_thumbs_up(hand: &ValidHand<'_>) -> bool {
  hand[THUMB_TIP].x < hand[THUMB_IP].x
    && THUMBS_UP_FINGER_BASES
      .iter()
      .all(|&base| curled(hand, base))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hand::{HAND_LANDMARK_COUNT, Hand, Landmark};

  /// 构造一只手：`finger_ys[k]` 为第 k 根手指（食指到小指）的指根与下一关节的 y
  fn hand_with(finger_ys: [(f64, f64); 4], thumb_ip_x: f64, thumb_tip_x: f64) -> Hand {
    let mut landmarks = [Landmark::new(0.5, 0.5); HAND_LANDMARK_COUNT];
    for (base, (base_y, next_y)) in FINGER_BASES.into_iter().zip(finger_ys) {
      landmarks[base].y = base_y;
      landmarks[base + 1].y = next_y;
    }
    landmarks[THUMB_IP].x = thumb_ip_x;
    landmarks[THUMB_TIP].x = thumb_tip_x;
    Hand::from(landmarks)
  }

  const CURLED: (f64, f64) = (0.6, 0.5);
  const EXTENDED: (f64, f64) = (0.5, 0.6);
  const LEVEL: (f64, f64) = (0.5, 0.5);

  #[test]
  fn test_rule_order() {
    let names: Vec<_> = GESTURE_RULES.iter().map(GestureRule::name).collect();
    assert_eq!(names, ["Fist", "Palm", "Thumbs Up"]);
  }

  #[test]
  fn test_fist() {
    let hand = hand_with([CURLED; 4], 0.4, 0.45);
    let hand = hand.validate().unwrap();
    assert!(is_fist(&hand));
    assert!(!is_palm(&hand));
    assert!(!is_thumbs_up(&hand));
  }

  #[test]
  fn test_palm() {
    let hand = hand_with([EXTENDED; 4], 0.4, 0.45);
    let hand = hand.validate().unwrap();
    assert!(is_palm(&hand));
    assert!(!is_fist(&hand));
  }

  #[test]
  fn test_thumbs_up_ignores_pinky() {
    let hand = hand_with([CURLED, CURLED, CURLED, EXTENDED], 0.45, 0.40);
    let hand = hand.validate().unwrap();
    assert!(is_thumbs_up(&hand));
    assert!(!is_fist(&hand));

    let hand = hand_with([CURLED, CURLED, CURLED, LEVEL], 0.45, 0.40);
    assert!(is_thumbs_up(&hand.validate().unwrap()));
  }

  #[test]
  fn test_thumbs_up_needs_thumb_left_of_ip() {
    let right = hand_with([CURLED, CURLED, CURLED, EXTENDED], 0.40, 0.45);
    assert!(!is_thumbs_up(&right.validate().unwrap()));

    let equal = hand_with([CURLED, CURLED, CURLED, EXTENDED], 0.40, 0.40);
    assert!(!is_thumbs_up(&equal.validate().unwrap()));
  }

  #[test]
  fn test_level_joints_match_nothing() {
    let hand = hand_with([LEVEL; 4], 0.45, 0.40);
    let hand = hand.validate().unwrap();
    assert!(!is_fist(&hand));
    assert!(!is_palm(&hand));
    assert!(!is_thumbs_up(&hand));
  }

  #[test]
  fn test_single_level_finger_breaks_fist() {
    let hand = hand_with([CURLED, CURLED, LEVEL, CURLED], 0.40, 0.45);
    assert!(!is_fist(&hand.validate().unwrap()));
  }
}
