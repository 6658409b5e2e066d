//! Review scoring types.

use serde::{Deserialize, Serialize};

/// A 1–5 score used for both rating and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(u8);

/// Returned when a submitted score is outside 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score must be between 1 and 5, got {0}")]
pub struct ScoreOutOfRange(pub i32);

impl Score {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn new(value: i32) -> Result<Self, ScoreOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }

    pub fn get(self) -> i32 {
        i32::from(self.0)
    }
}

impl TryFrom<i32> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.get()
    }
}

/// Mean of `values` rounded to one decimal place, or `None` when empty.
pub fn rounded_mean(values: impl IntoIterator<Item = i32>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0i64, 0u32), |(sum, count), v| (sum + i64::from(v), count + 1));
    if count == 0 {
        return None;
    }
    let mean = sum as f64 / f64::from(count);
    Some((mean * 10.0).round() / 10.0)
}
