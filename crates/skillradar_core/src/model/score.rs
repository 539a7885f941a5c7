//! Proficiency score value type.
//!
//! # Responsibility
//! - Represent one 0..=5 rating for a skill inside a snapshot.
//! - Reject out-of-range input at the point of entry.
//!
//! # Invariants
//! - A constructed `Score` is always within `Score::MIN..=Score::MAX`.

use std::error::Error;
use std::fmt::{Display, Formatter};

const SCORE_LABELS: [&str; 6] = ["None", "Aware", "Basic", "Competent", "Advanced", "Expert"];

/// Integer proficiency rating in the closed range `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

/// Validation error for score input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// Value is below `Score::MIN` or above `Score::MAX`.
    OutOfRange(i64),
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(value) => write!(
                f,
                "score {value} is out of range; expected {}..={}",
                Score::MIN.0,
                Score::MAX.0
            ),
        }
    }
}

impl Error for ScoreError {}

impl Score {
    /// Lowest rating ("None").
    pub const MIN: Score = Score(0);
    /// Highest rating ("Expert").
    pub const MAX: Score = Score(5);
    /// Rating assigned when no explicit value is supplied ("Basic").
    pub const DEFAULT: Score = Score(2);

    /// Creates a score, rejecting values outside `[0, 5]`.
    pub fn new(value: i64) -> Result<Self, ScoreError> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScoreError::OutOfRange(value))
        }
    }

    /// Creates a score by clamping into `[0, 5]`.
    ///
    /// Only repair paths use this; interactive entry goes through `new`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Semantic label for display (`None` .. `Expert`).
    pub fn label(self) -> &'static str {
        SCORE_LABELS[usize::from(self.0)]
    }

    /// All valid scores in ascending order.
    pub fn all() -> impl Iterator<Item = Score> {
        (Self::MIN.0..=Self::MAX.0).map(Score)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}
