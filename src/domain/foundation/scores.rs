//! Bounded score value objects.
//!
//! Every score the core produces or consumes is range-checked at
//! construction, so arithmetic downstream never has to re-validate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A score in the closed interval [0, 1].
///
/// Used for alignment scores, dimension scores, profile weights, and
/// confidence values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitScore(f64);

impl UnitScore {
    /// Zero score.
    pub const ZERO: Self = Self(0.0);

    /// Neutral midpoint score.
    pub const NEUTRAL: Self = Self(0.5);

    /// Maximum score.
    pub const ONE: Self = Self(1.0);

    /// Creates a new UnitScore, clamping to [0, 1].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a UnitScore, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("unit_score", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true when the score is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for UnitScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for UnitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for UnitScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<UnitScore> for f64 {
    fn from(score: UnitScore) -> f64 {
        score.0
    }
}

/// Profile weights share the [0, 1] range and validation of [`UnitScore`].
pub type Weight = UnitScore;

/// A score in the closed interval [-1, 1].
///
/// Used for emotional valence, domain reputation, and productivity and
/// wellbeing impact estimates. Zero is neutral.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignedScore(f64);

impl SignedScore {
    /// Neutral score.
    pub const NEUTRAL: Self = Self(0.0);

    /// Creates a new SignedScore, clamping to [-1, 1].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    /// Creates a SignedScore, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(-1.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "signed_score",
                -1.0,
                1.0,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true when the score is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Returns true when the score is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }
}

impl Default for SignedScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for SignedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

impl TryFrom<f64> for SignedScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SignedScore> for f64 {
    fn from(score: SignedScore) -> f64 {
        score.0
    }
}

/// An explicit feedback rating: -1 (too lenient), 0 (neutral), +1 (too strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Rating(i8);

impl Rating {
    /// The system was too strict; the user wanted to see the content.
    pub const TOO_STRICT: Self = Self(1);

    /// The decision felt right.
    pub const NEUTRAL: Self = Self(0);

    /// The system was too lenient; the user did not want the content.
    pub const TOO_LENIENT: Self = Self(-1);

    /// Creates a Rating, returning error unless the value is -1, 0, or +1.
    pub fn try_new(value: i8) -> Result<Self, ValidationError> {
        if !(-1..=1).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                -1.0,
                1.0,
                f64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

impl TryFrom<i8> for Rating {
    type Error = ValidationError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Rating> for i8 {
    fn from(rating: Rating) -> i8 {
        rating.0
    }
}
