use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

/// A non-NaN f64 value in the range [0, 1].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Normalized(NotNan<f64>);

impl Normalized {
    pub const ZERO: Self = Self(unsafe { NotNan::new_unchecked(0.0) });
    pub const HALF: Self = Self(unsafe { NotNan::new_unchecked(0.5) });
    pub const ONE: Self = Self(unsafe { NotNan::new_unchecked(1.0) });

    /// Returns `None` for NaN and values outside [0, 1]. Negative zero is accepted as zero.
    pub fn new(value: f64) -> Option<Self> {
        // Adding zero turns -0.0 into 0.0.
        let value = NotNan::new(value + 0.0).ok()?;
        if value.is_sign_negative() || *value > 1.0 {
            return None;
        }
        Some(Self(value))
    }

    /// Clamp a value into [0, 1]. Returns `None` for NaN.
    pub fn clamp(value: f64) -> Option<Self> {
        Self::new(value.clamp(0.0, 1.0))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }

    /// `1 - self`, used to flip the scale of minimized criteria.
    pub fn complement(&self) -> Self {
        Self::clamp(1.0 - self.as_f64()).unwrap_or(Self::ZERO)
    }
}

impl std::ops::Mul<Weight> for Normalized {
    type Output = Self;
    fn mul(self, rhs: Weight) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::cmp::PartialOrd for Normalized {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for Normalized {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Debug for Normalized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Normalized> for f64 {
    fn from(value: Normalized) -> Self {
        value.as_f64()
    }
}

impl TryFrom<f64> for Normalized {
    type Error = OutOfRange;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(OutOfRange(value))
    }
}

/// The relative importance of a criterion: a non-NaN f64 value in the range [0, 1].
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Weight(NotNan<f64>);

impl Weight {
    pub const ZERO: Self = Self(unsafe { NotNan::new_unchecked(0.0) });
    pub const ONE: Self = Self(unsafe { NotNan::new_unchecked(1.0) });

    pub fn new(value: f64) -> Option<Self> {
        Normalized::new(value).map(|n| Self(n.0))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }
}

impl std::fmt::Debug for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.as_f64()
    }
}

impl TryFrom<f64> for Weight {
    type Error = OutOfRange;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(OutOfRange(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("{0} is outside of the range [0, 1]")]
pub struct OutOfRange(pub f64);

#[track_caller]
pub fn assert_within(value: f64, expected: f64, tolerance: f64) {
    let diff = (value - expected).abs();
    assert!(
        diff <= tolerance,
        "Expected value of {expected} +- {tolerance} but got {value} which is off by {diff}",
    );
}
