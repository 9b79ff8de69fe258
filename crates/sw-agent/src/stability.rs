//! `Stability` — the depletable per-agent resource.

use std::fmt;

use sw_core::{SwError, SwResult};

/// A stability value, guaranteed to lie in `[0, 1]`.
///
/// Every constructor clamps, so no writer can store an out-of-range value.
/// NaN becomes 0; ±∞ clamp to the nearest bound.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stability(f64);

impl Stability {
    pub const EMPTY: Stability = Stability(0.0);
    pub const FULL: Stability = Stability(1.0);

    /// Clamp `value` into range.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_nan() { Self::EMPTY } else { Stability(value.clamp(0.0, 1.0)) }
    }

    /// Strict constructor for administrative input: rejects rather than
    /// clamps.
    pub fn try_new(value: f64) -> SwResult<Self> {
        if !value.is_finite() {
            return Err(SwError::NonFinite { what: "stability", value });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(SwError::OutOfRange { what: "stability", value });
        }
        Ok(Stability(value))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Subtract `amount` and clamp.
    #[inline]
    pub fn drained(self, amount: f64) -> Self {
        Self::new(self.0 - amount)
    }

    /// Value as a whole percentage, for human-readable messages.
    #[inline]
    pub fn percent(self) -> f64 {
        (self.0 * 100.0).round()
    }
}

impl From<f64> for Stability {
    #[inline]
    fn from(v: f64) -> Self {
        Stability::new(v)
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
