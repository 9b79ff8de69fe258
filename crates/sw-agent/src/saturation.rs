//! Food-saturation limits tied to survival time.
//!
//! ```text
//!   max saturation
//!   base + bonus ┤            ┌──────────
//!                │          ╱
//!           base ┼────────┘ linear in age, full bonus at `days_to_full_bonus`
//!                0                          age (days)
//! ```
//!
//! An agent whose age is unknown gets `join_max` instead.

/// Saturation caps applied by [`AgentRoster`][crate::AgentRoster].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SaturationRules {
    /// Max saturation for an agent whose age is unknown.
    pub join_max:           f64,
    /// Max saturation at age 0.  A fresh start fills half of it.
    pub base_max:           f64,
    /// Extra max saturation reached after `days_to_full_bonus` days.
    pub age_bonus:          f64,
    pub days_to_full_bonus: f64,
}

impl Default for SaturationRules {
    fn default() -> Self {
        Self {
            join_max:           2_000.0,
            base_max:           1_500.0,
            age_bonus:          1_500.0,
            days_to_full_bonus: 30.0,
        }
    }
}

impl SaturationRules {
    /// `base_max + clamp(age_bonus * age / days_to_full_bonus, 0, age_bonus)`,
    /// or `join_max` when the age is unknown or NaN.
    pub fn max_for(&self, age_days: Option<f64>) -> f64 {
        let Some(age) = age_days.filter(|a| !a.is_nan()) else {
            return self.join_max;
        };
        let bonus = self.age_bonus.max(0.0);
        let earned = if self.days_to_full_bonus > 0.0 {
            (bonus * age / self.days_to_full_bonus).clamp(0.0, bonus)
        } else {
            bonus
        };
        self.base_max + earned
    }

    /// `(saturation, max_saturation)` for an agent starting over at age 0.
    /// Starting outside the shelter means starting hungry.
    pub fn fresh_start(&self, sheltered: bool) -> (f64, f64) {
        let saturation = if sheltered { self.base_max / 2.0 } else { 0.0 };
        (saturation, self.base_max)
    }
}
