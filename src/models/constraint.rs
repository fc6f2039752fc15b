//! Constraint configuration and fitness weights.
//!
//! Hard rules are always enforced. Soft rules are preferences switched on
//! or off per run through [`ConstraintConfig`].

use serde::{Deserialize, Deserializer, Serialize};

use super::ClockTime;

/// A configurable soft rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftRule {
    /// Penalize idle gaps between consecutive occupied slots of a teacher
    /// or room on the same day.
    NoGaps,
    /// Penalize uneven course counts across days.
    BalanceDays,
    /// Penalize blocks that use a late Friday slot.
    AvoidFridayEvening,
}

/// Per-run soft-rule switches.
///
/// Field names follow the upstream request payload; both camelCase and
/// snake_case spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstraintConfig {
    /// When `false`, idle gaps are penalized.
    #[serde(alias = "allow_gaps")]
    pub allow_gaps: bool,
    /// When `true`, uneven distribution across days is penalized.
    #[serde(alias = "balance_days")]
    pub balance_days: bool,
    /// When `true`, late Friday slots are penalized.
    #[serde(alias = "avoid_friday_evening", alias = "avoid_friday_evening_slots")]
    pub avoid_friday_evening_slots: bool,
    /// Variance of per-day course counts tolerated before penalizing
    /// (never negative).
    #[serde(alias = "balance_threshold", deserialize_with = "non_negative")]
    pub balance_threshold: f64,
    /// Friday slots starting at or after this time count as "late".
    #[serde(alias = "friday_evening_from")]
    pub friday_evening_from: ClockTime,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            allow_gaps: true,
            balance_days: false,
            avoid_friday_evening_slots: false,
            balance_threshold: 1.0,
            friday_evening_from: ClockTime(16 * 60),
        }
    }
}

impl ConstraintConfig {
    /// Creates a configuration with every soft rule disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether idle gaps are allowed.
    pub fn with_allow_gaps(mut self, allow: bool) -> Self {
        self.allow_gaps = allow;
        self
    }

    /// Sets whether day balance is enforced.
    pub fn with_balance_days(mut self, balance: bool) -> Self {
        self.balance_days = balance;
        self
    }

    /// Sets whether late Friday slots are penalized.
    pub fn with_avoid_friday_evening(mut self, avoid: bool) -> Self {
        self.avoid_friday_evening_slots = avoid;
        self
    }

    /// Sets the tolerated per-day count variance.
    pub fn with_balance_threshold(mut self, threshold: f64) -> Self {
        self.balance_threshold = threshold.max(0.0);
        self
    }

    /// Sets the start of the "late Friday" window.
    pub fn with_friday_evening_from(mut self, from: ClockTime) -> Self {
        self.friday_evening_from = from;
        self
    }

    /// Soft rules enabled by this configuration.
    pub fn enabled_rules(&self) -> Vec<SoftRule> {
        let mut rules = Vec::with_capacity(3);
        if !self.allow_gaps {
            rules.push(SoftRule::NoGaps);
        }
        if self.balance_days {
            rules.push(SoftRule::BalanceDays);
        }
        if self.avoid_friday_evening_slots {
            rules.push(SoftRule::AvoidFridayEvening);
        }
        rules
    }

    /// Whether a soft rule is enabled.
    pub fn is_enabled(&self, rule: SoftRule) -> bool {
        match rule {
            SoftRule::NoGaps => !self.allow_gaps,
            SoftRule::BalanceDays => self.balance_days,
            SoftRule::AvoidFridayEvening => self.avoid_friday_evening_slots,
        }
    }
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    // f64::max maps NaN to the other operand.
    Ok(f64::deserialize(deserializer)?.max(0.0))
}

/// Weights combining violation counts into a scalar fitness.
///
/// `fitness = -(hard * hard_count + soft * soft_count)`, maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight of one hard violation.
    pub hard: u64,
    /// Weight of one soft violation.
    pub soft: u64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self { hard: 1000, soft: 1 }
    }
}

impl FitnessWeights {
    /// Creates custom weights. `soft` is at least 1.
    pub fn new(hard: u64, soft: u64) -> Self {
        Self {
            hard,
            soft: soft.max(1),
        }
    }

    /// Raises the hard weight so that one hard violation outweighs
    /// `max_soft` soft violations.
    pub fn dominating(self, max_soft: u64) -> Self {
        let floor = self.soft.saturating_mul(max_soft.saturating_add(1));
        Self {
            hard: self.hard.max(floor),
            soft: self.soft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disables_soft_rules() {
        let c = ConstraintConfig::default();
        assert!(c.enabled_rules().is_empty());
        assert_eq!(c.friday_evening_from.to_string(), "16:00");
    }

    #[test]
    fn test_enabled_rules() {
        let c = ConstraintConfig::new()
            .with_allow_gaps(false)
            .with_balance_days(true)
            .with_avoid_friday_evening(true);
        assert_eq!(
            c.enabled_rules(),
            vec![SoftRule::NoGaps, SoftRule::BalanceDays, SoftRule::AvoidFridayEvening]
        );
        assert!(c.is_enabled(SoftRule::NoGaps));
    }

    #[test]
    fn test_deserialize_both_spellings() {
        let c: ConstraintConfig = serde_json::from_str(
            r#"{"allow_gaps": false, "balance_days": true, "avoid_friday_evening": true}"#,
        )
        .unwrap();
        assert!(!c.allow_gaps);
        assert!(c.balance_days);
        assert!(c.avoid_friday_evening_slots);

        let c: ConstraintConfig =
            serde_json::from_str(r#"{"avoidFridayEveningSlots": true, "fridayEveningFrom": "17:30"}"#)
                .unwrap();
        assert!(c.avoid_friday_evening_slots);
        assert!(c.allow_gaps);
        assert_eq!(c.friday_evening_from.minutes(), 17 * 60 + 30);
    }

    #[test]
    fn test_threshold_clamped_on_every_path() {
        let c: ConstraintConfig = serde_json::from_str(r#"{"balanceThreshold": -3.5}"#).unwrap();
        assert_eq!(c.balance_threshold, 0.0);

        let c: ConstraintConfig = serde_json::from_str(r#"{"balance_threshold": 2.5}"#).unwrap();
        assert_eq!(c.balance_threshold, 2.5);

        let c: ConstraintConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c.balance_threshold, 1.0);

        assert_eq!(ConstraintConfig::new().with_balance_threshold(f64::NAN).balance_threshold, 0.0);
        assert_eq!(ConstraintConfig::new().with_balance_threshold(-1.0).balance_threshold, 0.0);
    }

    #[test]
    fn test_weights_dominating() {
        let w = FitnessWeights::default();
        assert_eq!(w.dominating(10).hard, 1000);
        assert_eq!(w.dominating(5000).hard, 5001);
        assert_eq!(FitnessWeights::new(10, 0).soft, 1);
    }
}
