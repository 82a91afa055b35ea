use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::currency::CurrencyCode;

/// Longest default event duration accepted from a config file.
pub const MAX_EVENT_DURATION_DAYS: i64 = 3650;

/// Tunables shared by the concrete wizards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Gate the terminal review step on the consent toggle. When false the
    /// review step always validates.
    #[serde(default = "WizardConfig::default_require_review_consent")]
    pub require_review_consent: bool,
    #[serde(default = "WizardConfig::default_target_unit")]
    pub default_target_unit: String,
    #[serde(default = "WizardConfig::default_event_duration_days")]
    pub default_event_duration_days: i64,
    #[serde(default)]
    pub currency_code: CurrencyCode,
    #[serde(default = "WizardConfig::default_minor_units_per_unit")]
    pub minor_units_per_unit: u32,
    #[serde(default = "WizardConfig::default_max_entry_fee")]
    pub max_entry_fee: f64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            require_review_consent: Self::default_require_review_consent(),
            default_target_unit: Self::default_target_unit(),
            default_event_duration_days: Self::default_event_duration_days(),
            currency_code: CurrencyCode::default(),
            minor_units_per_unit: Self::default_minor_units_per_unit(),
            max_entry_fee: Self::default_max_entry_fee(),
        }
    }
}

impl WizardConfig {
    fn default_require_review_consent() -> bool {
        true
    }

    fn default_target_unit() -> String {
        "distance".into()
    }

    fn default_event_duration_days() -> i64 {
        7
    }

    fn default_minor_units_per_unit() -> u32 {
        100
    }

    fn default_max_entry_fee() -> f64 {
        1_000_000.0
    }

    /// Default event length, or `None` when the configured day count does not
    /// fit a duration.
    pub fn default_event_duration(&self) -> Option<TimeDelta> {
        TimeDelta::try_days(self.default_event_duration_days)
    }

    /// Rejects values the wizards cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minor_units_per_unit == 0 {
            return Err(ConfigError::Invalid(
                "minor_units_per_unit must be at least 1".into(),
            ));
        }
        if !(1..=MAX_EVENT_DURATION_DAYS).contains(&self.default_event_duration_days) {
            return Err(ConfigError::Invalid(format!(
                "default_event_duration_days must be between 1 and {MAX_EVENT_DURATION_DAYS}"
            )));
        }
        if !self.max_entry_fee.is_finite() || self.max_entry_fee < 0.0 {
            return Err(ConfigError::Invalid(
                "max_entry_fee must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
