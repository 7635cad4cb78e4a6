//! Invocation settings and partial updates.

use serde::{Deserialize, Serialize};

use crate::error::{PorticoError, Result};

/// Sampling settings passed to every model invocation.
///
/// Always satisfies its ranges once constructed through the public API:
/// `max_tokens > 0`, `temperature` and `top_p` within `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for InvocationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

impl InvocationSettings {
    /// Checks every range, reporting the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(PorticoError::SettingsOutOfRange {
                field: "max_tokens",
                value: f64::from(self.max_tokens),
            });
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(PorticoError::SettingsOutOfRange {
                field: "temperature",
                value: f64::from(self.temperature),
            });
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(PorticoError::SettingsOutOfRange {
                field: "top_p",
                value: f64::from(self.top_p),
            });
        }
        Ok(())
    }

    /// Applies a partial update all-or-nothing.
    ///
    /// The update is validated as a whole; if any field is out of range the
    /// previous values are retained and the offending field is reported.
    pub fn apply(&mut self, update: SettingsUpdate) -> Result<()> {
        let mut candidate = self.clone();
        if let Some(max_tokens) = update.max_tokens {
            candidate.max_tokens = max_tokens;
        }
        if let Some(temperature) = update.temperature {
            candidate.temperature = temperature;
        }
        if let Some(top_p) = update.top_p {
            candidate.top_p = top_p;
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

/// A partial settings change; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = InvocationSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_tokens, 4000);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut settings = InvocationSettings::default();
        settings
            .apply(SettingsUpdate {
                temperature: Some(0.2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.max_tokens, 4000);
    }

    #[test]
    fn test_out_of_range_update_retains_previous_values() {
        let mut settings = InvocationSettings::default();
        let err = settings
            .apply(SettingsUpdate {
                max_tokens: Some(100),
                temperature: Some(1.5),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PorticoError::SettingsOutOfRange {
                field: "temperature",
                ..
            }
        ));
        // The whole update is rejected, including the valid max_tokens part.
        assert_eq!(settings.max_tokens, 4000);
        assert_eq!(settings.temperature, 0.7);
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let mut settings = InvocationSettings::default();
        let err = settings
            .apply(SettingsUpdate {
                max_tokens: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PorticoError::SettingsOutOfRange {
                field: "max_tokens",
                ..
            }
        ));
    }
}
