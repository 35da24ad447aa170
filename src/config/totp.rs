//! Two-factor (TOTP) configuration.

use super::env_parse;

/// Parameters for time-based one-time passwords
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TotpConfig {
    pub step_seconds: u64,
    pub digits: u32,
    /// Number of adjacent steps accepted on either side of the current one
    pub skew: u64,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            step_seconds: 30,
            digits: 6,
            skew: 1,
        }
    }
}

impl TotpConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            step_seconds: env_parse("TOTP_STEP_SECS", defaults.step_seconds).max(1),
            digits: env_parse("TOTP_DIGITS", defaults.digits).clamp(6, 8),
            skew: env_parse("TOTP_SKEW", defaults.skew),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::ENV_MUTEX;
    use std::env;

    #[test]
    fn test_totp_config_clamps_digits() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::set_var("TOTP_DIGITS", "12");
            env::set_var("TOTP_STEP_SECS", "0");
        }

        let config = TotpConfig::from_env();
        assert_eq!(config.digits, 8);
        assert_eq!(config.step_seconds, 1);
        assert_eq!(config.skew, 1);

        unsafe {
            env::remove_var("TOTP_DIGITS");
            env::remove_var("TOTP_STEP_SECS");
        }
    }
}
