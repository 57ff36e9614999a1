use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::phase::Phase;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Per-session timing configuration, immutable once a session is running.
///
/// Durations are wall-clock seconds. Changing them mid-session requires a
/// `stop()` and a fresh machine; the state machine never re-reads config
/// between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inhale phase duration
    pub inhale_sec: f32,
    /// Hold after the inhale
    pub hold_in_sec: f32,
    /// Exhale phase duration
    pub exhale_sec: f32,
    /// Rest after the exhale
    pub hold_out_sec: f32,
    /// Total guided-session length
    pub total_session_sec: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        // Box breathing, 5 minute session
        Self {
            inhale_sec: 4.0,
            hold_in_sec: 4.0,
            exhale_sec: 4.0,
            hold_out_sec: 4.0,
            total_session_sec: 300.0,
        }
    }
}

impl SessionConfig {
    /// Duration of one phase. Total over the closed `Phase` enum; there is
    /// no invalid-phase path.
    pub fn phase_duration(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Inhale => self.inhale_sec,
            Phase::HoldIn => self.hold_in_sec,
            Phase::Exhale => self.exhale_sec,
            Phase::HoldOut => self.hold_out_sec,
        }
    }

    /// Duration of one full four-phase cycle.
    pub fn cycle_sec(&self) -> f32 {
        self.inhale_sec + self.hold_in_sec + self.exhale_sec + self.hold_out_sec
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: SessionConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    /// Variables are prefixed with BREATHBOX_, e.g. BREATHBOX_INHALE_SEC=5.5
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub(crate) fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        use std::env;

        fn override_f32(target: &mut f32, var: &str) -> Result<(), ConfigError> {
            if let Ok(val) = env::var(var) {
                *target = val
                    .parse()
                    .map_err(|_| ConfigError::Validation(format!("Invalid {}", var)))?;
            }
            Ok(())
        }

        override_f32(&mut self.inhale_sec, "BREATHBOX_INHALE_SEC")?;
        override_f32(&mut self.hold_in_sec, "BREATHBOX_HOLD_IN_SEC")?;
        override_f32(&mut self.exhale_sec, "BREATHBOX_EXHALE_SEC")?;
        override_f32(&mut self.hold_out_sec, "BREATHBOX_HOLD_OUT_SEC")?;
        override_f32(&mut self.total_session_sec, "BREATHBOX_TOTAL_SESSION_SEC")?;

        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Holds may be zero (hold-free patterns like 4-7-8 use this); the
    /// active phases, the cycle, and the session must have positive length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let phases = [
            ("inhale_sec", self.inhale_sec),
            ("hold_in_sec", self.hold_in_sec),
            ("exhale_sec", self.exhale_sec),
            ("hold_out_sec", self.hold_out_sec),
        ];
        for (name, value) in phases {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{} must be finite and non-negative",
                    name
                )));
            }
        }
        if self.inhale_sec <= 0.0 {
            return Err(ConfigError::Validation(
                "inhale_sec must be positive".to_string(),
            ));
        }
        if self.exhale_sec <= 0.0 {
            return Err(ConfigError::Validation(
                "exhale_sec must be positive".to_string(),
            ));
        }
        if self.cycle_sec() <= 0.0 {
            return Err(ConfigError::Validation(
                "cycle duration must be positive".to_string(),
            ));
        }
        if !self.total_session_sec.is_finite() || self.total_session_sec <= 0.0 {
            return Err(ConfigError::Validation(
                "total_session_sec must be finite and positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Export configuration to TOML string
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self
            .to_toml_string()
            .map_err(|e| ConfigError::Validation(format!("TOML serialization error: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
