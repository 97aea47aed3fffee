//! # Simulation Configuration
//!
//! Runtime settings for the delivery simulation. The config is injected into the Order actor
//! as its context, and the tick period drives the [`SimulationClock`](crate::framework::SimulationClock).
//!
//! Settings come from, in increasing precedence:
//! 1. [`SimulationConfig::default`]
//! 2. a JSON document ([`SimulationConfig::from_json`]); missing fields keep their defaults
//! 3. `AMANA_*` environment variables ([`SimulationConfig::from_env`])

use crate::model::OrderKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const ENV_TICK_PERIOD_MS: &str = "AMANA_TICK_PERIOD_MS";
pub const ENV_PROGRESS_STEP: &str = "AMANA_PROGRESS_STEP";
pub const ENV_MARKETPLACE_ETA: &str = "AMANA_MARKETPLACE_ETA_MINUTES";
pub const ENV_ERRAND_ETA: &str = "AMANA_ERRAND_ETA_MINUTES";
pub const ENV_DELIVERY_FEE: &str = "AMANA_DELIVERY_FEE";
pub const ENV_MAILBOX_SIZE: &str = "AMANA_MAILBOX_SIZE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wall-clock time between two ticks of a tracked order.
    pub tick_period_ms: u64,
    /// Fraction of the route covered per tick.
    pub progress_step: f64,
    pub marketplace_eta_minutes: u32,
    pub errand_eta_minutes: u32,
    /// Flat fee added to marketplace checkouts.
    pub marketplace_delivery_fee: f64,
    /// Capacity of the Order actor's request channel.
    pub mailbox_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 1000,
            progress_step: 0.005,
            marketplace_eta_minutes: 20,
            errand_eta_minutes: 35,
            marketplace_delivery_fee: 5.0,
            mailbox_size: 32,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by any `AMANA_*` variables set in the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name. Split from [`Self::from_env`] so tests
    /// do not have to mutate the process environment.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = parse_var(&lookup, ENV_TICK_PERIOD_MS)? {
            self.tick_period_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_PROGRESS_STEP)? {
            self.progress_step = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MARKETPLACE_ETA)? {
            self.marketplace_eta_minutes = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_ERRAND_ETA)? {
            self.errand_eta_minutes = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_DELIVERY_FEE)? {
            self.marketplace_delivery_fee = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MAILBOX_SIZE)? {
            self.mailbox_size = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be positive".into()));
        }
        if !(self.progress_step > 0.0 && self.progress_step <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "progress_step must be in (0, 1], got {}",
                self.progress_step
            )));
        }
        if !(self.marketplace_delivery_fee.is_finite() && self.marketplace_delivery_fee >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "marketplace_delivery_fee must be a non-negative amount, got {}",
                self.marketplace_delivery_fee
            )));
        }
        if self.marketplace_eta_minutes == 0 || self.errand_eta_minutes == 0 {
            return Err(ConfigError::Invalid(
                "base eta minutes must be at least 1".into(),
            ));
        }
        if self.mailbox_size == 0 {
            return Err(ConfigError::Invalid("mailbox_size must be positive".into()));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// ETA a new order of `kind` starts with.
    pub fn base_eta_minutes(&self, kind: OrderKind) -> u32 {
        match kind {
            OrderKind::Marketplace => self.marketplace_eta_minutes,
            OrderKind::Errand => self.errand_eta_minutes,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value }),
    }
}
