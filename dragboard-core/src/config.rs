//! Tunable transform policy parameters
//!
//! The minimum widget size, the resize rejection tolerance, and the control
//! handle geometry are configuration rather than literals, so hosts can
//! adjust them per deployment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy parameters for widget transforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Smallest committed width or height, in container units
    #[serde(default = "default_min_size")]
    pub min_size: f64,

    /// How far (in container units) a resize may push the anchor position
    /// off its target before the update is rejected
    #[serde(default = "default_reject_tolerance")]
    pub reject_tolerance: f64,

    /// Diameter of a control handle, in container units
    #[serde(default = "default_handle_size")]
    pub handle_size: f64,

    /// Outward offset of the handle frame from the widget edge
    #[serde(default = "default_handle_offset")]
    pub handle_offset: f64,
}

fn default_min_size() -> f64 {
    30.0
}

fn default_reject_tolerance() -> f64 {
    1.0
}

fn default_handle_size() -> f64 {
    30.0
}

fn default_handle_offset() -> f64 {
    15.0
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            reject_tolerance: default_reject_tolerance(),
            handle_size: default_handle_size(),
            handle_offset: default_handle_offset(),
        }
    }
}

/// Errors from validating a [`TransformConfig`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("min_size must be positive, got {0}")]
    NonPositiveMinSize(f64),

    #[error("reject_tolerance must be non-negative, got {0}")]
    NegativeTolerance(f64),

    #[error("handle_offset must be non-negative, got {0}")]
    NegativeHandleOffset(f64),
}

impl TransformConfig {
    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_size > 0.0) {
            return Err(ConfigError::NonPositiveMinSize(self.min_size));
        }
        if !(self.reject_tolerance >= 0.0) {
            return Err(ConfigError::NegativeTolerance(self.reject_tolerance));
        }
        if !(self.handle_offset >= 0.0) {
            return Err(ConfigError::NegativeHandleOffset(self.handle_offset));
        }
        Ok(())
    }
}
