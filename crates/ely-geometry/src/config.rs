//! Collision configuration.
//!
//! A [`CollisionConfig`] can be built in code or loaded from TOML:
//!
//! ```
//! use ely_geometry::{CollisionConfig, RadiusPolicy};
//!
//! let config = CollisionConfig::from_toml_str(
//!     r#"
//!     epsilon = 0.001
//!     radius_policy = "strict"
//!     "#,
//! )?;
//! assert_eq!(config.radius_policy, RadiusPolicy::Strict);
//! # Ok::<(), ely_geometry::GeometryError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// How a [`Collider`](crate::Collider) treats spheres with a negative or
/// non-finite radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusPolicy {
    /// Accept any radius and compute with it as given.
    #[default]
    Lenient,
    /// Reject bad radii with [`GeometryError::InvalidRadius`].
    Strict,
}

/// Tuning for collision queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Slack added to every distance comparison. Zero gives exact,
    /// boundary-inclusive tests.
    pub epsilon: f64,
    /// Radius validation policy.
    pub radius_policy: RadiusPolicy,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.0,
            radius_policy: RadiusPolicy::Lenient,
        }
    }
}

impl CollisionConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison slack.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the radius policy.
    pub fn with_radius_policy(mut self, policy: RadiusPolicy) -> Self {
        self.radius_policy = policy;
        self
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> GeometryResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that `epsilon` is finite and non-negative.
    pub fn validate(&self) -> GeometryResult<()> {
        if self.epsilon.is_finite() && self.epsilon >= 0.0 {
            Ok(())
        } else {
            Err(GeometryError::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )))
        }
    }
}
