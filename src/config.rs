//! Integrator-wide tuning knobs: one plain struct with a `Default` impl,
//! no global mutable state.

use crate::error::BdptError;
use crate::float::Float;

/// Configuration shared by the BDPT integrator and the baseline path
/// tracer.
#[derive(Clone, Debug)]
pub struct BdptConfig {
    /// Maximum number of bounces per subpath (>= 1). Bounds the vertex
    /// budget: each subpath's `Path` is preallocated to `max_depth + 1`.
    pub max_depth: usize,
    /// Bounce index (0-based) at which Russian roulette starts being
    /// rolled for path extension.
    pub rr_start_depth: usize,
    /// Clamp bounds for the Russian roulette survival probability, used
    /// both by the path extender and by the baseline path tracer
    /// (`clamp(luminance(beta), 0.5, 0.95)`).
    pub rr_min: Float,
    pub rr_max: Float,
    /// Minimum number of *forced* (no-roulette) bounces in the baseline
    /// path tracer.
    pub rr_min_bounces: usize,
    /// Whether `t = 1` light-tracing strategies should produce splats.
    /// Disabling this is useful for tests that only want the direct
    /// per-pixel estimate and have nowhere to route splats.
    pub collect_splats: bool,
    /// Enables a human-readable per-strategy debug trace to stdout.
    pub verbose: bool,
}

impl Default for BdptConfig {
    fn default() -> Self {
        BdptConfig {
            max_depth: 5,
            rr_start_depth: 3,
            rr_min: 0.5,
            rr_max: 0.95,
            rr_min_bounces: 3,
            collect_splats: true,
            verbose: false,
        }
    }
}

impl BdptConfig {
    /// Checks the handful of invariants that would otherwise make the
    /// integrator misbehave (an empty vertex budget, an inverted
    /// roulette clamp range).
    pub fn validate(&self) -> Result<(), BdptError> {
        if self.max_depth == 0 {
            return Err(BdptError::InvalidMaxDepth(self.max_depth));
        }
        if !(0.0..=1.0).contains(&self.rr_min)
            || !(0.0..=1.0).contains(&self.rr_max)
            || self.rr_min > self.rr_max
        {
            return Err(BdptError::InvalidRouletteRange {
                min: self.rr_min,
                max: self.rr_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(BdptConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = BdptConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_roulette_range_is_rejected() {
        let config = BdptConfig {
            rr_min: 0.9,
            rr_max: 0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
