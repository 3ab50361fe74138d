//! Configuration for curve analysis.

use serde::{Deserialize, Serialize};

/// What to do when an event line cannot be resolved in the input
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegeneracyStrategy {
    /// Report the event as a non-generic position error.
    Exception,
    /// Shear the curve into generic position and map the result back.
    #[default]
    Shear,
    /// Resolve rational events exactly, and shear only for irrational ones.
    ShearOnlyAtIrrational,
}

/// How to treat events where the leading coefficient in `y` vanishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadingCoefficientPolicy {
    /// Every such event is non-generic.
    Strict,
    /// Such an event is fine as long as the remaining fibre is square-free;
    /// arcs escaping to infinity are counted as vertical asymptotes.
    #[default]
    Tolerant,
}

/// Curve analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveAnalysisConfig {
    /// Degeneracy handling
    pub strategy: DegeneracyStrategy,
    /// Leading coefficient handling
    pub lcoeff_policy: LeadingCoefficientPolicy,
    /// Shear factors tried before giving up
    pub max_shear_attempts: usize,
    /// Capacity of the rational-x root cache (0 disables caching)
    pub root_cache_capacity: usize,
}

impl Default for CurveAnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: DegeneracyStrategy::default(),
            lcoeff_policy: LeadingCoefficientPolicy::default(),
            max_shear_attempts: 32,
            root_cache_capacity: 128,
        }
    }
}

impl CurveAnalysisConfig {
    /// Configuration that never shears and rejects every degenerate event.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strategy: DegeneracyStrategy::Exception,
            lcoeff_policy: LeadingCoefficientPolicy::Strict,
            ..Self::default()
        }
    }

    /// Set the degeneracy strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: DegeneracyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the leading coefficient policy.
    #[must_use]
    pub fn with_lcoeff_policy(mut self, policy: LeadingCoefficientPolicy) -> Self {
        self.lcoeff_policy = policy;
        self
    }

    /// Set the shear attempt limit.
    #[must_use]
    pub fn with_max_shear_attempts(mut self, attempts: usize) -> Self {
        self.max_shear_attempts = attempts;
        self
    }
}
