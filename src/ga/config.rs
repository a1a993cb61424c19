//! Evolver configuration.
//!
//! [`EvolverConfig`] holds the parameters of the memetic loop. The stopping
//! rule is not part of it: callers pass a predicate to
//! [`Evolver::solve`](super::Evolver::solve).

use serde::{Deserialize, Serialize};

use super::operators::Inversion;
use crate::error::{Result, TspError};

/// Configuration for the memetic evolver.
///
/// # Defaults
///
/// ```
/// use u_tsp_memetic::ga::EvolverConfig;
///
/// let config = EvolverConfig::default();
/// assert_eq!(config.min_population, 5);
/// assert_eq!(config.max_not_improving, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp_memetic::ga::{EvolverConfig, Inversion};
///
/// let config = EvolverConfig::default()
///     .with_min_population(8)
///     .with_mutation_rate(0.1)
///     .with_inversion(Inversion::SwapEnds)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolverConfig {
    /// Lower population bound; extinction never culls below it.
    ///
    /// Also scales the parent window and the fill attempt budget.
    pub min_population: usize,

    /// Probability of swap-mutating each child (0.0–1.0).
    pub mutation_rate: f64,

    /// Generations without a new best before an extinction.
    pub max_not_improving: usize,

    /// Expected share of the cost mass killed by an extinction (0.0–1.0).
    pub massacre_percentage: f64,

    /// Perturbation applied to a child whose cost collides with a member.
    pub inversion: Inversion,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed; the seed actually used is reported in the
    /// result either way.
    pub seed: Option<u64>,
}

impl Default for EvolverConfig {
    fn default() -> Self {
        Self {
            min_population: 5,
            mutation_rate: 0.2,
            max_not_improving: 50,
            massacre_percentage: 0.5,
            inversion: Inversion::Reverse,
            seed: None,
        }
    }
}

impl EvolverConfig {
    /// Sets the minimum population size.
    pub fn with_min_population(mut self, n: usize) -> Self {
        self.min_population = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation threshold that triggers an extinction.
    pub fn with_max_not_improving(mut self, generations: usize) -> Self {
        self.max_not_improving = generations;
        self
    }

    /// Sets the expected kill fraction of an extinction.
    pub fn with_massacre_percentage(mut self, fraction: f64) -> Self {
        self.massacre_percentage = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the collision-breaking inversion variant.
    pub fn with_inversion(mut self, inversion: Inversion) -> Self {
        self.inversion = inversion;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for short runs: small floor, quick extinctions.
    pub fn fast() -> Self {
        Self {
            min_population: 3,
            max_not_improving: 20,
            ..Self::default()
        }
    }

    /// Preset for long runs: wider parent window, patient extinctions.
    pub fn thorough() -> Self {
        Self {
            min_population: 8,
            max_not_improving: 100,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_population == 0 {
            return Err(TspError::InvalidConfig(
                "min_population must be at least 1".into(),
            ));
        }
        if self.max_not_improving == 0 {
            return Err(TspError::InvalidConfig(
                "max_not_improving must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.massacre_percentage) {
            return Err(TspError::InvalidConfig(
                "massacre_percentage must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolverConfig::default();
        assert_eq!(config.min_population, 5);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.max_not_improving, 50);
        assert!((config.massacre_percentage - 0.5).abs() < 1e-10);
        assert_eq!(config.inversion, Inversion::Reverse);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolverConfig::default()
            .with_min_population(10)
            .with_mutation_rate(1.5)
            .with_max_not_improving(7)
            .with_massacre_percentage(-0.3)
            .with_inversion(Inversion::SwapEnds)
            .with_seed(9);
        assert_eq!(config.min_population, 10);
        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.max_not_improving, 7);
        assert_eq!(config.massacre_percentage, 0.0);
        assert_eq!(config.inversion, Inversion::SwapEnds);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(EvolverConfig::fast().validate().is_ok());
        assert!(EvolverConfig::thorough().validate().is_ok());
        assert_eq!(EvolverConfig::fast().min_population, 3);
        assert_eq!(EvolverConfig::thorough().max_not_improving, 100);
    }

    #[test]
    fn test_validate_rejects() {
        assert!(EvolverConfig::default()
            .with_min_population(0)
            .validate()
            .is_err());
        assert!(EvolverConfig::default()
            .with_max_not_improving(0)
            .validate()
            .is_err());
        let mut config = EvolverConfig::default();
        config.mutation_rate = f64::NAN;
        assert!(config.validate().is_err());
    }
}
