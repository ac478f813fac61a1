use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population.
    pub size: NonZeroUsize,
    /// Genetic distance threshold, at or beyond which
    /// genomes are considered as belonging to
    /// different species.
    pub distance_threshold: f32,
    /// Top % of each species kept as parents
    /// after a generation ends. Species of two
    /// or fewer members are never culled.
    pub survival_threshold: f32,
    /// Chance that a child is a mutated clone of a single
    /// parent, instead of the crossover of two.
    pub asexual_reproduction_chance: f32,
    /// Number of generations without a fitness increase
    /// after which a species is removed. The best species
    /// is always spared.
    pub stagnation_threshold: NonZeroUsize,
    /// Seed of the population's random number generator.
    /// If `None`, the generator is seeded from system entropy.
    pub seed: Option<u64>,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, empty, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use topoevo::PopulationConfig;
    ///
    /// let cfg1 = PopulationConfig::zero();
    ///
    /// let cfg2 = PopulationConfig {
    ///     // Specify some values here...
    ///     distance_threshold: 4.0,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            // SAFETY: 1 is a valid NonZeroUsize. Replace this with
            // NonZeroUsize::new(1).unwrap() once const Option::unwrap
            // becomes stable.
            size: unsafe { NonZeroUsize::new_unchecked(1) },
            distance_threshold: 0.0,
            survival_threshold: 0.0,
            asexual_reproduction_chance: 0.0,
            // SAFETY: 1 is a valid NonZeroUsize. Replace this with
            // NonZeroUsize::new(1).unwrap() once const Option::unwrap
            // becomes stable.
            stagnation_threshold: unsafe { NonZeroUsize::new_unchecked(1) },
            seed: None,
        }
    }
}

impl Default for PopulationConfig {
    /// Returns the classic NEAT population settings:
    /// 200 agents, a distance threshold of 4, half of each
    /// species surviving, a quarter of offspring cloned,
    /// and species removed after 15 stagnant generations.
    fn default() -> PopulationConfig {
        PopulationConfig {
            // SAFETY: 200 and 15 are valid NonZeroUsizes.
            size: unsafe { NonZeroUsize::new_unchecked(200) },
            distance_threshold: 4.0,
            survival_threshold: 0.5,
            asexual_reproduction_chance: 0.25,
            stagnation_threshold: unsafe { NonZeroUsize::new_unchecked(15) },
            seed: None,
        }
    }
}
