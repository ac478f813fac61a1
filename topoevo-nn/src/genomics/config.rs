use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for genome generation
/// and inter-genome operations.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of inputs in a genome.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Chance that a mutation pass perturbs
    /// the weights of the genome's connections.
    pub weight_mutation_chance: f32,
    /// Chance of a single connection's weight being
    /// reset during weight mutation, instead of nudged.
    pub weight_reset_chance: f32,
    /// Upper bound of the uniform `[0, power]` distribution
    /// a weight is nudged by.
    pub weight_nudge_power: f32,
    /// Maximum magnitude of a weight after reset or nudge.
    pub weight_bound: f32,
    /// Maximum magnitude of the weight given to
    /// connections created by connection addition.
    pub new_connection_weight_bound: f32,
    /// Chance of a connection addition mutation taking place.
    pub connection_addition_mutation_chance: f32,
    /// Chance of a node addition mutation taking place.
    pub node_addition_mutation_chance: f32,
    /// Chance of a connection toggle mutation taking place.
    pub connection_toggle_mutation_chance: f32,
    /// Chance that a matching gene inherited during crossover
    /// is disabled, if it was disabled in either parent.
    pub inherited_disable_chance: f32,
    /// Weight of excess and disjoint genes in genetic distance.
    pub excess_gene_factor: f32,
    /// Weight of the common gene weight average in genetic distance.
    pub common_weight_factor: f32,
    /// Connection count above which the excess gene
    /// term of genetic distance is normalized.
    pub large_genome_threshold: usize,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::GeneticConfig;
    ///
    /// let cfg1 = GeneticConfig::zero();
    ///
    /// let cfg2 = GeneticConfig {
    ///     // Specify some values here...
    ///     connection_addition_mutation_chance: 1.0,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            // SAFETY: 1 is a valid NonZeroUsize. Replace this with
            // NonZeroUsize::new(1).unwrap() once const Option::unwrap
            // becomes stable.
            input_count: unsafe { NonZeroUsize::new_unchecked(1) },
            output_count: unsafe { NonZeroUsize::new_unchecked(1) },
            weight_mutation_chance: 0.0,
            weight_reset_chance: 0.0,
            weight_nudge_power: 0.0,
            weight_bound: 0.0,
            new_connection_weight_bound: 0.0,
            connection_addition_mutation_chance: 0.0,
            node_addition_mutation_chance: 0.0,
            connection_toggle_mutation_chance: 0.0,
            inherited_disable_chance: 0.0,
            excess_gene_factor: 0.0,
            common_weight_factor: 0.0,
            large_genome_threshold: 0,
        }
    }
}

impl Default for GeneticConfig {
    /// The classic NEAT parameter set, for a
    /// single-input, single-output genome.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::GeneticConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(4).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::default()
    /// };
    ///
    /// assert_eq!(config.weight_mutation_chance, 0.8);
    /// ```
    fn default() -> GeneticConfig {
        GeneticConfig {
            weight_mutation_chance: 0.8,
            weight_reset_chance: 0.1,
            weight_nudge_power: 1.0 / 50.0,
            weight_bound: 1.0,
            new_connection_weight_bound: 2.0,
            connection_addition_mutation_chance: 0.08,
            node_addition_mutation_chance: 0.02,
            connection_toggle_mutation_chance: 0.02,
            inherited_disable_chance: 0.75,
            excess_gene_factor: 1.0,
            common_weight_factor: 0.5,
            large_genome_threshold: 20,
            ..GeneticConfig::zero()
        }
    }
}
