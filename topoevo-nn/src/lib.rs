//! # topoevo-nn
//! A layered feed-forward neural network implementation of the
//! [`topoevo`] crate's `Genome` trait.
//!
//! Provides a [`LayeredGenome`] type usable in `topoevo` `Population`s.
//! Genomes start with only input, output and bias nodes, and grow
//! connections and hidden nodes through mutation. Every node lives in a
//! layer, and connections always run from a lower layer to a strictly
//! higher one, so a genome can be evaluated directly in a single
//! layer-ordered pass.
//!
//! [`LayeredGenome`]: crate::genomics::LayeredGenome
//!
//! # Example usage: Evolution of an XOR approximator
//! ```
//! use topoevo::{Population, PopulationConfig};
//! use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
//! use std::num::NonZeroUsize;
//!
//! fn evaluate_xor(genome: &LayeredGenome) -> f32 {
//!     let mut genome = genome.clone();
//!     let cases = [
//!         ([0.0, 0.0], 0.0),
//!         ([0.0, 1.0], 1.0),
//!         ([1.0, 0.0], 1.0),
//!         ([1.0, 1.0], 0.0),
//!     ];
//!     let error: f32 = cases
//!         .iter()
//!         .map(|(input, expected)| match genome.evaluate(input) {
//!             Ok(output) => (output[0] - expected).abs(),
//!             Err(_) => 1.0,
//!         })
//!         .sum();
//!     (4.0 - error).powi(2)
//! }
//!
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     ..GeneticConfig::default()
//! };
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(50).unwrap(),
//!     seed: Some(7),
//!     ..PopulationConfig::default()
//! };
//!
//! let mut population =
//!     Population::<_, _, LayeredGenome>::new(population_config, genetic_config);
//! for _ in 0..5 {
//!     population.evaluate_fitness(evaluate_xor).unwrap();
//! }
//! assert_eq!(population.generation(), 5);
//! ```

pub mod genomics;

/// Identifier type used to designate historically
/// identical mutations for the purposes of
/// genome comparison and genetic tracking.
pub type Innovation = usize;

/// Identifier of a node within a single genome.
/// Node ids are contiguous and start at 0.
pub type NodeId = usize;
