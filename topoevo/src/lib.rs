//! An implementation of NeuroEvolution of Augmenting Topologies,
//! following the 2002 paper: <http://nn.cs.utexas.edu/keyword?stanley:ec02>
//!
//! The engine is generic over the evolved structure through the
//! [`Genome`] trait. A layered feed-forward neural network genome is
//! supplied by the `topoevo-nn` crate.
//!
//! Evolution is driven by the agents themselves: each agent of a
//! generation is evaluated on whatever inputs the caller has at hand,
//! and then _killed_ with a fitness value. Once every agent has died,
//! the population is re-speciated and the next generation is bred.
//! Agents can be killed in any order directly through a [`Population`],
//! or one at a time through a [`Harness`] in [`Mode::Sequential`].
//!
//! # Example usage: Evolution of an XOR approximator
//! ```
//! use topoevo::{Harness, Mode, Population, PopulationConfig};
//! use topoevo_nn::genomics::{GeneticConfig, InputSizeError, LayeredGenome};
//! use std::num::NonZeroUsize;
//!
//! const CASES: [([f32; 2], f32); 4] = [
//!     ([0.0, 0.0], 0.0),
//!     ([0.0, 1.0], 1.0),
//!     ([1.0, 0.0], 1.0),
//!     ([1.0, 1.0], 0.0),
//! ];
//!
//! fn xor_fitness(genome: &LayeredGenome, _: &()) -> Result<f32, InputSizeError> {
//!     let mut genome = genome.clone();
//!     let mut error = 0.0;
//!     for (input, expected) in CASES.iter() {
//!         error += (genome.evaluate(input)?[0] - expected).abs();
//!     }
//!     Ok((4.0 - error).powi(2))
//! }
//!
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     ..GeneticConfig::default()
//! };
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(30).unwrap(),
//!     seed: Some(11),
//!     ..PopulationConfig::default()
//! };
//!
//! let population = Population::new(population_config, genetic_config);
//! let mut harness = Harness::<_, _, LayeredGenome, _>::new(population, Mode::Sequential, xor_fitness);
//! while harness.population().generation() < 3 {
//!     harness.kill_current(&()).unwrap();
//! }
//!
//! let champion = harness.population().champion().unwrap();
//! println!("Best so far: {}", serde_json::to_string(champion.genome()).unwrap());
//! ```

mod genome;
mod populations;
mod rng;
#[cfg(test)]
mod testing;

pub use genome::*;
pub use populations::*;
pub use rng::Chance;
