use crate::Genome;

use serde::{Deserialize, Serialize};

/// An agent is a genome taking part in a generation.
///
/// Agents are _alive_ while their fitness is undefined,
/// and die once it has been assigned. A generation ends
/// when every agent in the population is dead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent<G> {
    genome: G,
    fitness: Option<f32>,
}

impl<G: Genome> Agent<G> {
    /// Returns a new, living agent.
    ///
    /// # Examples
    /// ```
    /// use topoevo::Agent;
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    ///
    /// let agent = Agent::new(LayeredGenome::new(&GeneticConfig::zero()));
    /// assert!(agent.is_alive());
    /// assert_eq!(agent.fitness(), None);
    /// ```
    pub fn new(genome: G) -> Agent<G> {
        Agent {
            genome,
            fitness: None,
        }
    }

    /// Returns the agent's genome.
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Returns the agent's fitness, if it has died.
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    /// Returns whether the agent's fitness is undefined.
    pub fn is_alive(&self) -> bool {
        self.fitness.is_none()
    }

    /// Fitness used for ranking; living agents rank as 0.
    pub(crate) fn score(&self) -> f32 {
        self.fitness.unwrap_or(0.0)
    }

    pub(crate) fn set_fitness(&mut self, fitness: f32) {
        self.fitness = Some(fitness);
    }

    /// Returns a living copy of the agent.
    pub(crate) fn revived(&self) -> Agent<G> {
        Agent::new(self.genome.clone())
    }

    /// Evaluates the agent's genome on `inputs` and returns
    /// the index of the greatest output. Ties go to the
    /// lowest index.
    ///
    /// # Errors
    ///
    /// Returns the genome's evaluation error if `inputs`
    /// cannot be evaluated.
    ///
    /// # Examples
    /// ```
    /// use topoevo::Agent;
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut genome = LayeredGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(1).unwrap(),
    ///     output_count: NonZeroUsize::new(3).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    /// genome.add_gene(0, 0, 2, 1.0);
    /// let mut agent = Agent::new(genome);
    ///
    /// assert_eq!(agent.decide(&[1.0]).unwrap(), 1);
    /// // All outputs are equal.
    /// assert_eq!(agent.decide(&[0.0]).unwrap(), 0);
    /// ```
    pub fn decide(&mut self, inputs: &[f32]) -> Result<usize, G::EvaluationError> {
        let outputs = self.genome.evaluate(inputs)?;
        let mut best = 0;
        for (i, output) in outputs.iter().enumerate() {
            if *output > outputs[best] {
                best = i;
            }
        }
        Ok(best)
    }
}
