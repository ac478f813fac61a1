use rand::Rng;

use std::error::Error;

/// An interface for genomes that can be evolved by a
/// [`Population`].
///
/// [`Population`]: crate::Population
pub trait Genome: Clone {
    type Config;
    type InnovationHistory: InnovationHistory<Config = Self::Config>;
    /// Error returned when a genome cannot be evaluated
    /// on a given input.
    type EvaluationError: Error + Send + Sync + 'static;

    /// Returns a fresh genome. The population gives each
    /// one a single mutation pass before its first use.
    fn new(config: &Self::Config) -> Self;

    /// Computes the genome's outputs for the given inputs.
    /// Evaluation must leave no observable trace on the genome.
    fn evaluate(&mut self, inputs: &[f32]) -> Result<Vec<f32>, Self::EvaluationError>;

    /// Returns the genetic distance from `candidate`
    /// to `representative`.
    fn genetic_distance(candidate: &Self, representative: &Self, config: &Self::Config) -> f32;

    /// Combines two genomes and returns a "child" genome.
    /// The child's structure follows `fitter`.
    fn crossover<R: Rng + ?Sized>(
        fitter: &Self,
        other: &Self,
        config: &Self::Config,
        rng: &mut R,
    ) -> Self;

    /// Applies one mutation pass to the genome, recording
    /// structural innovations in `history`.
    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut Self::InnovationHistory,
        config: &Self::Config,
        rng: &mut R,
    );
}

/// An Innovation History is used to keep track
/// of genetic innovations throught successive
/// generations of genomes.
///
/// The exact function and utility of the
/// InnovationHistory is left to the implementor.
pub trait InnovationHistory {
    type Config;

    fn new(config: &Self::Config) -> Self;
}
