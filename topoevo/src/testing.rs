//! A one-dimensional genome used to exercise the
//! population machinery in unit tests.
use crate::{Genome, InnovationHistory};

use rand::Rng;

use std::error::Error;
use std::fmt;

#[derive(Clone, Debug)]
pub(crate) struct PointConfig {
    /// Maximum upward drift of a point per mutation.
    pub(crate) drift: f32,
}

#[derive(Debug, Default)]
pub(crate) struct MutationCounter {
    pub(crate) mutations: usize,
}

impl InnovationHistory for MutationCounter {
    type Config = PointConfig;

    fn new(_config: &PointConfig) -> MutationCounter {
        MutationCounter::default()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct EmptyInput;

impl fmt::Display for EmptyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "empty input")
    }
}

impl Error for EmptyInput {}

/// A genome that is a point on a line. Its outputs
/// are its inputs scaled by its position.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Point(pub(crate) f32);

impl Genome for Point {
    type Config = PointConfig;
    type InnovationHistory = MutationCounter;
    type EvaluationError = EmptyInput;

    fn new(_config: &PointConfig) -> Point {
        Point(0.0)
    }

    fn evaluate(&mut self, inputs: &[f32]) -> Result<Vec<f32>, EmptyInput> {
        if inputs.is_empty() {
            return Err(EmptyInput);
        }
        Ok(inputs.iter().map(|x| x * self.0).collect())
    }

    fn genetic_distance(candidate: &Point, representative: &Point, _config: &PointConfig) -> f32 {
        (candidate.0 - representative.0).abs()
    }

    fn crossover<R: Rng + ?Sized>(
        fitter: &Point,
        _other: &Point,
        _config: &PointConfig,
        _rng: &mut R,
    ) -> Point {
        fitter.clone()
    }

    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut MutationCounter,
        config: &PointConfig,
        rng: &mut R,
    ) {
        history.mutations += 1;
        if config.drift > 0.0 {
            self.0 += rng.gen_range(0.0..config.drift);
        }
    }
}
