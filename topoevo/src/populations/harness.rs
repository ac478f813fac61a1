use crate::populations::{Population, PopulationError};
use crate::Genome;

use serde::{Deserialize, Serialize};

use std::error::Error;

/// The way agents of a [`Harness`] are driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Any agent may be evaluated or killed, in any order.
    Batch,
    /// Agents are evaluated and killed one at a time,
    /// in index order, starting anew each generation.
    Sequential,
}

/// Drives a [`Population`] in one of two operating
/// [`Mode`]s, scoring killed agents with a fitness
/// callback it owns.
///
/// The callback receives the agent's genome and a
/// caller-supplied context, and is invoked exactly once
/// per agent. If it fails, the agent stays alive.
///
/// Since [`Genome::evaluate`] needs mutable access, a callback
/// that runs the genome works on a clone of it, as below.
///
/// # Examples
/// ```
/// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
/// use topoevo::{Harness, Mode, Population, PopulationConfig};
/// use std::num::NonZeroUsize;
///
/// # let genetic_config = GeneticConfig::default();
/// let population = Population::<_, _, G>::new(
///     PopulationConfig {
///         size: NonZeroUsize::new(3).unwrap(),
///         ..PopulationConfig::default()
///     },
///     genetic_config,
/// );
/// let mut harness = Harness::new(population, Mode::Sequential, |g: &G, input: &f32| {
///     let mut genome = g.clone();
///     genome.evaluate(&[*input]).map(|outputs| outputs[0])
/// });
///
/// for score in [1.0, 2.0, 3.0] {
///     let _choice = harness.decide_current(&[0.5]).unwrap();
///     harness.kill_current(&score).unwrap();
/// }
/// assert_eq!(harness.current_index().unwrap(), 0);
/// assert_eq!(harness.population().generation(), 1);
/// ```
pub struct Harness<C, H, G, F> {
    population: Population<C, H, G>,
    mode: Mode,
    current: usize,
    fitness: F,
}

impl<C, H, G, F> Harness<C, H, G, F>
where
    G: Genome<InnovationHistory = H, Config = C>,
{
    /// Wraps `population`, to be driven in `mode`
    /// and scored with `fitness`.
    pub fn new(population: Population<C, H, G>, mode: Mode, fitness: F) -> Harness<C, H, G, F> {
        Harness {
            population,
            mode,
            current: 0,
            fitness,
        }
    }

    /// Returns the harness' operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the driven population.
    pub fn population(&self) -> &Population<C, H, G> {
        &self.population
    }

    /// Unwraps the driven population.
    pub fn into_population(self) -> Population<C, H, G> {
        self.population
    }

    /// Evaluates the agent at `index`, returning the index
    /// of its greatest output.
    ///
    /// # Errors
    /// Returns [`ModeMismatch`] outside [`Mode::Batch`], and
    /// otherwise any error of [`Population::decide`].
    ///
    /// [`ModeMismatch`]: PopulationError::ModeMismatch
    pub fn decide(&mut self, index: usize, inputs: &[f32]) -> Result<usize, PopulationError> {
        self.require(Mode::Batch)?;
        self.population.decide(index, inputs)
    }

    /// Kills the agent at `index`, scoring it against `context`.
    /// Returns whether a new generation started.
    ///
    /// # Errors
    /// Returns [`ModeMismatch`] outside [`Mode::Batch`], and
    /// otherwise any error of [`Population::kill`].
    ///
    /// [`ModeMismatch`]: PopulationError::ModeMismatch
    pub fn kill<X, E>(&mut self, index: usize, context: &X) -> Result<bool, PopulationError>
    where
        X: ?Sized,
        F: FnMut(&G, &X) -> Result<f32, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.require(Mode::Batch)?;
        self.population.kill(index, context, &mut self.fitness)
    }

    /// Returns the index of the agent whose turn it is.
    ///
    /// # Errors
    /// Returns [`ModeMismatch`] outside [`Mode::Sequential`].
    ///
    /// [`ModeMismatch`]: PopulationError::ModeMismatch
    pub fn current_index(&self) -> Result<usize, PopulationError> {
        self.require(Mode::Sequential)?;
        Ok(self.current)
    }

    /// Evaluates the current agent.
    ///
    /// # Errors
    /// Returns [`ModeMismatch`] outside [`Mode::Sequential`], and
    /// otherwise any error of [`Population::decide`].
    ///
    /// [`ModeMismatch`]: PopulationError::ModeMismatch
    pub fn decide_current(&mut self, inputs: &[f32]) -> Result<usize, PopulationError> {
        self.require(Mode::Sequential)?;
        self.population.decide(self.current, inputs)
    }

    /// Kills the current agent and passes the turn to the
    /// next one, or back to the first if a new generation
    /// started. Returns whether it did.
    ///
    /// # Errors
    /// Returns [`ModeMismatch`] outside [`Mode::Sequential`], and
    /// otherwise any error of [`Population::kill`], in which
    /// case the turn does not pass.
    ///
    /// [`ModeMismatch`]: PopulationError::ModeMismatch
    pub fn kill_current<X, E>(&mut self, context: &X) -> Result<bool, PopulationError>
    where
        X: ?Sized,
        F: FnMut(&G, &X) -> Result<f32, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.require(Mode::Sequential)?;
        let new_generation = self
            .population
            .kill(self.current, context, &mut self.fitness)?;
        self.current = if new_generation { 0 } else { self.current + 1 };
        Ok(new_generation)
    }

    fn require(&self, expected: Mode) -> Result<(), PopulationError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(PopulationError::ModeMismatch {
                expected,
                found: self.mode,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populations::PopulationConfig;
    use crate::testing::{Point, PointConfig};
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::num::NonZeroUsize;

    fn population(size: usize) -> Population<PointConfig, crate::testing::MutationCounter, Point> {
        Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(size).unwrap(),
                seed: Some(7),
                ..PopulationConfig::default()
            },
            PointConfig { drift: 0.0 },
        )
    }

    #[test]
    fn batch_operations() {
        let mut harness = Harness::new(population(2), Mode::Batch, |_: &Point, f: &f32| {
            Ok::<_, Infallible>(*f)
        });

        assert_eq!(harness.decide(1, &[1.0]).unwrap(), 0);
        assert!(!harness.kill(1, &3.0).unwrap());
        assert!(harness.kill(0, &1.0).unwrap());
        assert_eq!(harness.population().generation(), 1);
        assert_eq!(
            harness.population().champion().unwrap().fitness(),
            Some(3.0)
        );
    }

    #[test]
    fn batch_rejects_sequential_operations() {
        let mut harness = Harness::new(population(2), Mode::Batch, |_: &Point, _: &()| {
            Ok::<_, Infallible>(1.0)
        });

        assert!(matches!(
            harness.current_index(),
            Err(PopulationError::ModeMismatch {
                expected: Mode::Sequential,
                found: Mode::Batch,
            })
        ));
        assert!(harness.decide_current(&[1.0]).is_err());
        assert!(harness.kill_current(&()).is_err());
        assert_eq!(harness.population().alive_count(), 2);
    }

    #[test]
    fn sequential_rejects_batch_operations() {
        let mut harness = Harness::new(population(2), Mode::Sequential, |_: &Point, _: &()| {
            Ok::<_, Infallible>(1.0)
        });

        assert!(matches!(
            harness.decide(0, &[1.0]),
            Err(PopulationError::ModeMismatch {
                expected: Mode::Batch,
                found: Mode::Sequential,
            })
        ));
        assert!(harness.kill(0, &()).is_err());
        assert_eq!(harness.population().alive_count(), 2);
    }

    #[test]
    fn sequential_turns_wrap_each_generation() {
        let calls = Cell::new(0);
        let mut harness = Harness::new(population(3), Mode::Sequential, |_: &Point, _: &()| {
            calls.set(calls.get() + 1);
            Ok::<_, Infallible>(1.0)
        });

        for generation in 0..2 {
            for index in 0..3 {
                assert_eq!(harness.current_index().unwrap(), index);
                harness.decide_current(&[1.0]).unwrap();
                assert_eq!(harness.kill_current(&()).unwrap(), index == 2);
            }
            assert_eq!(harness.population().generation(), generation + 1);
        }
        assert_eq!(harness.current_index().unwrap(), 0);
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn failed_kill_keeps_turn() {
        let mut harness = Harness::new(population(2), Mode::Sequential, |_: &Point, ok: &bool| {
            if *ok {
                Ok(1.0)
            } else {
                Err("lost connection")
            }
        });

        assert!(matches!(
            harness.kill_current(&false),
            Err(PopulationError::FitnessEvaluation { agent: 0, .. })
        ));
        assert_eq!(harness.current_index().unwrap(), 0);
        assert!(harness.population().agent(0).unwrap().is_alive());

        harness.kill_current(&true).unwrap();
        assert_eq!(harness.current_index().unwrap(), 1);
    }

    #[test]
    fn into_population_keeps_progress() {
        let mut harness = Harness::new(population(1), Mode::Batch, |_: &Point, _: &()| {
            Ok::<_, Infallible>(0.5)
        });
        harness.kill(0, &()).unwrap();

        let population = harness.into_population();
        assert_eq!(population.generation(), 1);
    }
}
