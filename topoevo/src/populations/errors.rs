use super::Mode;

use std::error::Error;
use std::fmt;

/// Errors surfaced while driving a population.
#[derive(Debug)]
pub enum PopulationError {
    /// An operation of one operating mode was
    /// called on a harness running in the other.
    ModeMismatch { expected: Mode, found: Mode },
    /// The agent index is not in the population.
    AgentOutOfRange { index: usize, size: usize },
    /// The agent's genome could not be evaluated.
    Evaluation(Box<dyn Error + Send + Sync>),
    /// The fitness callback failed for the agent,
    /// which remains alive.
    FitnessEvaluation {
        agent: usize,
        source: Box<dyn Error + Send + Sync>,
    },
    /// The fitness callback returned a negative
    /// or NaN value for the agent, which remains alive.
    InvalidFitness { agent: usize, fitness: f32 },
    /// A generation cannot end while agents are alive.
    GenerationIncomplete { alive: usize },
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModeMismatch { expected, found } => write!(
                f,
                "operation requires {:?} mode, but the population runs in {:?} mode",
                expected, found
            ),
            Self::AgentOutOfRange { index, size } => write!(
                f,
                "agent index {} out of range for population of {}",
                index, size
            ),
            Self::Evaluation(e) => write!(f, "agent evaluation failed: {}", e),
            Self::FitnessEvaluation { agent, source } => {
                write!(f, "fitness method invalid for agent {}: {}", agent, source)
            }
            Self::InvalidFitness { agent, fitness } => write!(
                f,
                "fitness method returned {} for agent {}, expected a non-negative value",
                fitness, agent
            ),
            Self::GenerationIncomplete { alive } => write!(
                f,
                "attempted evolution with {} agents still alive",
                alive
            ),
        }
    }
}

impl Error for PopulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Evaluation(e) => Some(e.as_ref()),
            Self::FitnessEvaluation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
