use crate::{Innovation, NodeId};

use std::error::Error;
use std::fmt;

/// An error type indicating the gene being
/// added is invalid for the genome.
#[derive(Debug)]
pub(crate) enum GeneValidityError {
    /// The gene's innovation number is a duplicate.
    DuplicateGeneID(Innovation),
    /// The gene's endpoints do not exist.
    NonexistantEndpoints(NodeId, NodeId),
    /// The gene has the same endpoints as another gene.
    DuplicateGeneWithEndpoints(NodeId, NodeId),
    /// The gene does not point to a strictly higher layer.
    NonForwardGene(NodeId, NodeId),
}

/// An error type indicating that a genome was
/// evaluated with the wrong number of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSizeError {
    /// Number of input nodes in the genome.
    pub expected: usize,
    /// Number of input values supplied.
    pub found: usize,
}

/// An error type indicating a failure
/// to carry out a connection addition mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionAdditionError {
    /// The genome already holds the maximum
    /// number of connections for its node count.
    GenomeFullyConnected,
    /// No pair of nodes in distinct layers
    /// is left unconnected.
    NoConnectablePair,
}

/// An error type indicating a failure
/// to carry out a node addition mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAdditionError {
    /// Every enabled connection originates at
    /// the bias node, or none is enabled.
    NoSplittableConnection,
}

/// An error type indicating a failure
/// to carry out a connection toggle mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleError {
    /// The genome has no connections.
    NoConnections,
}

impl fmt::Display for InputSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genome evaluated with {} inputs, but it has {} input nodes",
            self.found, self.expected
        )
    }
}

impl fmt::Display for GeneValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGeneID(id) => write!(f, "duplicate gene insertion with id {}", id),
            Self::NonexistantEndpoints(input, output) => write!(
                f,
                "gene insertion between nonexistant endpoint(s) {} -> {}",
                input, output
            ),
            Self::DuplicateGeneWithEndpoints(input, output) => write!(
                f,
                "gene insertion with endpoints {} -> {} shadows gene with same endpoints",
                input, output
            ),
            Self::NonForwardGene(input, output) => write!(
                f,
                "gene insertion {} -> {} does not point to a higher layer",
                input, output
            ),
        }
    }
}

impl fmt::Display for ConnectionAdditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenomeFullyConnected => {
                write!(f, "connection mutation on fully-connected genome")
            }
            Self::NoConnectablePair => {
                write!(f, "no unconnected node pair left for connection mutation")
            }
        }
    }
}

impl fmt::Display for NodeAdditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSplittableConnection => {
                write!(f, "node mutation on genome without a splittable connection")
            }
        }
    }
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConnections => write!(f, "toggle mutation on genome without connections"),
        }
    }
}

impl Error for InputSizeError {}
impl Error for GeneValidityError {}
impl Error for ConnectionAdditionError {}
impl Error for NodeAdditionError {}
impl Error for ToggleError {}
