use crate::NodeId;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Nodes are the structural elements of genomes
/// between which genes are created.
///
/// Besides its id and layer, a node carries transient
/// evaluation state and the list of its outgoing genes
/// (as indices into the genome's gene list). Neither is
/// serialized: the evaluation state is zero between
/// evaluations, and the outgoing list is rebuilt from the
/// genes whenever the genome's structure changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    layer: usize,
    #[serde(skip)]
    pub(super) input_sum: f32,
    #[serde(skip)]
    pub(super) output_value: f32,
    #[serde(skip)]
    pub(super) outgoing: Vec<usize>,
}

impl Node {
    /// Generate a new node in the given layer.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::Node;
    ///
    /// let node = Node::new(5, 1);
    /// assert_eq!(node.id(), 5);
    /// assert_eq!(node.layer(), 1);
    /// ```
    pub fn new(id: NodeId, layer: usize) -> Node {
        Node {
            id,
            layer,
            input_sum: 0.0,
            output_value: 0.0,
            outgoing: vec![],
        }
    }

    /// Returns the node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's layer.
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub(super) fn set_layer(&mut self, layer: usize) {
        self.layer = layer;
    }

    /// Returns the accumulated input sum. Always 0
    /// outside of an evaluation.
    pub fn input_sum(&self) -> f32 {
        self.input_sum
    }

    /// Returns the output value computed during
    /// the last evaluation.
    pub fn output_value(&self) -> f32 {
        self.output_value
    }

    /// Returns the indices of the node's outgoing genes
    /// in the owning genome's gene list.
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    /// Computes the node's output value from its accumulated
    /// input. Nodes in layer 0 pass their input through.
    pub(super) fn activate(&mut self) {
        self.output_value = if self.layer == 0 {
            self.input_sum
        } else {
            sigmoid(self.input_sum)
        };
    }
}

/// Steepened logistic function, `1 / (1 + e^(-4.9x))`.
///
/// # Examples
/// ```
/// use topoevo_nn::genomics::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// ```
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-4.9 * x).exp())
}

// Equality ignores evaluation state and adjacency.
impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        self.id == other.id && self.layer == other.layer
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} layer: {} outgoing: {}",
            self.id,
            self.layer,
            self.outgoing.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_layer_passes_through() {
        let mut node = Node::new(0, 0);
        node.input_sum = 3.14;
        node.activate();
        assert_eq!(node.output_value(), 3.14);
    }

    #[test]
    fn hidden_layer_squashes() {
        let mut node = Node::new(4, 2);
        node.input_sum = -0.5;
        node.activate();
        assert_eq!(node.output_value(), sigmoid(-0.5));
        assert!(node.output_value() > 0.0 && node.output_value() < 0.5);
    }
}
