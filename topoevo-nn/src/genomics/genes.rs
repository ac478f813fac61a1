use crate::genomics::GeneticConfig;
use crate::{Innovation, NodeId};

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Genes are the weighted connections of a genome.
/// They run from a node in a lower layer to a node
/// in a strictly higher layer, and carry the innovation
/// number under which their structural mutation was
/// first recorded.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gene {
    id: Innovation,
    input: NodeId,
    output: NodeId,
    weight: f32,
    enabled: bool,
}

impl Gene {
    /// Returns a new _enabled_ gene with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    /// assert!(gene.enabled());
    /// ```
    pub fn new(id: Innovation, input: NodeId, output: NodeId, weight: f32) -> Gene {
        Gene {
            id,
            input,
            output,
            weight,
            enabled: true,
        }
    }

    /// Replaces the gene's weight with one drawn
    /// uniformly from ±[`weight_bound`].
    ///
    /// [`weight_bound`]: crate::genomics::GeneticConfig::weight_bound
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    /// gene.reset_weight(&mut rand::thread_rng(), &GeneticConfig {
    ///     weight_bound: 1.0,
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// assert!(gene.weight().abs() <= 1.0);
    /// ```
    pub fn reset_weight<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GeneticConfig) {
        self.weight = rng.gen_range(-config.weight_bound..=config.weight_bound);
    }

    /// Adds a value drawn uniformly from `[0, weight_nudge_power]`
    /// to the gene's weight, then clamps it into ±[`weight_bound`].
    ///
    /// [`weight_bound`]: crate::genomics::GeneticConfig::weight_bound
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let config = GeneticConfig {
    ///     weight_nudge_power: 0.02,
    ///     weight_bound: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut gene = Gene::new(42, 3, 9, 0.5);
    /// gene.nudge_weight(&mut rand::thread_rng(), &config);
    ///
    /// assert!(gene.weight() >= 0.5 && gene.weight() <= 0.52);
    ///
    /// let mut saturated = Gene::new(43, 3, 9, 1.0);
    /// saturated.nudge_weight(&mut rand::thread_rng(), &config);
    /// assert_eq!(saturated.weight(), 1.0);
    /// ```
    pub fn nudge_weight<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GeneticConfig) {
        self.weight += rng.gen::<f32>() * config.weight_nudge_power;
        self.weight = self.weight.clamp(-config.weight_bound, config.weight_bound);
    }

    /// Returns the gene's innovation number.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// assert_eq!(gene.innovation(), 42);
    /// ```
    pub fn innovation(&self) -> Innovation {
        self.id
    }

    /// Returns the gene's source node.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Returns the gene's target node.
    pub fn output(&self) -> NodeId {
        self.output
    }

    /// Returns the gene's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the gene's weight.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::Gene;
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    /// gene.set_weight(-5.0);
    ///
    /// assert_eq!(gene.weight(), -5.0);
    /// ```
    pub fn set_weight(&mut self, w: f32) {
        self.weight = w;
    }

    /// Returns whether the gene takes part in evaluation.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the gene's enabled status.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::Gene;
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    /// gene.set_enabled(false);
    ///
    /// assert!(!gene.enabled());
    /// ```
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the gene's source and target nodes.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.input, self.output)
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} -> {:?} enabled: {} innovation: {:?} weight: {:.3}",
            self.input, self.output, self.enabled, self.id, self.weight,
        )
    }
}
