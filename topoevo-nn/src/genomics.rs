//! Layered genomes and the genetic operators
//! acting on them.
mod config;
mod errors;
mod genes;
mod history;
mod nodes;

pub use config::GeneticConfig;
use errors::GeneValidityError;
pub use errors::{ConnectionAdditionError, InputSizeError, NodeAdditionError, ToggleError};
pub use genes::Gene;
pub use history::{History, InnovationRecord, Signature};
pub use nodes::{sigmoid, Node};

use crate::{Innovation, NodeId};

use ahash::RandomState;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use topoevo::Chance;

use std::collections::HashMap;
use std::fmt;
use std::mem;

/// Average weight difference assumed between two
/// non-empty genomes that share no genes at all.
const UNMATCHED_WEIGHT_DIFFERENCE: f32 = 100.0;

/// Genomes are the focus of evolution in NEAT.
/// They are a collection of genes and nodes that can be
/// instantiated as a feed-forward neural network.
///
/// Every node is assigned a layer: inputs and the bias node
/// sit in layer 0, outputs in the last layer, and hidden nodes
/// in between. Genes always point to a strictly higher layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayeredGenome {
    nodes: Vec<Node>,
    genes: Vec<Gene>,
    input_count: usize,
    output_count: usize,
    layer_count: usize,
    next_node: NodeId,
    bias_node: NodeId,
}

impl LayeredGenome {
    /// Create a new genome with the specified configuration.
    ///
    /// The genome holds `input_count` input nodes, then
    /// `output_count` output nodes, then a single bias node,
    /// and no genes.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let genome = LayeredGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// assert_eq!(genome.nodes().count(), 3 + 2 + 1);
    /// assert_eq!(genome.bias_node(), 5);
    /// assert_eq!(genome.layer_count(), 2);
    /// assert_eq!(genome.genes().count(), 0);
    /// ```
    pub fn new(config: &GeneticConfig) -> LayeredGenome {
        let (input_count, output_count) = (config.input_count.get(), config.output_count.get());
        let bias_node = input_count + output_count;
        let nodes = (0..input_count)
            .map(|id| Node::new(id, 0))
            .chain((input_count..bias_node).map(|id| Node::new(id, 1)))
            .chain(std::iter::once(Node::new(bias_node, 0)))
            .collect();
        LayeredGenome {
            nodes,
            genes: vec![],
            input_count,
            output_count,
            layer_count: 2,
            next_node: bias_node + 1,
            bias_node,
        }
    }

    /// Add a new gene to the genome.
    /// Returns a reference to the new gene.
    ///
    /// # Panics
    ///
    /// This function will panic if a gene with the same
    /// `gene_id` or the same endpoints already existed in the
    /// genome, if either endpoint does not exist, or if
    /// `output_id` is not in a strictly higher layer than
    /// `input_id`.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut genome = LayeredGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// let inserted_gene = genome.add_gene(42, 2, 4, 2.5).clone();
    ///
    /// assert_eq!(&inserted_gene, genome.genes().next().unwrap());
    /// assert_eq!(inserted_gene.endpoints(), (2, 4));
    /// assert_eq!(genome.nodes().nth(2).unwrap().outgoing(), &[0]);
    /// ```
    pub fn add_gene(
        &mut self,
        gene_id: Innovation,
        input_id: NodeId,
        output_id: NodeId,
        weight: f32,
    ) -> &mut Gene {
        self.check_gene_viability(gene_id, input_id, output_id)
            .unwrap_or_else(|e| panic!("{} in {}", e, self));
        let index = self.genes.len();
        self.genes
            .push(Gene::new(gene_id, input_id, output_id, weight));
        self.connect_nodes();
        &mut self.genes[index]
    }

    /// Checks whether a gene is a duplicate or
    /// is invalid for the genome.
    fn check_gene_viability(
        &self,
        gene_id: Innovation,
        input_id: NodeId,
        output_id: NodeId,
    ) -> Result<(), GeneValidityError> {
        use GeneValidityError::*;
        if self.genes.iter().any(|g| g.innovation() == gene_id) {
            Err(DuplicateGeneID(gene_id))
        } else if input_id >= self.nodes.len() || output_id >= self.nodes.len() {
            Err(NonexistantEndpoints(input_id, output_id))
        } else if self.is_connected(input_id, output_id) {
            Err(DuplicateGeneWithEndpoints(input_id, output_id))
        } else if self.nodes[input_id].layer() >= self.nodes[output_id].layer() {
            Err(NonForwardGene(input_id, output_id))
        } else {
            Ok(())
        }
    }

    /// Rebuilds every node's list of outgoing genes.
    fn connect_nodes(&mut self) {
        for node in &mut self.nodes {
            node.outgoing.clear();
        }
        for (index, gene) in self.genes.iter().enumerate() {
            self.nodes[gene.input()].outgoing.push(index);
        }
    }

    fn is_connected(&self, input_id: NodeId, output_id: NodeId) -> bool {
        self.genes
            .iter()
            .any(|g| g.endpoints() == (input_id, output_id))
    }

    /// Returns the set of innovation numbers
    /// currently present in the genome.
    pub fn signature(&self) -> Signature {
        self.genes.iter().map(Gene::innovation).collect()
    }

    /// Evaluates the genome as a feed-forward network.
    ///
    /// Nodes are activated layer by layer: inputs receive
    /// `inputs`, the bias node receives 1, layer 0 passes its
    /// values through unchanged, and every other node applies
    /// [`sigmoid`] to its accumulated input. Disabled genes do
    /// not propagate. All accumulated inputs are cleared before
    /// returning, so repeated evaluations are independent.
    ///
    /// # Errors
    ///
    /// Returns an [`InputSizeError`] if `inputs` does not hold
    /// exactly one value per input node.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{sigmoid, GeneticConfig, LayeredGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut genome = LayeredGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    /// genome.add_gene(0, 0, 2, 1.5);
    ///
    /// assert_eq!(genome.evaluate(&[2.0, 7.0]).unwrap(), vec![sigmoid(3.0)]);
    /// assert!(genome.evaluate(&[2.0]).is_err());
    /// ```
    pub fn evaluate(&mut self, inputs: &[f32]) -> Result<Vec<f32>, InputSizeError> {
        if inputs.len() != self.input_count {
            return Err(InputSizeError {
                expected: self.input_count,
                found: inputs.len(),
            });
        }
        self.connect_nodes();

        for (node, value) in self.nodes[..self.input_count].iter_mut().zip(inputs) {
            node.input_sum = *value;
        }
        self.nodes[self.bias_node].input_sum = 1.0;

        for id in self.evaluation_order() {
            self.nodes[id].activate();
            let output = self.nodes[id].output_value;
            let outgoing = mem::take(&mut self.nodes[id].outgoing);
            for &index in &outgoing {
                let gene = &self.genes[index];
                if gene.enabled() {
                    self.nodes[gene.output()].input_sum += gene.weight() * output;
                }
            }
            self.nodes[id].outgoing = outgoing;
        }

        let outputs = self.nodes[self.input_count..self.input_count + self.output_count]
            .iter()
            .map(Node::output_value)
            .collect();
        for node in &mut self.nodes {
            node.input_sum = 0.0;
        }
        Ok(outputs)
    }

    /// Node ids ordered by layer.
    fn evaluation_order(&self) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = (0..self.nodes.len()).collect();
        order.sort_by_key(|&id| self.nodes[id].layer());
        order
    }

    /// Applies one full mutation pass to the genome:
    /// a forced connection addition if the genome has no
    /// genes, then weight perturbation, connection addition,
    /// node addition and connection toggling, each with its
    /// configured chance.
    ///
    /// Structural mutations that find nothing to act upon
    /// leave the genome unchanged.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, History, LayeredGenome};
    ///
    /// let config = GeneticConfig::default();
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config);
    ///
    /// genome.mutate(&mut history, &config, &mut rand::thread_rng());
    ///
    /// // A bare genome always gains its first gene.
    /// assert!(genome.genes().count() >= 1);
    /// ```
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) {
        if self.genes.is_empty() {
            if let Err(e) = self.mutate_add_connection(history, config, rng) {
                log::debug!("skipped forced connection addition: {}", e);
            }
        }
        if rng.chance(config.weight_mutation_chance) {
            self.mutate_weights(config, rng);
        }
        if rng.chance(config.connection_addition_mutation_chance) {
            if let Err(e) = self.mutate_add_connection(history, config, rng) {
                log::debug!("skipped connection addition: {}", e);
            }
        }
        if rng.chance(config.node_addition_mutation_chance) {
            if let Err(e) = self.mutate_add_node(history, rng) {
                log::debug!("skipped node addition: {}", e);
            }
        }
        if rng.chance(config.connection_toggle_mutation_chance) {
            if let Err(e) = self.mutate_toggle_connection(rng) {
                log::debug!("skipped connection toggle: {}", e);
            }
        }
    }

    /// Perturbs every gene's weight: with
    /// [`weight_reset_chance`] it is redrawn, otherwise it is
    /// nudged upwards and clamped.
    ///
    /// [`weight_reset_chance`]: GeneticConfig::weight_reset_chance
    pub fn mutate_weights<R: Rng + ?Sized>(&mut self, config: &GeneticConfig, rng: &mut R) {
        for gene in &mut self.genes {
            if rng.chance(config.weight_reset_chance) {
                gene.reset_weight(rng, config);
            } else {
                gene.nudge_weight(rng, config);
            }
        }
    }

    /// Induces a _connection mutation_ in the genome.
    /// If successful, returns the newly added gene.
    ///
    /// # Errors
    ///
    /// Returns an error if the genome already holds as many
    /// genes as its nodes allow.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, History, LayeredGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     new_connection_weight_bound: 2.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config);
    ///
    /// let gene = genome
    ///     .mutate_add_connection(&mut history, &config, &mut rand::thread_rng())
    ///     .unwrap();
    /// assert!(gene.enabled());
    /// assert!(gene.weight().abs() <= 2.0);
    /// ```
    pub fn mutate_add_connection<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<&Gene, ConnectionAdditionError> {
        if self.genes.len() >= self.max_connections() {
            return Err(ConnectionAdditionError::GenomeFullyConnected);
        }
        if self.genes.len() >= self.forward_pair_count() {
            return Err(ConnectionAdditionError::NoConnectablePair);
        }

        let (input_id, output_id) = self.draw_unconnected_pair(rng);
        let weight = rng.gen_range(
            -config.new_connection_weight_bound..=config.new_connection_weight_bound,
        );
        let index = self.genes.len();
        self.push_recorded_gene(input_id, output_id, weight, history);
        self.connect_nodes();
        Ok(&self.genes[index])
    }

    /// Draws random node pairs until one that can be
    /// connected is found. Assumes one exists.
    fn draw_unconnected_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (NodeId, NodeId) {
        let output_layer = self.layer_count - 1;
        loop {
            let mut input_id = rng.gen_range(0..self.nodes.len());
            while self.nodes[input_id].layer() == output_layer {
                input_id = rng.gen_range(0..self.nodes.len());
            }
            let mut output_id = rng.gen_range(0..self.nodes.len());
            while self.nodes[output_id].layer() == 0 || output_id == input_id {
                output_id = rng.gen_range(0..self.nodes.len());
            }
            if self.nodes[input_id].layer() > self.nodes[output_id].layer() {
                mem::swap(&mut input_id, &mut output_id);
            }
            if self.nodes[input_id].layer() != self.nodes[output_id].layer()
                && !self.is_connected(input_id, output_id)
            {
                return (input_id, output_id);
            }
        }
    }

    /// Upper bound on gene count for the current node set,
    /// `(inputs + 1)(hidden + outputs) + hidden(hidden + outputs - 1)`.
    fn max_connections(&self) -> usize {
        let hidden = self.nodes.len() - self.output_count - (self.input_count + 1);
        (self.input_count + 1) * (hidden + self.output_count)
            + hidden * (hidden + self.output_count).saturating_sub(1)
    }

    /// Number of node pairs in distinct layers.
    fn forward_pair_count(&self) -> usize {
        let mut layer_sizes = vec![0; self.layer_count];
        for node in &self.nodes {
            layer_sizes[node.layer()] += 1;
        }
        let mut higher = self.nodes.len();
        let mut pairs = 0;
        for size in layer_sizes {
            higher -= size;
            pairs += size * higher;
        }
        pairs
    }

    /// Appends a gene, numbered through `history`
    /// against the genome's current signature.
    fn push_recorded_gene(
        &mut self,
        input_id: NodeId,
        output_id: NodeId,
        weight: f32,
        history: &mut History,
    ) -> Innovation {
        let innovation = history.innovation_for(input_id, output_id, &self.signature());
        self.genes
            .push(Gene::new(innovation, input_id, output_id, weight));
        innovation
    }

    /// Induces a _node mutation_ in the genome, splitting
    /// an enabled gene that does not leave the bias node.
    /// Returns the id of the new node.
    ///
    /// The split gene is disabled and replaced by three genes:
    /// source → new node (weight 1), new node → target (the
    /// split gene's weight) and bias → new node (weight 0).
    /// If the new node lands in its target's layer, every
    /// other node from that layer onwards moves one layer up.
    ///
    /// # Errors
    ///
    /// Returns an error if no gene can be split.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, History, LayeredGenome};
    ///
    /// let config = GeneticConfig {
    ///     new_connection_weight_bound: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config);
    /// let mut rng = rand::thread_rng();
    ///
    /// // Nothing to split yet.
    /// assert!(genome.mutate_add_node(&mut history, &mut rng).is_err());
    ///
    /// // Input 0 to output 1 is the only non-bias connection possible.
    /// while genome.genes().all(|g| g.input() != 0) {
    ///     genome.mutate_add_connection(&mut history, &config, &mut rng).unwrap();
    /// }
    /// let new_node = genome.mutate_add_node(&mut history, &mut rng).unwrap();
    ///
    /// assert_eq!(new_node, 3);
    /// assert_eq!(genome.layer_count(), 3);
    /// ```
    pub fn mutate_add_node<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        rng: &mut R,
    ) -> Result<NodeId, NodeAdditionError> {
        let splittable: Vec<usize> = self
            .genes
            .iter()
            .enumerate()
            .filter(|(_, g)| g.enabled() && g.input() != self.bias_node)
            .map(|(i, _)| i)
            .collect();
        let split = *splittable
            .choose(rng)
            .ok_or(NodeAdditionError::NoSplittableConnection)?;

        self.genes[split].set_enabled(false);
        let (source, target) = self.genes[split].endpoints();
        let weight = self.genes[split].weight();

        let new_node = self.next_node;
        self.next_node += 1;
        let layer = self.nodes[source].layer() + 1;
        self.nodes.push(Node::new(new_node, layer));
        if layer == self.nodes[target].layer() {
            for node in self
                .nodes
                .iter_mut()
                .filter(|n| n.id() != new_node && n.layer() >= layer)
            {
                node.set_layer(node.layer() + 1);
            }
            self.layer_count += 1;
        }

        self.push_recorded_gene(source, new_node, 1.0, history);
        self.push_recorded_gene(new_node, target, weight, history);
        self.push_recorded_gene(self.bias_node, new_node, 0.0, history);
        self.connect_nodes();
        Ok(new_node)
    }

    /// Flips the enabled status of a random gene.
    /// Returns the affected gene.
    ///
    /// # Errors
    ///
    /// Returns an error if the genome has no genes.
    pub fn mutate_toggle_connection<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&Gene, ToggleError> {
        let gene = self
            .genes
            .choose_mut(rng)
            .ok_or(ToggleError::NoConnections)?;
        gene.set_enabled(!gene.enabled());
        Ok(&*gene)
    }

    /// Combines two genomes and returns a "child" genome.
    ///
    /// The child's nodes and counters are copied from `fitter`.
    /// Each of `fitter`'s genes is inherited: if `other` holds a
    /// gene with the same innovation number, either parent's copy
    /// is taken at random, and it is disabled with a
    /// [chance] if it was disabled in either parent. Genes
    /// only present in `fitter` are copied as they are.
    ///
    /// [chance]: GeneticConfig::inherited_disable_chance
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut fitter = LayeredGenome::new(&config);
    /// let mut other = LayeredGenome::new(&config);
    /// fitter.add_gene(0, 0, 1, 0.5);
    /// other.add_gene(0, 0, 1, -0.5);
    /// other.add_gene(1, 2, 1, 0.1);
    ///
    /// let child = LayeredGenome::crossover(&fitter, &other, &config, &mut rand::thread_rng());
    ///
    /// assert_eq!(child.genes().count(), 1);
    /// assert_eq!(child.genes().next().unwrap().weight().abs(), 0.5);
    /// ```
    pub fn crossover<R: Rng + ?Sized>(
        fitter: &LayeredGenome,
        other: &LayeredGenome,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> LayeredGenome {
        let other_genes: HashMap<Innovation, &Gene, RandomState> =
            other.genes.iter().map(|g| (g.innovation(), g)).collect();

        let genes = fitter
            .genes
            .iter()
            .map(|gene| match other_genes.get(&gene.innovation()) {
                Some(&other_gene) => {
                    let disabled_in_parent = !gene.enabled() || !other_gene.enabled();
                    let mut inherited = if rng.gen::<bool>() {
                        gene.clone()
                    } else {
                        other_gene.clone()
                    };
                    inherited.set_enabled(
                        !(disabled_in_parent && rng.chance(config.inherited_disable_chance)),
                    );
                    inherited
                }
                None => gene.clone(),
            })
            .collect();

        let mut child = LayeredGenome {
            nodes: fitter.nodes.clone(),
            genes,
            ..*fitter
        };
        child.connect_nodes();
        child
    }

    /// Returns the genetic distance from `candidate` to
    /// `representative`:
    ///
    /// `excess_gene_factor · unmatched / N + common_weight_factor · W`
    ///
    /// where `unmatched` counts the genes of either genome whose
    /// innovation number is absent from the other, `N` is
    /// `max(1, |candidate| - large_genome_threshold)`, and `W` is
    /// the mean absolute weight difference of matching genes.
    /// `W` is 0 if either genome has no genes, and 100 if both
    /// have genes but none match.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    ///
    /// let config = GeneticConfig {
    ///     excess_gene_factor: 1.0,
    ///     common_weight_factor: 0.5,
    ///     large_genome_threshold: 20,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut a = LayeredGenome::new(&config);
    /// let mut b = LayeredGenome::new(&config);
    /// a.add_gene(0, 0, 1, 1.0);
    /// b.add_gene(0, 0, 1, -1.0);
    /// b.add_gene(1, 2, 1, 0.0);
    ///
    /// assert_eq!(LayeredGenome::genetic_distance(&a, &b, &config), 1.0 + 0.5 * 2.0);
    /// assert_eq!(LayeredGenome::genetic_distance(&a, &a.clone(), &config), 0.0);
    /// ```
    pub fn genetic_distance(
        candidate: &LayeredGenome,
        representative: &LayeredGenome,
        config: &GeneticConfig,
    ) -> f32 {
        let representative_weights: HashMap<Innovation, f32, RandomState> = representative
            .genes
            .iter()
            .map(|g| (g.innovation(), g.weight()))
            .collect();
        let (matching, weight_difference) = candidate
            .genes
            .iter()
            .filter_map(|g| {
                representative_weights
                    .get(&g.innovation())
                    .map(|w| (g.weight() - w).abs())
            })
            .fold((0, 0.0), |(count, sum), diff| (count + 1, sum + diff));

        let unmatched = candidate.genes.len() + representative.genes.len() - 2 * matching;
        let average_weight_difference =
            if candidate.genes.is_empty() || representative.genes.is_empty() {
                0.0
            } else if matching == 0 {
                UNMATCHED_WEIGHT_DIFFERENCE
            } else {
                weight_difference / matching as f32
            };
        let normalizer = candidate
            .genes
            .len()
            .saturating_sub(config.large_genome_threshold)
            .max(1) as f32;

        config.excess_gene_factor * unmatched as f32 / normalizer
            + config.common_weight_factor * average_weight_difference
    }

    /// Returns an iterator over the genome's genes,
    /// in order of insertion.
    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.iter()
    }

    /// Returns an iterator over the genome's nodes,
    /// in order of id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the number of input nodes.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Returns the number of output nodes.
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Returns the number of layers, input and output included.
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Returns the id of the bias node.
    pub fn bias_node(&self) -> NodeId {
        self.bias_node
    }
}

impl topoevo::Genome for LayeredGenome {
    type Config = GeneticConfig;
    type InnovationHistory = History;
    type EvaluationError = InputSizeError;

    fn new(config: &GeneticConfig) -> LayeredGenome {
        Self::new(config)
    }

    fn evaluate(&mut self, inputs: &[f32]) -> Result<Vec<f32>, InputSizeError> {
        Self::evaluate(self, inputs)
    }

    fn genetic_distance(
        candidate: &LayeredGenome,
        representative: &LayeredGenome,
        config: &GeneticConfig,
    ) -> f32 {
        Self::genetic_distance(candidate, representative, config)
    }

    fn crossover<R: Rng + ?Sized>(
        fitter: &LayeredGenome,
        other: &LayeredGenome,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> LayeredGenome {
        Self::crossover(fitter, other, config, rng)
    }

    fn mutate<R: Rng + ?Sized>(&mut self, history: &mut History, config: &GeneticConfig, rng: &mut R) {
        Self::mutate(self, history, config, rng)
    }
}

impl fmt::Display for LayeredGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        writeln!(f, "Genes:")?;
        for gene in &self.genes {
            writeln!(f, "  {}", gene)?;
        }
        Ok(())
    }
}
