use crate::genomics::GeneticConfig;
use crate::{Innovation, NodeId};

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use topoevo::InnovationHistory;

use std::collections::{HashMap, HashSet};

/// The set of innovation numbers present in a genome
/// at the time of a structural mutation.
pub type Signature = HashSet<Innovation, RandomState>;

/// A single structural mutation, as first observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnovationRecord {
    input: NodeId,
    output: NodeId,
    innovation: Innovation,
    signature: Signature,
}

impl InnovationRecord {
    /// Returns the record's source and target nodes.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.input, self.output)
    }

    /// Returns the innovation number assigned to the mutation.
    pub fn innovation(&self) -> Innovation {
        self.innovation
    }

    /// Returns the innovation numbers held by the genome
    /// in which the mutation first took place.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    fn matches(&self, input: NodeId, output: NodeId, signature: &Signature) -> bool {
        self.input == input && self.output == output && self.signature == *signature
    }
}

/// A `History` keeps track of connection innovations in a
/// population, in order to make sure identical mutations
/// are assigned the same innovation numbers.
///
/// Two mutations are identical iff they connect the same
/// pair of nodes _and_ happen in genomes holding exactly
/// the same set of innovation numbers. Node ids are local
/// to each genome, so the set of innovations is what tells
/// apart two structurally different genomes that happen to
/// number their nodes alike.
///
/// Records are never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    next_innovation: Innovation,
    records: Vec<InnovationRecord>,
    by_endpoints: HashMap<(NodeId, NodeId), Vec<usize>, RandomState>,
}

impl InnovationHistory for History {
    type Config = GeneticConfig;

    fn new(config: &GeneticConfig) -> History {
        Self::new(config)
    }
}

impl History {
    /// Creates a new, empty History. Innovation
    /// numbers are handed out starting at 0.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, History};
    ///
    /// let history = History::new(&GeneticConfig::zero());
    /// assert_eq!(history.next_innovation(), 0);
    /// ```
    pub fn new(_config: &GeneticConfig) -> History {
        History {
            next_innovation: 0,
            records: vec![],
            by_endpoints: HashMap::default(),
        }
    }

    /// Returns the innovation number for a connection from
    /// `input` to `output` created in a genome holding the
    /// innovations in `signature`.
    ///
    /// If an identical mutation was recorded before, its number
    /// is returned. Otherwise a new number is allocated and the
    /// mutation is recorded.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, History, Signature};
    ///
    /// let mut history = History::new(&GeneticConfig::zero());
    /// let empty = Signature::default();
    ///
    /// let first = history.innovation_for(0, 3, &empty);
    /// assert_eq!(history.innovation_for(0, 3, &empty), first);
    ///
    /// let grown: Signature = [first].into_iter().collect();
    /// assert_ne!(history.innovation_for(0, 3, &grown), first);
    /// ```
    pub fn innovation_for(
        &mut self,
        input: NodeId,
        output: NodeId,
        signature: &Signature,
    ) -> Innovation {
        if let Some(record) = self.find(input, output, signature) {
            return record.innovation;
        }
        let innovation = self.next_innovation;
        self.next_innovation += 1;
        self.by_endpoints
            .entry((input, output))
            .or_default()
            .push(self.records.len());
        self.records.push(InnovationRecord {
            input,
            output,
            innovation,
            signature: signature.clone(),
        });
        innovation
    }

    fn find(&self, input: NodeId, output: NodeId, signature: &Signature) -> Option<&InnovationRecord> {
        self.by_endpoints
            .get(&(input, output))?
            .iter()
            .map(|&i| &self.records[i])
            .find(|r| r.matches(input, output, signature))
    }

    /// Returns the next innovation number to be allocated.
    pub fn next_innovation(&self) -> Innovation {
        self.next_innovation
    }

    /// Returns an iterator over all recorded mutations,
    /// in order of first occurrence.
    ///
    /// # Examples
    /// ```
    /// use topoevo_nn::genomics::{GeneticConfig, History, Signature};
    ///
    /// let mut history = History::new(&GeneticConfig::zero());
    /// history.innovation_for(1, 4, &Signature::default());
    ///
    /// for record in history.records() {
    ///     println!("innovation {} connects {:?}", record.innovation(), record.endpoints());
    /// }
    /// ```
    pub fn records(&self) -> impl Iterator<Item = &InnovationRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(ids: &[Innovation]) -> Signature {
        ids.iter().copied().collect()
    }

    #[test]
    fn identical_mutations_share_innovation() {
        let mut history = History::new(&GeneticConfig::zero());
        let a = history.innovation_for(0, 3, &signature(&[]));
        let b = history.innovation_for(0, 3, &signature(&[]));
        assert_eq!(a, b);
        assert_eq!(history.records().count(), 1);
    }

    #[test]
    fn differing_signature_allocates_new_innovation() {
        let mut history = History::new(&GeneticConfig::zero());
        let a = history.innovation_for(0, 3, &signature(&[]));
        let b = history.innovation_for(1, 3, &signature(&[a]));
        let c = history.innovation_for(0, 3, &signature(&[b]));
        assert_eq!((a, b, c), (0, 1, 2));
        // Subsets and supersets do not match either.
        let d = history.innovation_for(0, 3, &signature(&[a, b]));
        assert_eq!(d, 3);
        assert_eq!(history.innovation_for(0, 3, &signature(&[b, a])), d);
    }

    #[test]
    fn differing_endpoints_allocate_new_innovation() {
        let mut history = History::new(&GeneticConfig::zero());
        let a = history.innovation_for(0, 3, &signature(&[]));
        let b = history.innovation_for(3, 0, &signature(&[]));
        assert_ne!(a, b);
        assert_eq!(history.next_innovation(), 2);
    }
}
