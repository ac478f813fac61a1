use crate::populations::Agent;
use crate::Genome;

use rand::Rng;

use std::cmp::Ordering;

/// Species identifier. Specifies
/// the generation in which the species
/// was born, and the count of other species
/// generated in the _same generation_ before
/// the one identified (i.e, if it was the
/// third species born in generation 5, it
/// will be species [5, 2]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeciesID(pub usize, pub usize);

/// Species are collections of reproductively
/// compatible (within a certain [genetic distance])
/// agents. Membership is determined by calculating
/// the genetic distance to a _representative_, which
/// is the best genome the species has ever produced.
///
/// Species persist across generations: their members
/// are cleared and reassigned at the end of each one.
/// A species that goes [`stagnation_threshold`]
/// generations without improving its best fitness
/// is removed, unless it is the best species.
///
/// [genetic distance]: crate::PopulationConfig::distance_threshold
/// [`stagnation_threshold`]: crate::PopulationConfig::stagnation_threshold
#[derive(Debug, Clone)]
pub struct Species<G> {
    id: SpeciesID,
    pub(super) agents: Vec<Agent<G>>,
    representative: G,
    champion: Agent<G>,
    best_fitness: f32,
    average_fitness: f32,
    staleness: usize,
}

impl<G: Genome> Species<G> {
    /// Creates a new species with the specified ID,
    /// founded by `founder`. The founder becomes the
    /// species' representative and champion.
    ///
    /// # Examples
    /// ```
    /// use topoevo::{Agent, Species, SpeciesID};
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    ///
    /// let species = Species::new(
    ///     SpeciesID(1, 0),
    ///     Agent::new(LayeredGenome::new(&GeneticConfig::zero())),
    /// );
    ///
    /// assert_eq!(species.id(), SpeciesID(1, 0));
    /// assert_eq!(species.agents().count(), 1);
    /// ```
    pub fn new(id: SpeciesID, founder: Agent<G>) -> Species<G> {
        Species {
            id,
            representative: founder.genome().clone(),
            champion: founder.clone(),
            best_fitness: founder.score(),
            average_fitness: founder.score(),
            staleness: 0,
            agents: vec![founder],
        }
    }

    /// Returns the species' ID.
    pub fn id(&self) -> SpeciesID {
        self.id
    }

    /// Returns the best genome the species has produced.
    pub fn representative(&self) -> &G {
        &self.representative
    }

    /// Returns the best agent of the last completed
    /// generation, with its unshared fitness.
    pub fn champion(&self) -> &Agent<G> {
        &self.champion
    }

    /// Returns the best fitness the species has achieved.
    pub fn best_fitness(&self) -> f32 {
        self.best_fitness
    }

    /// Returns the mean shared fitness of the species'
    /// surviving members.
    pub fn average_fitness(&self) -> f32 {
        self.average_fitness
    }

    /// Returns the number of generations since the
    /// species' best fitness last improved.
    pub fn time_stagnated(&self) -> usize {
        self.staleness
    }

    /// Returns an iterator over the species' members.
    pub fn agents(&self) -> impl Iterator<Item = &Agent<G>> {
        self.agents.iter()
    }

    /// Returns whether `candidate` is close enough to the
    /// representative to join the species. The threshold
    /// itself is excluded.
    ///
    /// # Examples
    /// ```
    /// use topoevo::{Agent, Species, SpeciesID};
    /// use topoevo_nn::genomics::{GeneticConfig, LayeredGenome};
    ///
    /// let config = GeneticConfig::default();
    /// let genome = LayeredGenome::new(&config);
    /// let species = Species::new(SpeciesID(0, 0), Agent::new(genome.clone()));
    ///
    /// assert!(species.is_compatible(&genome, &config, 4.0));
    /// assert!(!species.is_compatible(&genome, &config, 0.0));
    /// ```
    pub fn is_compatible(&self, candidate: &G, config: &G::Config, threshold: f32) -> bool {
        G::genetic_distance(candidate, &self.representative, config) < threshold
    }

    /// Adds an agent to the species.
    pub fn add_agent(&mut self, agent: Agent<G>) {
        self.agents.push(agent);
    }

    /// Sorts the members by decreasing fitness, records the
    /// best of them as champion, and updates the stagnation
    /// count: an improvement on the best fitness resets it
    /// and makes the new best the representative.
    pub(super) fn sort_and_track(&mut self) {
        self.agents
            .sort_by(|a1, a2| a2.score().partial_cmp(&a1.score()).unwrap_or(Ordering::Equal));
        let leader = match self.agents.first() {
            Some(leader) => leader,
            None => return,
        };
        self.champion = leader.clone();
        if leader.score() > self.best_fitness {
            self.staleness = 0;
            self.best_fitness = leader.score();
            self.representative = leader.genome().clone();
        } else {
            self.staleness += 1;
        }
    }

    /// Keeps only the top `survival_threshold` fraction of
    /// the (sorted) members. Species of two or fewer members
    /// are left untouched.
    pub(super) fn cull(&mut self, survival_threshold: f32) {
        if self.agents.len() > 2 {
            let survivors = (self.agents.len() as f32 * survival_threshold).floor() as usize;
            self.agents.truncate(survivors.max(1));
        }
    }

    /// Divides every member's fitness by the member count
    /// and records the resulting average.
    pub(super) fn share_fitness(&mut self) {
        let count = self.agents.len() as f32;
        for agent in &mut self.agents {
            let shared = agent.score() / count;
            agent.set_fitness(shared);
        }
        self.average_fitness = if self.agents.is_empty() {
            0.0
        } else {
            self.agents.iter().map(Agent::score).sum::<f32>() / count
        };
    }

    /// Picks a member with probability proportional to its
    /// fitness. Falls back to the first member when every
    /// fitness is 0.
    pub(super) fn select_parent<R: Rng + ?Sized>(&self, rng: &mut R) -> &Agent<G> {
        let fitness_sum: f32 = self.agents.iter().map(Agent::score).sum();
        let target = rng.gen::<f32>() * fitness_sum;
        let mut running_sum = 0.0;
        for agent in &self.agents {
            running_sum += agent.score();
            if running_sum > target {
                return agent;
            }
        }
        &self.agents[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Point;
    use rand::{rngs::StdRng, SeedableRng};

    fn dead(position: f32, fitness: f32) -> Agent<Point> {
        let mut agent = Agent::new(Point(position));
        agent.set_fitness(fitness);
        agent
    }

    fn species_of(fitnesses: &[f32]) -> Species<Point> {
        let mut species = Species::new(SpeciesID(0, 0), dead(0.0, fitnesses[0]));
        for (i, fitness) in fitnesses.iter().enumerate().skip(1) {
            species.add_agent(dead(i as f32, *fitness));
        }
        species
    }

    #[test]
    fn sort_and_track_improvement() {
        let mut species = species_of(&[1.0, 5.0, 3.0]);
        species.sort_and_track();

        let order: Vec<f32> = species.agents().map(Agent::score).collect();
        assert_eq!(order, [5.0, 3.0, 1.0]);
        assert_eq!(species.best_fitness(), 5.0);
        assert_eq!(species.representative(), &Point(1.0));
        assert_eq!(species.champion().fitness(), Some(5.0));
        assert_eq!(species.time_stagnated(), 0);
    }

    #[test]
    fn sort_and_track_stagnation() {
        let mut species = species_of(&[4.0]);
        species.sort_and_track();
        assert_eq!(species.time_stagnated(), 1);

        species.agents.clear();
        species.add_agent(dead(7.0, 2.0));
        species.sort_and_track();

        assert_eq!(species.time_stagnated(), 2);
        // The representative is the best ever, the champion the best of now.
        assert_eq!(species.representative(), &Point(0.0));
        assert_eq!(species.champion().genome(), &Point(7.0));
    }

    #[test]
    fn cull_keeps_top_half() {
        let mut species = species_of(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        species.sort_and_track();
        species.cull(0.5);
        assert!(species.agents().count() <= 5);
        assert_eq!(species.agents().map(Agent::score).collect::<Vec<_>>(), [10.0, 9.0, 8.0, 7.0, 6.0]);

        let mut small = species_of(&[1.0, 2.0]);
        small.cull(0.5);
        assert_eq!(small.agents().count(), 2);
    }

    #[test]
    fn share_fitness_divides_by_size() {
        let mut species = species_of(&[4.0, 8.0]);
        species.share_fitness();

        assert_eq!(species.agents().map(Agent::score).collect::<Vec<_>>(), [2.0, 4.0]);
        assert_eq!(species.average_fitness(), 3.0);
    }

    #[test]
    fn select_parent_zero_fitness_falls_back_to_first() {
        let species = species_of(&[0.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(species.select_parent(&mut rng).genome(), &Point(0.0));
        }
    }

    #[test]
    fn select_parent_ignores_zero_fitness_members() {
        let species = species_of(&[0.0, 3.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(species.select_parent(&mut rng).genome(), &Point(1.0));
        }
    }

    #[test]
    fn compatibility_threshold_is_exclusive() {
        let species = species_of(&[1.0]);
        let config = crate::testing::PointConfig { drift: 0.0 };
        assert!(species.is_compatible(&Point(3.9), &config, 4.0));
        assert!(!species.is_compatible(&Point(4.0), &config, 4.0));
    }
}
