//! A Population is a collection of agents.
//! These are grouped into species, which are
//! evolved once every agent of a generation has
//! been assigned a fitness.
mod agent;
mod config;
mod errors;
mod harness;
pub mod logging;
mod offspring_factory;
mod species;

pub use agent::Agent;
pub use config::PopulationConfig;
pub use errors::PopulationError;
pub use harness::{Harness, Mode};
use offspring_factory::OffspringFactory;
pub use species::{Species, SpeciesID};

use crate::{Chance, Genome, InnovationHistory};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::cmp::Ordering;
use std::error::Error;
use std::mem;

/// A population of agents.
///
/// Each generation, every agent is _killed_ exactly once by
/// assigning it a fitness. When the last one dies the
/// generation cycle runs: agents are speciated, species are
/// ranked, culled and stripped of stagnant or unproductive
/// members, and a new generation of living agents is bred.
pub struct Population<C, H, G> {
    agents: Vec<Agent<G>>,
    species: Vec<Species<G>>,
    last_generation: Vec<Agent<G>>,
    best: Option<Agent<G>>,
    history: H,
    generation: usize,
    population_config: PopulationConfig,
    genetic_config: C,
    rng: StdRng,
}

impl<C, H, G> Population<C, H, G>
where
    G: Genome<InnovationHistory = H, Config = C>,
{
    /// Creates a new population using the passed configurations.
    /// Every initial genome is given one mutation pass.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// [`Genome`]: crate::Genome
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Population, PopulationConfig};
    ///
    /// let pop_config = PopulationConfig {
    ///     // Set desired configuration
    ///     ..PopulationConfig::default()
    /// };
    /// # let genetic_config = GeneticConfig::default();
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let population = Population::<_, _, G>::new(pop_config, genetic_config);
    /// assert_eq!(population.agents().count(), 200);
    /// ```
    pub fn new(population_config: PopulationConfig, genetic_config: C) -> Population<C, H, G>
    where
        H: InnovationHistory<Config = C>,
    {
        let mut rng = match population_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut history = H::new(&genetic_config);
        let agents = (0..population_config.size.get())
            .map(|_| {
                let mut genome = G::new(&genetic_config);
                genome.mutate(&mut history, &genetic_config, &mut rng);
                Agent::new(genome)
            })
            .collect();
        Population {
            agents,
            species: vec![],
            last_generation: vec![],
            best: None,
            history,
            generation: 0,
            population_config,
            genetic_config,
            rng,
        }
    }

    /// Evaluates the genome of the agent at `index` and
    /// returns the index of its greatest output.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or
    /// the genome cannot be evaluated on `inputs`.
    pub fn decide(&mut self, index: usize, inputs: &[f32]) -> Result<usize, PopulationError> {
        let size = self.agents.len();
        let agent = self
            .agents
            .get_mut(index)
            .ok_or(PopulationError::AgentOutOfRange { index, size })?;
        agent
            .decide(inputs)
            .map_err(|e| PopulationError::Evaluation(Box::new(e)))
    }

    /// Kills the agent at `index`, assigning it the fitness
    /// computed by `fitness` from its genome and `context`.
    /// Killing an agent that is already dead does nothing, and
    /// `fitness` is not called.
    ///
    /// If this was the last living agent, the generation cycle
    /// runs and `Ok(true)` is returned.
    ///
    /// # Errors
    /// Returns an error if the index is out of range, if
    /// `fitness` fails, or if it returns a negative or NaN
    /// value. In the latter two cases the agent stays alive.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Population, PopulationConfig};
    /// use std::convert::Infallible;
    /// use std::num::NonZeroUsize;
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(2).unwrap(),
    ///         ..PopulationConfig::default()
    ///     },
    ///     genetic_config,
    /// );
    ///
    /// let score = |_: &G, steps: &u32| Ok::<_, Infallible>(*steps as f32);
    /// assert_eq!(population.kill(0, &10, score).unwrap(), false);
    /// assert_eq!(population.kill(1, &25, score).unwrap(), true);
    /// assert_eq!(population.generation(), 1);
    /// ```
    pub fn kill<X, F, E>(
        &mut self,
        index: usize,
        context: &X,
        fitness: F,
    ) -> Result<bool, PopulationError>
    where
        X: ?Sized,
        F: FnOnce(&G, &X) -> Result<f32, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let size = self.agents.len();
        let agent = self
            .agents
            .get_mut(index)
            .ok_or(PopulationError::AgentOutOfRange { index, size })?;
        if !agent.is_alive() {
            return Ok(false);
        }
        let value = fitness(agent.genome(), context).map_err(|e| {
            PopulationError::FitnessEvaluation {
                agent: index,
                source: e.into(),
            }
        })?;
        check_fitness(index, value)?;
        agent.set_fitness(value);

        if self.alive_count() == 0 {
            self.next_generation();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Kills every living agent with the fitness computed by
    /// `evaluator`, then runs the generation cycle.
    ///
    /// The return value of the evaluation function
    /// should be non-negative.
    ///
    /// # Errors
    /// Returns an error, before the cycle runs, if `evaluator`
    /// returns a negative or NaN value. Agents evaluated up to
    /// that point remain dead.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::default(),
    ///     genetic_config,
    /// );
    ///
    /// population.evaluate_fitness(|g| {
    ///     // Compute genome's fitness...
    ///     g.genes().count() as f32
    /// }).unwrap();
    ///
    /// assert_eq!(population.generation(), 1);
    /// ```
    pub fn evaluate_fitness<E>(&mut self, mut evaluator: E) -> Result<(), PopulationError>
    where
        E: FnMut(&G) -> f32,
    {
        for (index, agent) in self.agents.iter_mut().enumerate() {
            if agent.is_alive() {
                let fitness = evaluator(agent.genome());
                check_fitness(index, fitness)?;
                agent.set_fitness(fitness);
            }
        }
        self.next_generation();
        Ok(())
    }

    /// Runs the generation cycle.
    ///
    /// # Errors
    /// Returns an error if any agent is still alive.
    pub fn evolve(&mut self) -> Result<(), PopulationError> {
        match self.alive_count() {
            0 => {
                self.next_generation();
                Ok(())
            }
            alive => Err(PopulationError::GenerationIncomplete { alive }),
        }
    }

    /// Ends the current generation and breeds the next.
    fn next_generation(&mut self) {
        let finished = mem::take(&mut self.agents);
        self.speciate(&finished);

        for species in &mut self.species {
            species.sort_and_track();
        }
        self.species.sort_by(|s1, s2| {
            s2.best_fitness()
                .partial_cmp(&s1.best_fitness())
                .unwrap_or(Ordering::Equal)
        });
        for species in &mut self.species {
            species.cull(self.population_config.survival_threshold);
            species.share_fitness();
        }
        self.update_champion();
        self.remove_stale_species();
        self.remove_barren_species();

        self.agents = OffspringFactory::new(
            &self.species,
            &mut self.history,
            &self.genetic_config,
            &self.population_config,
            &mut self.rng,
        )
        .generate_offspring();
        self.last_generation = finished;
        self.generation += 1;

        log::info!(
            "generation {} bred: {} species, champion fitness {:?}",
            self.generation,
            self.species.len(),
            self.best.as_ref().and_then(Agent::fitness),
        );
    }

    /// Reassigns every agent of the finished generation to
    /// the first species whose representative is close enough,
    /// founding a new species if there is none. Species left
    /// without members are removed.
    fn speciate(&mut self, finished: &[Agent<G>]) {
        for species in &mut self.species {
            species.agents.clear();
        }
        let threshold = self.population_config.distance_threshold;
        let mut new_species_count = 0;
        for agent in finished {
            let genetic_config = &self.genetic_config;
            match self
                .species
                .iter_mut()
                .find(|s| s.is_compatible(agent.genome(), genetic_config, threshold))
            {
                Some(species) => species.add_agent(agent.clone()),
                None => {
                    self.species.push(Species::new(
                        SpeciesID(self.generation, new_species_count),
                        agent.clone(),
                    ));
                    new_species_count += 1;
                }
            }
        }
        self.species.retain(|s| s.agents().next().is_some());
    }

    /// Replaces the all-time champion with the leading
    /// species' champion if it is fitter.
    fn update_champion(&mut self) {
        if let Some(leader) = self.species.first().map(Species::champion) {
            if self
                .best
                .as_ref()
                .map_or(true, |best| leader.score() > best.score())
            {
                self.best = Some(leader.clone());
            }
        }
    }

    /// Removes all stagnated species, except the best.
    fn remove_stale_species(&mut self) {
        let threshold = self.population_config.stagnation_threshold.get();
        let before = self.species.len();
        let mut index = 0;
        self.species.retain(|s| {
            let keep = index == 0 || s.time_stagnated() < threshold;
            index += 1;
            keep
        });
        if self.species.len() < before {
            log::debug!("removed {} stagnated species", before - self.species.len());
        }
    }

    /// Removes all species that would not earn a single
    /// offspring, except the best.
    fn remove_barren_species(&mut self) {
        let size = self.population_config.size.get();
        let average_sum: f32 = self.species.iter().map(Species::average_fitness).sum();
        let before = self.species.len();
        let mut index = 0;
        self.species.retain(|s| {
            let keep = index == 0 || offspring_share(s.average_fitness(), average_sum, size) >= 1.0;
            index += 1;
            keep
        });
        if self.species.len() < before {
            log::debug!("removed {} barren species", before - self.species.len());
        }
    }

    /// Resets the population to an initial randomized state.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::default(),
    ///     genetic_config,
    /// );
    ///
    /// population.evaluate_fitness(|_| 1.0).unwrap();
    /// population.reset();
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn reset(&mut self)
    where
        C: Clone,
        H: InnovationHistory<Config = C>,
    {
        *self = Population::new(self.population_config.clone(), self.genetic_config.clone());
    }

    /// Returns the best champion seen so far, with its
    /// unshared fitness, or `None` before the first
    /// generation ends.
    ///
    /// After each generation, the champion of the top-ranked
    /// species replaces it if fitter. Species are ranked by
    /// their best-ever fitness, so a fitter agent of a
    /// lower-ranked species is not considered.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Population, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(20).unwrap(),
    ///         ..PopulationConfig::default()
    ///     },
    ///     genetic_config,
    /// );
    /// assert!(population.champion().is_none());
    ///
    /// let mut fitness = 0.0;
    /// population.evaluate_fitness(move |_| {
    ///     fitness += 10.0;
    ///     fitness
    /// }).unwrap();
    ///
    /// assert_eq!(population.champion().unwrap().fitness(), Some(20.0 * 10.0));
    /// ```
    pub fn champion(&self) -> Option<&Agent<G>> {
        self.best.as_ref()
    }

    /// Returns an iterator over the current generation's agents.
    pub fn agents(&self) -> impl Iterator<Item = &Agent<G>> {
        self.agents.iter()
    }

    /// Returns the agent at `index`, if any.
    pub fn agent(&self, index: usize) -> Option<&Agent<G>> {
        self.agents.get(index)
    }

    /// Returns the number of agents yet to be killed
    /// in the current generation.
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Returns an iterator over the agents of the last
    /// completed generation, with their unshared fitness.
    pub fn last_generation(&self) -> impl Iterator<Item = &Agent<G>> {
        self.last_generation.iter()
    }

    /// Returns an iterator over all current species.
    ///
    /// Species are ranked by best fitness, and hold the
    /// surviving members of the last completed generation.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(PopulationConfig::default(), genetic_config);
    /// population.evaluate_fitness(|g| g.genes().count() as f32).unwrap();
    ///
    /// for species in population.species() {
    ///     println!(
    ///         "Species {:?} has best fitness {} and {} survivors",
    ///         species.id(),
    ///         species.best_fitness(),
    ///         species.agents().count(),
    ///     );
    /// }
    /// ```
    pub fn species(&self) -> impl Iterator<Item = &Species<G>> {
        self.species.iter()
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population's innovation history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the population's configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the configuration passed to genomes.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }
}

/// Rejects negative and NaN fitness values.
fn check_fitness(agent: usize, fitness: f32) -> Result<(), PopulationError> {
    if fitness.is_nan() || fitness < 0.0 {
        Err(PopulationError::InvalidFitness { agent, fitness })
    } else {
        Ok(())
    }
}

/// Returns a species' share of the next generation,
/// `average / average_sum · size`, or 0 if the sum
/// is not positive.
fn offspring_share(average_fitness: f32, average_sum: f32, size: usize) -> f32 {
    if average_sum > 0.0 {
        average_fitness / average_sum * size as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MutationCounter, Point, PointConfig};
    use std::convert::Infallible;
    use std::num::NonZeroUsize;

    type PointPopulation = Population<PointConfig, MutationCounter, Point>;

    fn population(size: usize, drift: f32) -> PointPopulation {
        Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(size).unwrap(),
                seed: Some(42),
                ..PopulationConfig::default()
            },
            PointConfig { drift },
        )
    }

    fn place(population: &mut PointPopulation, positions: &[f32]) {
        population.agents = positions.iter().map(|&p| Agent::new(Point(p))).collect();
    }

    fn position(genome: &Point, _: &()) -> Result<f32, Infallible> {
        Ok(genome.0)
    }

    #[test]
    fn new_population_is_mutated_once() {
        let population = population(10, 0.0);
        assert_eq!(population.agents().count(), 10);
        assert_eq!(population.history().mutations, 10);
        assert_eq!(population.alive_count(), 10);
        assert_eq!(population.generation(), 0);
        assert!(population.champion().is_none());
    }

    #[test]
    fn decide_returns_argmax() {
        let mut population = population(2, 0.0);
        place(&mut population, &[1.0, -1.0]);

        assert_eq!(population.decide(0, &[1.0, 3.0, 2.0]).unwrap(), 1);
        assert_eq!(population.decide(1, &[1.0, 3.0, 2.0]).unwrap(), 0);
        assert!(matches!(
            population.decide(0, &[]),
            Err(PopulationError::Evaluation(_))
        ));
        assert!(matches!(
            population.decide(2, &[1.0]),
            Err(PopulationError::AgentOutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn kill_runs_callback_once() {
        let mut population = population(3, 0.0);
        let mut calls = 0;
        let mut count = |_: &Point, _: &()| {
            calls += 1;
            Ok::<_, Infallible>(1.0)
        };

        assert!(!population.kill(0, &(), &mut count).unwrap());
        assert!(!population.kill(0, &(), &mut count).unwrap());
        assert_eq!(population.agent(0).unwrap().fitness(), Some(1.0));
        assert_eq!(population.alive_count(), 2);
        drop(count);
        assert_eq!(calls, 1);
    }

    #[test]
    fn failing_fitness_keeps_agent_alive() {
        let mut population = population(2, 0.0);

        let error = population
            .kill(1, &(), |_: &Point, _: &()| Err::<f32, _>("sensor offline"))
            .unwrap_err();

        assert!(matches!(error, PopulationError::FitnessEvaluation { agent: 1, .. }));
        assert_eq!(error.source().unwrap().to_string(), "sensor offline");
        assert!(population.agent(1).unwrap().is_alive());
    }

    #[test]
    fn invalid_fitness_is_rejected() {
        let mut population = population(2, 0.0);
        for bad in [-1.0, f32::NAN] {
            let error = population
                .kill(0, &(), |_: &Point, _: &()| Ok::<_, Infallible>(bad))
                .unwrap_err();
            assert!(matches!(error, PopulationError::InvalidFitness { agent: 0, .. }));
        }
        assert_eq!(population.alive_count(), 2);
    }

    #[test]
    fn last_kill_starts_new_generation() {
        let mut population = population(6, 0.1);
        for index in 0..5 {
            assert!(!population.kill(index, &(), position).unwrap());
        }
        assert!(population.kill(5, &(), position).unwrap());

        assert_eq!(population.generation(), 1);
        assert_eq!(population.agents().count(), 6);
        assert_eq!(population.alive_count(), 6);
        assert_eq!(population.last_generation().count(), 6);
        assert!(population.champion().is_some());
    }

    #[test]
    fn evolve_requires_dead_population() {
        let mut population = population(3, 0.0);
        population.kill(0, &(), position).unwrap();

        assert!(matches!(
            population.evolve(),
            Err(PopulationError::GenerationIncomplete { alive: 2 })
        ));
    }

    #[test]
    fn identical_genomes_share_species() {
        let mut population = population(8, 0.0);
        population.evaluate_fitness(|_| 1.0).unwrap();

        assert_eq!(population.species().count(), 1);
        assert_eq!(population.agents().count(), 8);
    }

    #[test]
    fn distant_genomes_split_species() {
        let mut population = population(4, 0.0);
        place(&mut population, &[0.0, 0.5, 10.0, 10.2]);
        population
            .evaluate_fitness(|g| if g.0 < 5.0 { 1.0 } else { 2.0 })
            .unwrap();

        let species: Vec<_> = population.species().collect();
        assert_eq!(species.len(), 2);
        assert!(species[0].best_fitness() > species[1].best_fitness());
        assert_eq!(species[0].representative(), &Point(10.0));
        assert_eq!(species[1].representative(), &Point(0.0));
        // Each champion is carried over unchanged.
        for s in &species {
            assert!(population.agents().any(|a| a.genome() == s.champion().genome()));
        }
        assert_eq!(population.champion().unwrap().fitness(), Some(2.0));
        assert_eq!(population.agents().count(), 4);
    }

    #[test]
    fn stale_species_removed_except_best() {
        let mut population = Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(4).unwrap(),
                stagnation_threshold: NonZeroUsize::new(1).unwrap(),
                seed: Some(1),
                ..PopulationConfig::default()
            },
            PointConfig { drift: 0.0 },
        );
        place(&mut population, &[0.0, 0.0, 10.0, 10.0]);
        population
            .evaluate_fitness(|g| if g.0 < 5.0 { 2.0 } else { 1.0 })
            .unwrap();

        assert_eq!(population.species().count(), 1);
        assert!(population.agents().all(|a| a.genome() == &Point(0.0)));
    }

    #[test]
    fn barren_species_removed() {
        let mut population = population(4, 0.0);
        place(&mut population, &[0.0, 0.0, 0.0, 10.0]);
        population
            .evaluate_fitness(|g| if g.0 < 5.0 { 100.0 } else { 0.001 })
            .unwrap();

        assert_eq!(population.species().count(), 1);
        assert_eq!(population.agents().count(), 4);
    }

    #[test]
    fn offspring_follow_species_quotas() {
        let mut population = population(8, 0.0);
        place(&mut population, &[0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0]);
        population
            .evaluate_fitness(|g| if g.0 < 5.0 { 3.0 } else { 1.0 })
            .unwrap();

        // Culled to two members each, the averages are 1.5 and 0.5,
        // so the species earn 6 and 2 of the 8 places.
        let averages: Vec<f32> = population.species().map(Species::average_fitness).collect();
        assert_eq!(averages, [1.5, 0.5]);
        let near = population.agents().filter(|a| a.genome() == &Point(0.0)).count();
        let far = population.agents().filter(|a| a.genome() == &Point(10.0)).count();
        assert_eq!((near, far), (6, 2));
    }

    #[test]
    fn zero_fitness_population_survives() {
        let mut population = population(5, 0.0);
        place(&mut population, &[0.0, 0.0, 10.0, 10.0, 20.0]);
        population.evaluate_fitness(|_| 0.0).unwrap();

        assert_eq!(population.species().count(), 1);
        assert_eq!(population.agents().count(), 5);
        assert_eq!(population.alive_count(), 5);
    }

    #[test]
    fn fitness_sharing_recorded_in_species() {
        let mut population = population(4, 0.0);
        place(&mut population, &[0.0, 0.1, 0.2, 0.3]);
        population.evaluate_fitness(|_| 8.0).unwrap();

        let species = population.species().next().unwrap();
        // Four members culled to two, each sharing 8 between two.
        assert_eq!(species.agents().count(), 2);
        assert_eq!(species.average_fitness(), 4.0);
        assert_eq!(species.champion().fitness(), Some(8.0));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let mut population = population(12, 0.5);
            for _ in 0..4 {
                population.evaluate_fitness(|g| g.0).unwrap();
            }
            population.agents().cloned().collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn offspring_share_of_empty_sum() {
        assert_eq!(offspring_share(3.0, 0.0, 10), 0.0);
        assert_eq!(offspring_share(1.0, 4.0, 10), 2.5);
    }
}
