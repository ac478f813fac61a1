use super::*;

/// Auxiliary type for offspring generation.
/// Handles all the tasks of generating a population's
/// offspring according to the specified configs
/// and the species' shares of the total fitness.
pub(super) struct OffspringFactory<'a, C, H, G, R: ?Sized> {
    species: &'a [Species<G>],
    history: &'a mut H,
    genetic_config: &'a C,
    population_config: &'a PopulationConfig,
    rng: &'a mut R,
}

impl<'a, C, H, G, R> OffspringFactory<'a, C, H, G, R>
where
    G: Genome<InnovationHistory = H, Config = C>,
    R: Rng + ?Sized,
{
    pub(super) fn new(
        species: &'a [Species<G>],
        history: &'a mut H,
        genetic_config: &'a C,
        population_config: &'a PopulationConfig,
        rng: &'a mut R,
    ) -> OffspringFactory<'a, C, H, G, R> {
        OffspringFactory {
            species,
            history,
            genetic_config,
            population_config,
            rng,
        }
    }

    /// Generate the next generation's agents.
    ///
    /// Every species passes on its champion unchanged, plus
    /// one fewer baby than its share of the population. Any
    /// shortfall is made up with babies of the first species.
    pub(super) fn generate_offspring(&mut self) -> Vec<Agent<G>> {
        let size = self.population_config.size.get();
        let average_sum: f32 = self.species.iter().map(Species::average_fitness).sum();
        let mut offspring = Vec::with_capacity(size);

        let all_species = self.species;
        for species in all_species {
            offspring.push(species.champion().revived());
            let share = offspring_share(species.average_fitness(), average_sum, size) as usize;
            for _ in 1..share {
                offspring.push(Agent::new(self.baby_of(species)));
            }
        }

        if let Some(first) = all_species.first() {
            while offspring.len() < size {
                offspring.push(Agent::new(self.baby_of(first)));
            }
        }
        offspring.truncate(size);
        offspring
    }

    /// Produces a mutated child of the species: either a
    /// clone of one parent, or the crossover of two with
    /// the fitter one as the primary parent.
    fn baby_of(&mut self, species: &Species<G>) -> G {
        // `species` is passed in rather than looked up
        // through `self`, as the borrow-checker can't see
        // that we aren't touching it when we modify
        // self.history.
        let mut baby = if self
            .rng
            .chance(self.population_config.asexual_reproduction_chance)
        {
            species.select_parent(self.rng).genome().clone()
        } else {
            let parent1 = species.select_parent(self.rng);
            let parent2 = species.select_parent(self.rng);
            let (fitter, other) = if parent1.score() < parent2.score() {
                (parent2, parent1)
            } else {
                (parent1, parent2)
            };
            G::crossover(fitter.genome(), other.genome(), self.genetic_config, self.rng)
        };
        baby.mutate(self.history, self.genetic_config, self.rng);
        baby
    }
}
