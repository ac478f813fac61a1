use super::{Agent, Population, SpeciesID};

use crate::genome::Genome;

use std::cmp::Ordering;
use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the surviving members of every species.
    AllGenomes,
    /// Clones species champions.
    SpeciesChampions,
    /// Clones only the population champion.
    PopulationChampion,
    /// Clones no genomes.
    NoGenomes,
}

/// A snapshot of a population, taken after
/// a generation has ended.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord<G>,
    pub species_count: usize,
    pub champion_fitness: Option<f32>,
    pub agent_stats: Vec<(String, Stats)>,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log {{")?;
        writeln!(f, "\tgeneration_number: {:?}", self.generation_number)?;
        writeln!(f, "\tspecies_count: {:?}", self.species_count)?;
        writeln!(f, "\tchampion_fitness: {:?}", self.champion_fitness)?;
        for (name, stats) in &self.agent_stats {
            writeln!(f, "\t{}: {:?}", name, stats)?;
        }
        write!(f, "}}")
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// An empty sequence yields all zeroes.
    ///
    /// # Examples
    /// ```
    /// use topoevo::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Stats {
        let mut data: Vec<f32> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: 0.0,
                minimum: 0.0,
                mean: 0.0,
                median: 0.0,
            };
        }
        data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f32>() / data.len() as f32,
            median,
        }
    }
}

/// A reporting-level dependant store
/// of genomes from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord<G> {
    /// Species IDs, surviving genomes and stagnation level.
    Species(Vec<(SpeciesID, Vec<G>, usize)>),
    /// Only species IDs, species champions, and stagnation level.
    SpeciesChampions(Vec<(SpeciesID, G, usize)>),
    /// Only population champion.
    PopulationChampion(G),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Genome> EvolutionLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::LayeredGenome as G;
    /// use topoevo::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::NoGenomes);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population's last
    /// completed generation.
    ///
    /// The `agent_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the finished
    /// agents, where each statistic is named by `stat_names`.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use topoevo::{Agent, Population, PopulationConfig};
    /// use topoevo::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut logger = EvolutionLogger::<G>::new(ReportingLevel::NoGenomes);
    /// # let genetic_config = GeneticConfig::default();
    /// let mut population = Population::<_, _, G>::new(PopulationConfig::default(), genetic_config);
    ///
    /// // Do something with the population...
    /// population.evaluate_fitness(|g| g.genes().count() as f32).unwrap();
    /// // Then log a snapshot.
    /// logger.log(
    ///     &population,
    ///     &|a: &Agent<G>| [a.fitness().unwrap_or(0.0), a.genome().genes().count() as f32],
    ///     ["fitness", "gene_count"],
    /// );
    /// assert_eq!(logger.iter().count(), 1);
    /// ```
    pub fn log<C, H, ASE, const N: usize>(
        &mut self,
        population: &Population<C, H, G>,
        agent_stat_extractor: &ASE,
        stat_names: [&str; N],
    ) where
        G: Genome<InnovationHistory = H, Config = C>,
        ASE: Fn(&Agent<G>) -> [f32; N],
    {
        let stats: Vec<[f32; N]> = population
            .last_generation()
            .map(agent_stat_extractor)
            .collect();
        let agent_stats = stat_names
            .iter()
            .copied()
            .map(String::from)
            .zip(unzip_n_vecs(stats.into_iter()))
            .map(|(name, data)| (name, Stats::from(data.into_iter())))
            .collect();
        let generation_sample = match self.reporting_level {
            ReportingLevel::AllGenomes => GenerationMemberRecord::Species(
                population
                    .species()
                    .map(|s| {
                        (
                            s.id(),
                            s.agents().map(|a| a.genome().clone()).collect(),
                            s.time_stagnated(),
                        )
                    })
                    .collect(),
            ),
            ReportingLevel::SpeciesChampions => GenerationMemberRecord::SpeciesChampions(
                population
                    .species()
                    .map(|s| (s.id(), s.champion().genome().clone(), s.time_stagnated()))
                    .collect(),
            ),
            ReportingLevel::PopulationChampion => match population.champion() {
                Some(champion) => {
                    GenerationMemberRecord::PopulationChampion(champion.genome().clone())
                }
                None => GenerationMemberRecord::None,
            },
            ReportingLevel::NoGenomes => GenerationMemberRecord::None,
        };
        self.logs.push(Log {
            generation_number: population.generation(),
            generation_sample,
            species_count: population.species().count(),
            champion_fitness: population.champion().and_then(Agent::fitness),
            agent_stats,
        });
    }

    /// Iterate over all logged snapshots.
    ///
    /// # Examples
    /// ```
    /// # use topoevo_nn::genomics::LayeredGenome as G;
    /// use topoevo::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::AllGenomes);
    /// // Log some stuff... then
    /// for log in logger.iter() {
    ///     println!("{}", log);
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }
}

fn unzip_n_vecs<T: Clone, const N: usize>(iter: impl Iterator<Item = [T; N]>) -> Vec<Vec<T>> {
    let mut vecs = vec![Vec::default(); N];
    for items in iter {
        for (vec, item) in vecs.iter_mut().zip(items) {
            vec.push(item);
        }
    }
    vecs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populations::PopulationConfig;
    use crate::testing::{MutationCounter, Point, PointConfig};
    use std::num::NonZeroUsize;

    fn evolved_population() -> Population<PointConfig, MutationCounter, Point> {
        let mut population = Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(6).unwrap(),
                seed: Some(3),
                ..PopulationConfig::default()
            },
            PointConfig { drift: 0.5 },
        );
        population.evaluate_fitness(|g: &Point| g.0 + 1.0).unwrap();
        population
    }

    #[test]
    fn stats_of_even_length() {
        let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.maximum, 4.0);
        assert_eq!(stats.minimum, 1.0);
    }

    #[test]
    fn stats_of_nothing() {
        let stats = Stats::from(std::iter::empty());
        assert_eq!(
            stats,
            Stats {
                maximum: 0.0,
                minimum: 0.0,
                mean: 0.0,
                median: 0.0,
            }
        );
    }

    #[test]
    fn unzip_columns() {
        let columns = unzip_n_vecs(vec![[1, 2], [3, 4], [5, 6]].into_iter());
        assert_eq!(columns, vec![vec![1, 3, 5], vec![2, 4, 6]]);
    }

    #[test]
    fn log_reads_finished_generation() {
        let population = evolved_population();
        let mut logger = EvolutionLogger::new(ReportingLevel::SpeciesChampions);
        logger.log(
            &population,
            &|a: &Agent<Point>| [a.fitness().unwrap_or(0.0)],
            ["fitness"],
        );

        let log = logger.iter().next().unwrap();
        assert_eq!(log.generation_number, 1);
        assert_eq!(log.species_count, population.species().count());
        assert_eq!(log.agent_stats[0].0, "fitness");
        assert!(log.agent_stats[0].1.minimum >= 1.0);
        assert_eq!(log.champion_fitness, Some(log.agent_stats[0].1.maximum));
        match &log.generation_sample {
            GenerationMemberRecord::SpeciesChampions(champions) => {
                assert_eq!(champions.len(), log.species_count)
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn reporting_levels() {
        let population = evolved_population();
        let sample = |level| {
            let mut logger = EvolutionLogger::new(level);
            logger.log(&population, &|_: &Agent<Point>| [], []);
            let sample = logger.iter().next().unwrap().generation_sample.clone();
            sample
        };

        assert!(matches!(
            sample(ReportingLevel::AllGenomes),
            GenerationMemberRecord::Species(_)
        ));
        assert!(matches!(
            sample(ReportingLevel::PopulationChampion),
            GenerationMemberRecord::PopulationChampion(_)
        ));
        assert!(matches!(
            sample(ReportingLevel::NoGenomes),
            GenerationMemberRecord::None
        ));
    }

    #[test]
    fn display_lists_stats() {
        let population = evolved_population();
        let mut logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
        logger.log(&population, &|a: &Agent<Point>| [a.genome().0], ["position"]);

        let text = logger.iter().next().unwrap().to_string();
        assert!(text.starts_with("Log {\n\tgeneration_number: 1\n"));
        assert!(text.contains("\tposition: Stats {"));
        assert!(text.ends_with('}'));
    }
}
