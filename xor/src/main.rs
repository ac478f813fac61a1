use topoevo::logging::{EvolutionLogger, ReportingLevel};
use topoevo::{Agent, Harness, Mode, Population, PopulationConfig};
use topoevo_nn::genomics::{GeneticConfig, InputSizeError, LayeredGenome};

use std::error::Error;
use std::num::NonZeroUsize;

const ERROR_MARGIN: f32 = 0.3;
const MAX_GENERATIONS: usize = 300;
const PERFECT_FITNESS: f32 = 16.0;

const CASES: [([f32; 2], f32); 4] = [
    ([0.0, 0.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([1.0, 1.0], 0.0),
];

/// Scores how closely a genome computes XOR of
/// its two inputs. Answers within the error margin
/// count as exact.
fn evaluate_xor(genome: &LayeredGenome, _: &()) -> Result<f32, InputSizeError> {
    let mut genome = genome.clone();
    let mut error = 0.0;
    for (input, expected) in CASES.iter() {
        let miss = (genome.evaluate(input)?[0] - expected).abs();
        if miss >= ERROR_MARGIN {
            error += miss;
        }
    }
    Ok((4.0 - error).powi(2))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let genetic_config = GeneticConfig {
        input_count: NonZeroUsize::new(2).unwrap(),
        output_count: NonZeroUsize::new(1).unwrap(),
        ..GeneticConfig::default()
    };
    let population_config = PopulationConfig {
        size: NonZeroUsize::new(150).unwrap(),
        distance_threshold: 3.0,
        ..PopulationConfig::default()
    };

    let population = Population::new(population_config, genetic_config);
    let mut harness = Harness::<_, _, LayeredGenome, _>::new(population, Mode::Sequential, evaluate_xor);
    let mut logger = EvolutionLogger::new(ReportingLevel::PopulationChampion);

    while harness.population().generation() < MAX_GENERATIONS {
        if !harness.kill_current(&())? {
            continue;
        }
        let population = harness.population();
        logger.log(
            population,
            &|a: &Agent<LayeredGenome>| {
                [
                    a.fitness().unwrap_or(0.0),
                    a.genome().genes().count() as f32,
                    a.genome().layer_count() as f32,
                ]
            },
            ["fitness", "gene_count", "layer_count"],
        );
        let solved = population
            .champion()
            .and_then(|c| c.fitness())
            .map_or(false, |f| (f - PERFECT_FITNESS).abs() < f32::EPSILON);
        if solved {
            log::info!("XOR solved in generation {}", population.generation());
            break;
        }
    }

    if let Some(log) = logger.iter().last() {
        println!("{}", log);
    }
    match harness.population().champion() {
        Some(champion) => {
            println!("Champion after {} generations:", harness.population().generation());
            println!("{}", champion.genome());
            println!("{}", serde_json::to_string(champion.genome())?);
        }
        None => println!("No generation completed"),
    }
    Ok(())
}
