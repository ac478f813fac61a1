use topoevo::{Harness, Mode, Population, PopulationConfig, PopulationError};
use topoevo_nn::genomics::{GeneticConfig, InputSizeError, LayeredGenome};

use std::collections::HashMap;
use std::num::NonZeroUsize;

type NeuralPopulation = Population<GeneticConfig, topoevo_nn::genomics::History, LayeredGenome>;

fn xor_population(size: usize, seed: u64) -> NeuralPopulation {
    Population::new(
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            seed: Some(seed),
            ..PopulationConfig::default()
        },
        GeneticConfig {
            input_count: NonZeroUsize::new(2).unwrap(),
            output_count: NonZeroUsize::new(1).unwrap(),
            ..GeneticConfig::default()
        },
    )
}

fn xor_fitness(genome: &LayeredGenome, _: &()) -> Result<f32, InputSizeError> {
    let mut genome = genome.clone();
    let mut error = 0.0;
    for (input, expected) in [([0.0, 0.0], 0.0), ([0.0, 1.0], 1.0), ([1.0, 0.0], 1.0), ([1.0, 1.0], 0.0)] {
        error += (genome.evaluate(&input)?[0] - expected).abs();
    }
    Ok((4.0 - error).powi(2))
}

fn is_layered(genome: &LayeredGenome) -> bool {
    let layers: HashMap<_, _> = genome.nodes().map(|n| (n.id(), n.layer())).collect();
    genome
        .genes()
        .all(|g| layers[&g.input()] < layers[&g.output()])
}

#[test]
fn initial_genomes_share_innovations() {
    let population = xor_population(50, 1);
    assert!(population.agents().all(|a| a.genome().genes().count() >= 1));

    // Single-gene genomes all grew their gene from an empty signature.
    let mut seen = HashMap::new();
    for genome in population.agents().map(|a| a.genome()) {
        if let [gene] = genome.genes().collect::<Vec<_>>()[..] {
            let innovation = *seen.entry(gene.endpoints()).or_insert(gene.innovation());
            assert_eq!(innovation, gene.innovation());
        }
    }
    assert!(!seen.is_empty());
    assert!(population.history().records().count() >= seen.len());
}

#[test]
fn sequential_harness_runs_generations() {
    let mut harness = Harness::new(xor_population(40, 2), Mode::Sequential, xor_fitness);
    let mut best = 0.0;

    while harness.population().generation() < 10 {
        let index = harness.current_index().unwrap();
        assert!(harness.population().agent(index).unwrap().is_alive());
        harness.decide_current(&[1.0, 0.0]).unwrap();
        if harness.kill_current(&()).unwrap() {
            let population = harness.population();
            assert_eq!(population.agents().count(), 40);
            assert_eq!(population.alive_count(), 40);
            assert!(population.species().count() >= 1);

            let champion = population.champion().unwrap().fitness().unwrap();
            assert!(champion >= best);
            best = champion;
        }
    }
    assert!(harness.population().agents().all(|a| is_layered(a.genome())));
}

#[test]
fn batch_decision_reports_input_size() {
    let mut harness = Harness::new(xor_population(5, 3), Mode::Batch, xor_fitness);

    match harness.decide(0, &[1.0, 2.0, 3.0]) {
        Err(PopulationError::Evaluation(source)) => {
            let error = source.downcast_ref::<InputSizeError>().unwrap();
            assert_eq!(
                error,
                &InputSizeError {
                    expected: 2,
                    found: 3
                }
            );
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn seeded_evolution_is_reproducible() {
    let run = || {
        let mut population = xor_population(30, 4);
        for _ in 0..5 {
            for index in 0..30 {
                population.kill(index, &(), xor_fitness).unwrap();
            }
        }
        serde_json::to_string(&population.agents().collect::<Vec<_>>()).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn structure_grows_and_stays_layered() {
    let mut population = xor_population(60, 5);
    let genes_at_start: usize = population.agents().map(|a| a.genome().genes().count()).sum();

    for _ in 0..25 {
        population
            .evaluate_fitness(|g| xor_fitness(g, &()).unwrap_or(0.0))
            .unwrap();
    }

    let genes_now: usize = population.agents().map(|a| a.genome().genes().count()).sum();
    assert!(genes_now > genes_at_start);
    assert!(population.history().next_innovation() > 3);
    assert!(population.agents().all(|a| is_layered(a.genome())));
}
