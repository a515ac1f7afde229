//! Runner evolution CLI - Evolve a glide body from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use runner_evolution::{
    compute::evolution::{JsonGeneStore, Population, Runner},
    compute::{GlideRunner, empty_genome},
    schema::{EvolutionPhase, EvolutionSnapshot, RunConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [max_iterations]", args[0]);
        eprintln!();
        eprintln!("Evolve a glide body towards its target from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json     Path to run configuration file");
        eprintln!("  max_iterations  Population iterations before giving up (default: 1000000)");
        eprintln!();
        eprintln!("Winners' genes are kept next to the config in <config>.genes/.");
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let max_iterations: u64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000_000);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: RunConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    let store_dir = config_path.with_extension("genes");
    let store = JsonGeneStore::open(&store_dir).unwrap_or_else(|e| {
        eprintln!("Error opening gene store {}: {}", store_dir.display(), e);
        std::process::exit(1);
    });

    println!("Runner Evolution");
    println!("================");
    println!("Cycle pattern: {:?}", config.evolution.cycle_pattern);
    println!(
        "Population: {} winners, {} challengers",
        config.evolution.persistent_population, config.evolution.challenger_population
    );
    println!("Muscles: {}", config.glide.muscle_count);
    println!("Target: {:?}", config.glide.target);
    println!("Gene store: {}", store_dir.display());
    println!();

    // Grow the ancestor before it can be copied
    let mut ancestor = GlideRunner::new(config.glide.clone(), empty_genome());
    ancestor.set_autopilot(true);
    while !ancestor.is_ready() {
        ancestor.iterate();
    }

    let population = Population::new(ancestor, store, config.evolution.clone()).unwrap_or_else(|e| {
        eprintln!("Error starting population: {}", e);
        std::process::exit(1);
    });
    let mut population = population.with_snapshot_callback(Box::new(print_snapshot));

    println!("Evolving...");
    let start = Instant::now();
    let mut phase = population.phase();

    for _ in 0..max_iterations {
        let next = population.iterate();
        if next == phase {
            continue;
        }
        phase = next;
        match phase {
            EvolutionPhase::EvolutionDone => break,
            EvolutionPhase::EvolutionHarder => {
                println!("  Every winner reached the target");
                print_report(&population, start);
                let Some(reduced) = population.with_reduced_cycle_pattern() else {
                    println!("Cycle pattern cannot shrink further");
                    return;
                };
                population = reduced;
                phase = population.phase();
                println!();
                println!("Retrying with cycle pattern {:?}", population.cycle_pattern());
            }
            EvolutionPhase::EvolutionAdvance => {
                println!(
                    "  Round {}/{} complete ({} cycles)",
                    population.cycle_pattern_index() + 1,
                    population.cycle_pattern().len(),
                    population.current_max_cycles()
                );
            }
            _ => {}
        }
    }

    print_report(&population, start);
}

fn print_report(population: &Population<GlideRunner, JsonGeneStore>, start: Instant) {
    println!();
    println!("Phase: {}", population.phase());
    println!("Winners:");
    for winner in population.winners() {
        println!(
            "  {:<6} distance={:.2} reached={} genome={}",
            winner.name,
            winner.runner.distance_from_target(),
            winner.runner.reached_target(),
            winner.runner.genome()
        );
    }
    println!("Time: {:.2}s", start.elapsed().as_secs_f32());
}

fn print_snapshot(snapshot: &EvolutionSnapshot) {
    let best = snapshot
        .evolver_snapshots
        .first()
        .map(|e| format!("{} at {:.2}", e.name, e.proximity))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "    round {} cycle {}: {} evolvers, best {}",
        snapshot.cycle_index,
        snapshot.cycle,
        snapshot.evolver_snapshots.len(),
        best
    );
}

fn print_example_config() {
    let config = RunConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
