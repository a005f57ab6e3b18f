use clap::Parser;
use forest_fire_core::{ForestFireSimulation, SimulationConfig};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Forest fire automaton demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Probabilistic forest fire spread on a grid", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = 40)]
    width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = 20)]
    height: usize,

    /// Chance that one burning cell ignites one neighbouring tree per step (0-1)
    #[arg(short, long, default_value_t = 0.55)]
    probability: f64,

    /// RNG seed (omit for a random run)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Initial fire as ROW,COL (repeatable; defaults to the grid centre)
    #[arg(short, long = "ignite", value_parser = parse_coord)]
    ignite: Vec<(usize, usize)>,

    /// Stop after this many steps even if the fire is still burning
    #[arg(short, long, default_value_t = 1000)]
    max_steps: usize,

    /// JSON simulation config; replaces the grid, probability, ignition and seed flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the final summary
    #[arg(short, long)]
    quiet: bool,
}

fn parse_coord(text: &str) -> Result<(usize, usize), String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{text}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok((row, col))
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&text)?;
        info!("Loaded config from {}", path.display());
        return Ok(config);
    }

    let mut config = SimulationConfig::new(args.width, args.height, args.probability);
    config.seed = args.seed;
    config.initial_fire.clone_from(&args.ignite);
    if config.initial_fire.is_empty() {
        let center = config.center();
        config.initial_fire.push((center.row, center.col));
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut sim = ForestFireSimulation::from_config(&config)?;

    println!("=== Forest Fire Demo ===\n");
    println!(
        "Grid: {}x{}, p = {}, ignitions: {}, seed: {}",
        sim.width(),
        sim.height(),
        sim.propagation_probability(),
        config.initial_fire.len(),
        config
            .seed
            .map_or_else(|| "random".to_string(), |seed| format!("{seed}"))
    );

    if !args.quiet {
        println!("\nGeneration 0");
        print!("{}", sim.grid());
    }

    while sim.has_fire() && (sim.generation() as usize) < args.max_steps {
        sim.simulate_step();

        if !args.quiet {
            let stats = sim.stats();
            println!(
                "\nGeneration {} | trees {} | burning {} | ash {}",
                stats.generation, stats.trees, stats.burning, stats.ash
            );
            print!("{}", sim.grid());
        }
    }

    let stats = sim.stats();
    println!("\n=== Summary ===");
    println!("Generations:  {}", stats.generation);
    println!("Trees left:   {}", stats.trees);
    println!("Still burning: {}", stats.burning);
    println!("Ash:          {}", stats.ash);
    println!("Burned:       {:.1}%", stats.burned_fraction() * 100.0);

    if sim.has_fire() {
        println!("Stopped at the {}-step limit with fire still burning", args.max_steps);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,7"), Ok((3, 7)));
        assert_eq!(parse_coord(" 0 , 12 "), Ok((0, 12)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a,1").is_err());
        assert!(parse_coord("1,-2").is_err());
    }

    #[test]
    fn test_default_ignition_is_center() {
        let args = Args::parse_from(["forest-fire-demo", "-W", "10", "-H", "6"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.initial_fire, vec![(3, 5)]);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_explicit_ignitions_and_seed() {
        let args = Args::parse_from([
            "forest-fire-demo",
            "--ignite",
            "0,0",
            "--ignite",
            "2,3",
            "--seed",
            "9",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.initial_fire, vec![(0, 0), (2, 3)]);
        assert_eq!(config.seed, Some(9));
    }
}
