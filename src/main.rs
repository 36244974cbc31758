use clap::Parser;

use grid_pathviz::config::Config;
use grid_pathviz::simulation::{startup_delay, Simulation};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    println!("Starting pathfinding visualizer...");
    println!("Grid size: {}x{}", config.rows, config.cols);
    println!(
        "Walls: {}, Heavy squares: {}",
        config.num_walls, config.num_weights
    );
    println!("Algorithm: {}", config.algorithm);

    if config.no_visualization {
        println!("Visualization disabled - running in fast mode");
    } else {
        println!(
            "Visualization enabled with {}ms visit / {}ms path delay",
            config.visit_delay_ms, config.path_delay_ms
        );
        println!("Press Ctrl+C to stop the animation");
    }
    println!();

    startup_delay(&config);

    if config.algorithm == "all" {
        let results = Simulation::run_all_algorithms(config)?;
        Simulation::print_comparison_results(&results);
    } else {
        let mut simulation = Simulation::new(config)?;
        let report = simulation.run()?;

        println!("\n=== FINAL RESULTS ===");
        println!("{}", report);
        if !report.found {
            println!("No path exists - try reducing --num-walls or moving the endpoints");
        }
    }
    Ok(())
}
