use crate::algorithms::common::{neighbors, PathfindingAlgorithm};
use crate::algorithms::{by_name, ALGORITHM_NAMES};
use crate::animation::{AnimationPlan, Tick};
use crate::config::Config;
use crate::grid::{Cost, Grid, GridError, Position};
use crate::statistics::RunReport;
use pathfinding::prelude::dijkstra;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("unknown algorithm {0:?}, expected one of {names} or \"all\"", names = ALGORITHM_NAMES.join(", "))]
    UnknownAlgorithm(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A grid plus the configuration used to search and animate it.
pub struct Simulation {
    grid: Grid,
    config: Config,
}

impl Simulation {
    /// Builds the grid described by `config`, scattering walls and heavy
    /// terrain. The same seed always yields the same grid.
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        if config.cap_may_truncate() {
            log::warn!(
                "{}x{} board has more cells than Dijkstra's iteration cap of {}, runs may stop early",
                config.rows,
                config.cols,
                config.iteration_cap
            );
        }
        let (default_start, default_target) = Grid::default_endpoints(config.rows, config.cols);
        let mut grid = Grid::with_endpoints(
            config.rows,
            config.cols,
            config.start.unwrap_or(default_start),
            config.target.unwrap_or(default_target),
        )?;

        let mut rng = if let Some(seed) = config.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        let (walls, weights) = grid.scatter(&mut rng, config.num_walls, config.num_weights);
        log::info!("placed {} walls and {} heavy squares", walls, weights);

        Ok(Self::from_grid(config, grid))
    }

    pub fn from_grid(config: Config, grid: Grid) -> Self {
        Simulation { grid, config }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Runs the configured algorithm and plays back its animation.
    pub fn run(&mut self) -> Result<RunReport, SimulationError> {
        let mut algorithm = by_name(&self.config.algorithm, self.config.iteration_cap)
            .ok_or_else(|| SimulationError::UnknownAlgorithm(self.config.algorithm.clone()))?;
        Ok(self.run_algorithm(algorithm.as_mut()))
    }

    pub fn run_algorithm(&mut self, algorithm: &mut dyn PathfindingAlgorithm) -> RunReport {
        self.grid.clear_states();

        let started = Instant::now();
        let search = algorithm.find_path(&self.grid);
        let search_time = started.elapsed();

        let Some(mut search) = search else {
            return RunReport::skipped(algorithm.name());
        };
        let report = RunReport::new(
            algorithm.name(),
            &search,
            reference_cost(&self.grid),
            search_time,
        );
        self.animate(algorithm.name(), &mut search.plan);
        report
    }

    /// Run every algorithm on the same grid and collect their reports
    pub fn run_all_algorithms(config: Config) -> Result<Vec<RunReport>, SimulationError> {
        let mut config = config;
        config.no_visualization = true;
        let simulation = Simulation::new(config.clone())?;

        println!("Running comparison of {} algorithms...", ALGORITHM_NAMES.len());
        if let Some(seed) = config.seed {
            println!("Environment seed: {} (for reproducibility)", seed);
        }
        println!(
            "Grid {}x{}, Start: {:?}, Target: {:?}",
            config.rows,
            config.cols,
            simulation.grid.start_position(),
            simulation.grid.target_position()
        );
        println!();

        let mut results = Vec::new();
        for (i, name) in ALGORITHM_NAMES.iter().enumerate() {
            println!("Running algorithm {} of {}: {}", i + 1, ALGORITHM_NAMES.len(), name);
            let mut algorithm = by_name(name, config.iteration_cap)
                .ok_or_else(|| SimulationError::UnknownAlgorithm(name.to_string()))?;
            let mut run = Simulation::from_grid(config.clone(), simulation.grid.clone());
            let report = run.run_algorithm(algorithm.as_mut());
            println!(
                "Completed: {} - Found: {}, Explored: {}",
                report.algorithm, report.found, report.explored
            );
            results.push(report);
        }
        Ok(results)
    }

    pub fn print_comparison_results(results: &[RunReport]) {
        println!("\n=== ALGORITHM COMPARISON ===");
        for report in results {
            println!("{}", report);
        }

        let successful: Vec<&RunReport> = results.iter().filter(|r| r.found).collect();
        if successful.is_empty() {
            println!("No algorithm reached the target.");
            return;
        }

        if let Some(best) = successful.iter().min_by_key(|r| r.explored) {
            println!("Fewest squares explored: {} ({})", best.algorithm, best.explored);
        }
        if let Some(best) = successful.iter().min_by_key(|r| r.path_cost) {
            println!(
                "Cheapest path: {} (cost {})",
                best.algorithm,
                best.path_cost.unwrap_or_default()
            );
        }
        if let Some(best) = successful.iter().min_by_key(|r| r.search_time) {
            println!("Fastest search: {} ({:.2?})", best.algorithm, best.search_time);
        }
    }

    fn animate(&mut self, algorithm: &str, plan: &mut AnimationPlan) {
        plan.set_timing(self.config.timing());
        let visualize = !self.config.no_visualization;
        let total = plan.visit_steps();
        let mut explored = 0;

        plan.play(&mut self.grid, |grid, tick| {
            if let Tick::Visited(_) = tick {
                explored += 1;
            }
            if visualize {
                clear_screen();
                println!("=== PATHFINDING VISUALIZER ===");
                println!(
                    "Algorithm: {} | Squares Explored: {}/{}",
                    algorithm, explored, total
                );
                grid.print_grid();
            }
            ControlFlow::Continue(())
        });

        if !visualize && !self.config.quiet {
            self.grid.print_grid();
        }
    }
}

/// Cost of the cheapest start→target route, computed independently with
/// the `pathfinding` crate.
pub fn reference_cost(grid: &Grid) -> Option<Cost> {
    let target = grid.target_position();
    dijkstra(
        &grid.start_position(),
        |pos: &Position| {
            grid.cell(*pos)
                .into_iter()
                .flat_map(|cell| neighbors(grid, cell))
                .map(|next| (next.position(), next.weight()))
                .collect::<Vec<_>>()
        },
        |pos| *pos == target,
    )
    .map(|(_, cost)| cost)
}

/// Pause before the first frame so the header can be read. Comparison
/// runs never animate, so they start straight away.
pub fn startup_pause(config: &Config) -> Option<Duration> {
    if config.no_visualization || config.algorithm == "all" {
        return None;
    }
    Some(Duration::from_millis(1000))
}

pub fn startup_delay(config: &Config) {
    if let Some(pause) = startup_pause(config) {
        thread::sleep(pause);
    }
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Board, CellState};
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["grid_pathviz", "--no-visualization", "--quiet"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn same_seed_builds_the_same_grid() {
        let args = ["--rows", "12", "--cols", "20", "--seed", "9", "--num-walls", "40"];
        let a = Simulation::new(config(&args)).unwrap();
        let b = Simulation::new(config(&args)).unwrap();
        assert_eq!(a.grid().to_string(), b.grid().to_string());
    }

    #[test]
    fn explicit_endpoints_are_used() {
        let sim = Simulation::new(config(&[
            "--rows", "5", "--cols", "5", "--start", "4,4", "--target", "0,0", "--num-walls", "0",
        ]))
        .unwrap();
        assert_eq!(sim.grid().start_position(), Position::new(4, 4));
        assert_eq!(sim.grid().target_position(), Position::new(0, 0));
    }

    #[test]
    fn unknown_algorithm_is_an_error() {
        let mut sim = Simulation::new(config(&["--algorithm", "bogo", "--rows", "4", "--cols", "4"])).unwrap();
        assert!(matches!(sim.run(), Err(SimulationError::UnknownAlgorithm(name)) if name == "bogo"));
    }

    #[test]
    fn unknown_algorithm_message_lists_the_choices() {
        let message = SimulationError::UnknownAlgorithm("bogo".into()).to_string();
        assert!(message.contains("\"bogo\""));
        for name in ALGORITHM_NAMES {
            assert!(message.contains(name), "{message}");
        }
        assert!(message.ends_with("or \"all\""));
    }

    #[test]
    fn grid_errors_convert_into_simulation_errors() {
        let err = Simulation::new(config(&["--rows", "1", "--cols", "1"])).err().unwrap();
        assert!(matches!(err, SimulationError::Grid(GridError::TooSmall { rows: 1, cols: 1 })));
    }

    #[test]
    fn comparison_and_fast_mode_skip_the_startup_pause() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["grid_pathviz"];
            argv.extend_from_slice(args);
            Config::parse_from(argv)
        };
        assert_eq!(startup_pause(&parse(&[])), Some(Duration::from_millis(1000)));
        assert_eq!(startup_pause(&parse(&["--algorithm", "all"])), None);
        assert_eq!(startup_pause(&parse(&["--no-visualization"])), None);
    }

    #[test]
    fn run_plays_the_plan_onto_the_grid() {
        let grid = Grid::from_layout("S..\n.#.\n..T").unwrap();
        let mut sim = Simulation::from_grid(config(&["--algorithm", "astar"]), grid);
        let report = sim.run().unwrap();
        assert!(report.found);
        assert_eq!(report.path_cost, Some(4));
        assert_eq!(report.reference_cost, Some(4));
        assert_eq!(report.path_length, 5);
        let on_path = sim
            .grid()
            .cells()
            .iter()
            .filter(|cell| cell.state() == CellState::Path)
            .count();
        assert_eq!(on_path, 5);
    }

    #[test]
    fn reference_cost_matches_hand_count() {
        let grid = Grid::from_layout("S~T\n...").unwrap();
        assert_eq!(reference_cost(&grid), Some(4));
        let blocked = Grid::from_layout("S#T").unwrap();
        assert_eq!(reference_cost(&blocked), None);
        assert_eq!(blocked.cell_count(), 3);
    }

    #[test]
    fn comparison_covers_every_algorithm() {
        let results = Simulation::run_all_algorithms(config(&[
            "--rows", "10", "--cols", "10", "--seed", "3", "--num-walls", "10", "--num-weights", "10",
        ]))
        .unwrap();
        let names: Vec<_> = results.iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(names, ALGORITHM_NAMES);
    }
}
