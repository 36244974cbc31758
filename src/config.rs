use crate::algorithms::dijkstra::DEFAULT_ITERATION_CAP;
use crate::animation::PlaybackTiming;
use crate::grid::Position;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 25)]
    pub rows: usize,

    #[arg(long, default_value_t = 75)]
    pub cols: usize,

    /// dijkstra, astar, breadth-first, depth-first, or all
    #[arg(long, default_value = "dijkstra")]
    pub algorithm: String,

    #[arg(long, default_value_t = 300)]
    pub num_walls: usize,

    #[arg(long, default_value_t = 100)]
    pub num_weights: usize,

    /// Seed for wall and terrain placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Target cell as ROW,COL
    #[arg(long, value_parser = parse_position)]
    pub target: Option<Position>,

    #[arg(long, default_value_t = 10)]
    pub visit_delay_ms: u64,

    #[arg(long, default_value_t = 50)]
    pub path_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_ITERATION_CAP)]
    pub iteration_cap: usize,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn timing(&self) -> PlaybackTiming {
        if self.no_visualization {
            return PlaybackTiming::instant();
        }
        PlaybackTiming {
            visit: Duration::from_millis(self.visit_delay_ms),
            path: Duration::from_millis(self.path_delay_ms),
        }
    }

    /// Whether Dijkstra's iteration cap could end a run before every cell of
    /// the board has been explored.
    pub fn cap_may_truncate(&self) -> bool {
        let explorable = self.iteration_cap.saturating_add(1);
        self.uses_dijkstra() && self.rows.saturating_mul(self.cols) > explorable
    }

    fn uses_dijkstra(&self) -> bool {
        matches!(self.algorithm.as_str(), "dijkstra" | "all")
    }
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {:?}", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid coordinate {:?}: {}", part, err))
    };
    Ok(Position::new(parse(row)?, parse(col)?))
}
