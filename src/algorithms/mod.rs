pub mod a_star;
pub mod breadth_first;
pub mod common;
pub mod depth_first;
pub mod dijkstra;

use a_star::AStar;
use breadth_first::BreadthFirst;
use common::PathfindingAlgorithm;
use depth_first::DepthFirst;
use dijkstra::Dijkstra;

/// Names accepted by [`by_name`].
pub const ALGORITHM_NAMES: [&str; 4] = ["dijkstra", "astar", "breadth-first", "depth-first"];

/// Builds the algorithm registered under `name`.
///
/// `iteration_cap` only applies to Dijkstra's algorithm.
pub fn by_name(name: &str, iteration_cap: usize) -> Option<Box<dyn PathfindingAlgorithm>> {
    let algorithm: Box<dyn PathfindingAlgorithm> = match name {
        "dijkstra" => Box::new(Dijkstra::with_iteration_cap(iteration_cap)),
        "astar" | "a_star" => Box::new(AStar::new()),
        "breadth-first" => Box::new(BreadthFirst),
        "depth-first" => Box::new(DepthFirst),
        _ => return None,
    };
    Some(algorithm)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in ALGORITHM_NAMES {
            let algorithm = by_name(name, 10).unwrap();
            assert_eq!(algorithm.name(), name);
        }
        assert!(by_name("bogo", 10).is_none());
    }
}
