use crate::algorithms::common::{endpoints, neighbors, reconstruct, PathfindingAlgorithm, Search};
use crate::animation::AnimationPlan;
use crate::grid::{Board, UNREACHABLE};
use rustc_hash::FxHashSet;

/// Iteration count past which a run is abandoned. A run may extract one
/// cell more than the cap.
pub const DEFAULT_ITERATION_CAP: usize = 5000;

/// Dijkstra's algorithm over a flat candidate set.
///
/// Every extraction scans all remaining candidates for the smallest known
/// distance, so a run is `O(n²)` in the number of cells. Ties go to the
/// lowest linear index, which keeps the visit order row-major among equals.
#[derive(Debug, Clone, Copy)]
pub struct Dijkstra {
    iteration_cap: usize,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::with_iteration_cap(DEFAULT_ITERATION_CAP)
    }

    pub fn with_iteration_cap(iteration_cap: usize) -> Self {
        Dijkstra { iteration_cap }
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl PathfindingAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn find_path(&mut self, board: &dyn Board) -> Option<Search> {
        log::info!("Running Dijkstra's");
        let (start, target) = endpoints(board)?;

        let cells = board.cell_count();
        let mut plan = AnimationPlan::new();
        let mut candidates: FxHashSet<usize> = (0..cells)
            .filter(|&index| board.node_by_index(index).is_some_and(|cell| !cell.is_wall()))
            .collect();
        let mut dist = vec![UNREACHABLE; cells];
        let mut prev = vec![None; cells];
        dist[start.index()] = 0;

        let mut cost = None;
        let mut iterations = 0;
        while !candidates.is_empty() {
            if iterations > self.iteration_cap {
                log::warn!(
                    "Dijkstra's gave up after {} iterations with {} candidates left",
                    iterations,
                    candidates.len()
                );
                break;
            }

            let Some(u) = candidates.iter().copied().min_by_key(|&index| (dist[index], index)) else {
                break;
            };
            if dist[u] == UNREACHABLE {
                log::debug!("{} cells are unreachable from the start", candidates.len());
                break;
            }
            candidates.remove(&u);
            plan.push_visit_step(u);

            if u == target.index() {
                log::debug!("Target found");
                if reconstruct(&mut plan, &prev, start.index(), u) {
                    cost = Some(dist[u]);
                }
                break;
            }

            let Some(cell) = board.node_by_index(u) else {
                continue;
            };
            for v in neighbors(board, cell) {
                let alt = dist[u].saturating_add(v.weight());
                if alt < dist[v.index()] {
                    dist[v.index()] = alt;
                    prev[v.index()] = Some(u);
                }
            }

            iterations += 1;
        }

        log::info!("Finished Dijkstra's");
        Some(Search { plan, cost })
    }
}
