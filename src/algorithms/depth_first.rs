use crate::algorithms::common::{
    endpoints, neighbors, path_cost, reconstruct, PathfindingAlgorithm, Search,
};
use crate::animation::AnimationPlan;
use crate::grid::{Board, Cell};

/// Depth-first search, expanding neighbours top, right, bottom, left.
/// The path it finds is rarely the shortest.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirst;

impl PathfindingAlgorithm for DepthFirst {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn find_path(&mut self, board: &dyn Board) -> Option<Search> {
        log::info!("Running depth-first search");
        let (start, target) = endpoints(board)?;

        let cells = board.cell_count();
        let mut plan = AnimationPlan::new();
        let mut visited = vec![false; cells];
        let mut prev = vec![None; cells];
        let mut stack = vec![start.index()];

        let mut cost = None;
        while let Some(current) = stack.pop() {
            if visited[current] {
                continue;
            }
            visited[current] = true;
            plan.push_visit_step(current);

            if current == target.index() {
                log::debug!("Target found");
                if reconstruct(&mut plan, &prev, start.index(), current) {
                    cost = Some(path_cost(board, plan.path_order()));
                }
                break;
            }

            let Some(cell) = board.node_by_index(current) else {
                continue;
            };
            // pushed in reverse so the top neighbour is expanded first
            let next: Vec<&Cell> = neighbors(board, cell).collect();
            for neighbor in next.into_iter().rev() {
                if !visited[neighbor.index()] {
                    prev[neighbor.index()] = Some(current);
                    stack.push(neighbor.index());
                }
            }
        }

        log::info!("Finished depth-first search");
        Some(Search { plan, cost })
    }
}
