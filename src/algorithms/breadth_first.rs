use crate::algorithms::common::{
    endpoints, neighbors, path_cost, reconstruct, PathfindingAlgorithm, Search,
};
use crate::animation::AnimationPlan;
use crate::grid::Board;
use std::collections::VecDeque;

/// Unweighted breadth-first search. Finds a path with the fewest steps,
/// ignoring terrain weight.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl PathfindingAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn find_path(&mut self, board: &dyn Board) -> Option<Search> {
        log::info!("Running breadth-first search");
        let (start, target) = endpoints(board)?;

        let cells = board.cell_count();
        let mut plan = AnimationPlan::new();
        let mut discovered = vec![false; cells];
        let mut prev = vec![None; cells];
        let mut frontier = VecDeque::from([start.index()]);
        discovered[start.index()] = true;

        let mut cost = None;
        while let Some(current) = frontier.pop_front() {
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
            for next in neighbors(board, cell) {
                if !discovered[next.index()] {
                    discovered[next.index()] = true;
                    prev[next.index()] = Some(current);
                    frontier.push_back(next.index());
                }
            }
        }

        log::info!("Finished breadth-first search");
        Some(Search { plan, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{layout, NoTarget};

    #[test]
    fn explores_in_rings() {
        let grid = layout(
            "S..
             ...
             ..T",
        );
        let search = BreadthFirst.find_path(&grid).unwrap();
        // start, then right and bottom neighbours, then the next ring
        assert_eq!(
            search.plan.visit_order().take(3).collect::<Vec<_>>(),
            vec![0, 1, 3]
        );
        assert_eq!(search.plan.path_steps(), 5);
        assert_eq!(search.cost, Some(4));
    }

    #[test]
    fn ignores_terrain_weight() {
        let grid = layout(
            "S~T
             ...",
        );
        let search = BreadthFirst.find_path(&grid).unwrap();
        assert_eq!(search.plan.path_order().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(search.cost, Some(6));
    }

    #[test]
    fn walls_block_the_search() {
        let grid = layout("S#T");
        let search = BreadthFirst.find_path(&grid).unwrap();
        assert!(!search.found());
        assert_eq!(search.explored(), 1);
    }

    #[test]
    fn missing_target_produces_no_plan() {
        assert!(BreadthFirst.find_path(&NoTarget(layout("ST"))).is_none());
    }
}
