use crate::algorithms::common::{endpoints, neighbors, reconstruct, PathfindingAlgorithm, Search};
use crate::animation::AnimationPlan;
use crate::grid::{Board, Cell, Cost, UNREACHABLE};
use crate::heap::{HeapError, PriorityHeap};

/// A* search keyed on `f = g + h` with the Manhattan distance to the target
/// as `h`.
///
/// The heuristic never overestimates on a 4-connected grid whose cheapest
/// step costs 1, so the first time the target leaves the heap its cost is
/// optimal. Equal `f` values are ordered by `h`, favouring cells closer to
/// the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }

    fn search(
        board: &dyn Board,
        start: &Cell,
        target: &Cell,
        plan: &mut AnimationPlan,
    ) -> Result<Option<Cost>, HeapError> {
        let goal = target.position();
        let h = |cell: &Cell| cell.position().manhattan(&goal);

        let cells = board.cell_count();
        let mut open = PriorityHeap::with_capacity(cells);
        let mut g = vec![UNREACHABLE; cells];
        let mut prev = vec![None; cells];

        g[start.index()] = 0;
        open.push(start.index(), h(start), h(start))?;

        while let Some((current, _)) = open.pop() {
            plan.push_visit_step(current);

            if current == target.index() {
                log::debug!("Target found");
                let found = reconstruct(plan, &prev, start.index(), current);
                return Ok(found.then_some(g[current]));
            }

            let Some(cell) = board.node_by_index(current) else {
                continue;
            };
            for next in neighbors(board, cell) {
                let n = next.index();
                let tentative = g[current].saturating_add(next.weight());
                if tentative >= g[n] {
                    continue;
                }
                prev[n] = Some(current);
                g[n] = tentative;
                let heuristic = h(next);
                let f = tentative.saturating_add(heuristic);
                if open.contains(n) {
                    open.set_priority(n, f)?;
                    open.set_secondary_priority(n, heuristic)?;
                } else {
                    open.push(n, f, heuristic)?;
                }
            }
        }
        Ok(None)
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn find_path(&mut self, board: &dyn Board) -> Option<Search> {
        log::info!("Running A*");
        let (start, target) = endpoints(board)?;

        let mut plan = AnimationPlan::new();
        let cost = match Self::search(board, start, target, &mut plan) {
            Ok(cost) => cost,
            Err(err) => {
                log::error!("A* aborted: {}", err);
                None
            }
        };

        log::info!("Finished A*");
        Some(Search { plan, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{layout, positions, NoTarget};
    use crate::grid::Position;

    #[test]
    fn two_cell_board() {
        let grid = layout("ST");
        let search = AStar.find_path(&grid).unwrap();
        assert!(search.found());
        assert_eq!(search.plan.visit_order().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(search.plan.path_order().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn open_three_by_three() {
        let grid = layout(
            "S..
             ...
             ..T",
        );
        let search = AStar.find_path(&grid).unwrap();
        assert_eq!(search.cost, Some(4));
        assert_eq!(search.plan.path_steps(), 5);
        assert!(search.explored() <= 9);
    }

    #[test]
    fn straight_corridor_visits_only_the_corridor() {
        let grid = layout(
            "S...T
             .....
             .....",
        );
        let search = AStar.find_path(&grid).unwrap();
        assert_eq!(search.cost, Some(4));
        assert_eq!(search.explored(), 5);
    }

    #[test]
    fn enclosed_target_is_unreachable() {
        let grid = layout(
            "S....
             ..#..
             .#T#.
             ..#..",
        );
        let search = AStar.find_path(&grid).unwrap();
        assert!(!search.found());
        assert_eq!(search.cost, None);
        assert_eq!(search.explored(), 15);
    }

    #[test]
    fn heavy_cell_is_avoided() {
        let grid = layout(
            "S~T
             ...",
        );
        let search = AStar.find_path(&grid).unwrap();
        assert_eq!(search.cost, Some(4));
        assert!(!positions(&grid, search.plan.path_order()).contains(&Position::new(0, 1)));
    }

    #[test]
    fn heavy_cell_is_taken_when_cheaper() {
        let grid = layout(
            "S~T
             .#.
             .#.
             ...",
        );
        let search = AStar.find_path(&grid).unwrap();
        assert_eq!(search.cost, Some(6));
        assert_eq!(search.plan.path_steps(), 3);
    }

    #[test]
    fn missing_target_produces_no_plan() {
        let grid = layout("S.T");
        assert!(AStar.find_path(&NoTarget(grid)).is_none());
    }
}
