use crate::animation::AnimationPlan;
use crate::grid::{Board, Cell, Cost};

pub trait PathfindingAlgorithm {
    /// Name used to select the algorithm from the command line.
    fn name(&self) -> &'static str;

    /// Searches `board` from its start to its target.
    ///
    /// Returns `None` without doing any work when the board has no start or
    /// no target. Otherwise the returned [`Search`] owns the animation plan
    /// of the run, whether or not the target was reached.
    fn find_path(&mut self, board: &dyn Board) -> Option<Search>;
}

/// Outcome of one search run.
#[derive(Debug, Clone)]
pub struct Search {
    pub plan: AnimationPlan,
    /// Total weight of the path, when one was found.
    pub cost: Option<Cost>,
}

impl Search {
    pub fn found(&self) -> bool {
        self.plan.path_steps() > 0
    }

    /// Number of cells the search explored.
    pub fn explored(&self) -> usize {
        self.plan.visit_steps()
    }
}

// top, right, bottom, left
const OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub(crate) fn endpoints(board: &dyn Board) -> Option<(&Cell, &Cell)> {
    match (board.start(), board.target()) {
        (Some(start), Some(target)) => Some((start, target)),
        _ => {
            log::debug!("board has no start or target, skipping search");
            None
        }
    }
}

/// In-bounds, non-wall neighbors of `cell` in top/right/bottom/left order.
pub(crate) fn neighbors<'a>(board: &'a dyn Board, cell: &Cell) -> impl Iterator<Item = &'a Cell> {
    let (row, col) = (cell.row() as isize, cell.col() as isize);
    OFFSETS
        .iter()
        .filter_map(move |&(dr, dc)| board.node(row + dr, col + dc))
        .filter(|neighbor| !neighbor.is_wall())
}

/// Walks predecessors back from `target` and queues the path start first.
/// Returns whether a path was queued.
pub(crate) fn reconstruct(
    plan: &mut AnimationPlan,
    prev: &[Option<usize>],
    start: usize,
    target: usize,
) -> bool {
    if prev[target].is_none() && target != start {
        return false;
    }
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(index) = current {
        path.push(index);
        current = prev[index];
    }
    for &index in path.iter().rev() {
        plan.push_path_step(index);
    }
    true
}

/// Sum of the weights entered along `path`; the first cell is free.
pub fn path_cost(board: &dyn Board, path: impl IntoIterator<Item = usize>) -> Cost {
    path.into_iter()
        .skip(1)
        .filter_map(|index| board.node_by_index(index))
        .map(Cell::weight)
        .sum()
}
