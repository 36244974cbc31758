use crate::algorithms::common::Search;
use crate::grid::Cost;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub algorithm: String,
    pub found: bool,
    pub explored: usize,
    pub path_length: usize,
    pub path_cost: Option<Cost>,
    pub reference_cost: Option<Cost>,
    pub search_time: Duration,
}

impl RunReport {
    pub fn new(algorithm: &str, search: &Search, reference_cost: Option<Cost>, search_time: Duration) -> Self {
        RunReport {
            algorithm: algorithm.to_string(),
            found: search.found(),
            explored: search.explored(),
            path_length: search.plan.path_steps(),
            path_cost: search.cost,
            reference_cost,
            search_time,
        }
    }

    /// Report for a run that never started because an endpoint was missing.
    pub fn skipped(algorithm: &str) -> Self {
        RunReport {
            algorithm: algorithm.to_string(),
            found: false,
            explored: 0,
            path_length: 0,
            path_cost: None,
            reference_cost: None,
            search_time: Duration::ZERO,
        }
    }

    /// Extra cost over the cheapest possible path, if both are known.
    pub fn excess_cost(&self) -> Option<Cost> {
        Some(self.path_cost?.saturating_sub(self.reference_cost?))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Squares Explored: {}", self.explored)?;
        if !self.found {
            writeln!(f, "Path: none")?;
        } else {
            writeln!(f, "Path Length: {} squares", self.path_length)?;
            if let Some(cost) = self.path_cost {
                writeln!(f, "Path Cost: {}", cost)?;
            }
        }
        match self.reference_cost {
            Some(cost) => writeln!(f, "Optimal Cost: {}", cost)?,
            None => writeln!(f, "Optimal Cost: unreachable")?,
        }
        writeln!(f, "Search Time: {:.2?}", self.search_time)?;

        if let Some(excess) = self.excess_cost().filter(|&excess| excess > 0) {
            writeln!(f, "Note: path costs {} more than the optimal route", excess)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPlan;

    fn search(visits: usize, path: &[usize], cost: Option<Cost>) -> Search {
        let mut plan = AnimationPlan::new();
        (0..visits).for_each(|i| plan.push_visit_step(i));
        path.iter().for_each(|&i| plan.push_path_step(i));
        Search { plan, cost }
    }

    #[test]
    fn report_counts_plan_steps() {
        let report = RunReport::new("astar", &search(7, &[0, 1, 2], Some(2)), Some(2), Duration::ZERO);
        assert!(report.found);
        assert_eq!(report.explored, 7);
        assert_eq!(report.path_length, 3);
        assert_eq!(report.excess_cost(), Some(0));
        let text = report.to_string();
        assert!(text.contains("Squares Explored: 7"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn suboptimal_paths_are_flagged() {
        let report = RunReport::new("depth-first", &search(4, &[0, 1, 2, 3], Some(9)), Some(3), Duration::ZERO);
        assert_eq!(report.excess_cost(), Some(6));
        assert!(report.to_string().contains("costs 6 more"));
    }

    #[test]
    fn failed_search_prints_no_path() {
        let report = RunReport::new("dijkstra", &search(5, &[], None), None, Duration::ZERO);
        assert!(!report.found);
        assert_eq!(report.excess_cost(), None);
        let text = report.to_string();
        assert!(text.contains("Path: none"));
        assert!(text.contains("Optimal Cost: unreachable"));
    }
}
