//! End-to-end course optimizer.
//!
//! # Algorithm
//!
//! 1. Validate the request against the catalog and grid settings.
//! 2. Build the time grid for the considered courses.
//! 3. Encode time-conflict, duplicate-section and alternate-group rows.
//! 4. Assemble the 0/1 model and maximize total preference.
//! 5. Project the selected identifiers back onto catalog records.
//!
//! Each call builds and discards its own model, so one optimizer may serve
//! many requests, including concurrently from several threads.

use log::info;
use serde_json::Value;

use crate::config::{GridConfig, OptimizerConfig, SolverConfig};
use crate::error::OptimizeError;
use crate::ilp::{self, SelectionModelBuilder};
use crate::models::{Catalog, SelectionRequest, SolveResult};
use crate::projection;

/// Course selection optimizer.
///
/// # Example
///
/// ```
/// use course_select::optimizer::CourseOptimizer;
/// use course_select::models::{Catalog, CourseRecord, SelectionRequest};
///
/// let catalog = Catalog::new()
///     .with_course(CourseRecord::new("CSCI 070 HM-01").with_name("Data Structures")
///         .with_meeting_str("MW", "09:00", "10:15").unwrap())
///     .with_course(CourseRecord::new("CSCI 070 HM-02").with_name("Data Structures")
///         .with_meeting_str("TR", "09:00", "10:15").unwrap())
///     .with_course(CourseRecord::new("PHYS 024 HM-01").with_name("Mechanics")
///         .with_meeting_str("MW", "10:00", "11:15").unwrap());
/// let request = SelectionRequest::new()
///     .with_course("CSCI 070 HM-01", 5)
///     .with_course("CSCI 070 HM-02", 4)
///     .with_course("PHYS 024 HM-01", 3);
///
/// let result = CourseOptimizer::new().optimize(&catalog, &request).unwrap();
/// assert_eq!(result.objective, 7.0);
/// assert!(result.contains("CSCI 070 HM-02"));
/// assert!(result.contains("PHYS 024 HM-01"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CourseOptimizer {
    config: OptimizerConfig,
}

impl CourseOptimizer {
    /// Creates an optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the grid discretization.
    pub fn with_grid_config(mut self, grid: GridConfig) -> Self {
        self.config.grid = grid;
        self
    }

    /// Sets solver options.
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.config.solver = solver;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Selects the best feasible set of courses for `request`.
    ///
    /// # Errors
    /// - [`OptimizeError::Config`] for an invalid request or grid, before solving
    /// - [`OptimizeError::Solve`] for infeasibility, backend failure or timeout
    /// - [`OptimizeError::Projection`] if a selected course left the catalog
    pub fn optimize(
        &self,
        catalog: &Catalog,
        request: &SelectionRequest,
    ) -> Result<SolveResult, OptimizeError> {
        info!(
            "optimizing {} candidate courses with {} alternate groups",
            request.course_count(),
            request.groups.len()
        );
        let model = SelectionModelBuilder::new(catalog, request)
            .with_grid_config(self.config.grid.clone())
            .build()?;
        let selection = ilp::solve(&model, &self.config.solver)?;
        Ok(projection::project(catalog, &selection)?)
    }

    /// Optimizes and also returns the re-import records (tagged `selected`).
    pub fn optimize_with_records(
        &self,
        catalog: &Catalog,
        request: &SelectionRequest,
    ) -> Result<(SolveResult, Vec<Value>), OptimizeError> {
        let result = self.optimize(catalog, request)?;
        let records = projection::schedule_records(catalog, &result)?;
        Ok((result, records))
    }
}

/// Optimizes with default settings.
pub fn optimize(catalog: &Catalog, request: &SelectionRequest) -> Result<SolveResult, OptimizeError> {
    CourseOptimizer::new().optimize(catalog, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::base_identifier;
    use crate::error::SolveError;
    use crate::grid::TimeGrid;
    use crate::models::{AlternateGroup, ClockTime, CourseRecord};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;
    use std::time::Duration;

    fn course(id: &str, name: &str, days: &str, start: &str, end: &str) -> CourseRecord {
        CourseRecord::new(id)
            .with_name(name)
            .with_meeting_str(days, start, end)
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_same_time_sections_pick_one() {
        // Hyphenated identifiers are single tokens, so the shared time slots
        // are what keep both sections out.
        let catalog = Catalog::new()
            .with_course(course("CS101-A", "Intro CS", "MW", "09:00", "10:00"))
            .with_course(course("CS101-B", "Intro CS", "MW", "09:00", "10:00"))
            .with_course(course("MATH50", "Calculus", "TR", "09:00", "10:00"));
        let request = SelectionRequest::new()
            .with_course("CS101-A", 5)
            .with_course("CS101-B", 5)
            .with_course("MATH50", 3);

        let result = optimize(&catalog, &request).unwrap();
        assert!(approx(result.objective, 8.0));
        assert_eq!(result.len(), 2);
        assert!(result.contains("MATH50"));
        assert!(result.contains("CS101-A") ^ result.contains("CS101-B"));
    }

    #[test]
    fn test_duplicate_sections_pick_one() {
        // Different times; only the shared base identifier "CS101" excludes one.
        let catalog = Catalog::new()
            .with_course(course("CS101 A", "Intro CS", "MW", "09:00", "10:00"))
            .with_course(course("CS101 B", "Intro CS", "MW", "13:00", "14:00"))
            .with_course(course("MATH50 A", "Calculus", "TR", "09:00", "10:00"));
        let request = SelectionRequest::new()
            .with_course("CS101 A", 5)
            .with_course("CS101 B", 5)
            .with_course("MATH50 A", 3);

        let result = optimize(&catalog, &request).unwrap();
        assert!(approx(result.objective, 8.0));
        assert!(result.contains("MATH50 A"));
        assert!(result.contains("CS101 A") ^ result.contains("CS101 B"));
    }

    #[test]
    fn test_zero_cost_group_forces_selection() {
        let catalog = Catalog::new()
            .with_course(course("PE 001 HM-01", "Swimming", "M", "16:00", "17:00"))
            .with_course(course("PE 002 HM-01", "Climbing", "W", "16:00", "17:00"));
        let request = SelectionRequest::new()
            .with_course("PE 001 HM-01", 0)
            .with_course("PE 002 HM-01", 0)
            .with_group(AlternateGroup::exactly("pe", 2).with_pattern("PE "));

        let result = optimize(&catalog, &request).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["PE 001 HM-01", "PE 002 HM-01"]);
        assert!(approx(result.objective, 0.0));
    }

    #[test]
    fn test_group_with_too_few_members_is_infeasible() {
        let catalog =
            Catalog::new().with_course(course("PE 001 HM-01", "Swimming", "M", "16:00", "17:00"));
        let request = SelectionRequest::new()
            .with_course("PE 001 HM-01", 0)
            .with_group(AlternateGroup::exactly("pe", 2).with_pattern("PE "));

        let err = optimize(&catalog, &request).unwrap_err();
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_memberless_group_lower_zero_is_vacuous() {
        let catalog =
            Catalog::new().with_course(course("ART 002 HM-01", "Drawing", "F", "13:00", "16:00"));
        let request = SelectionRequest::new()
            .with_course("ART 002 HM-01", 6)
            .with_group(AlternateGroup::new("none", 0, 2).with_pattern("ZZZ"));

        let result = optimize(&catalog, &request).unwrap();
        assert!(result.contains("ART 002 HM-01"));
    }

    #[test]
    fn test_infeasible_distinct_from_empty_selection() {
        let catalog =
            Catalog::new().with_course(course("ECON 197 PZ-01", "Seminar", "T", "19:00", "21:50"));

        let empty = SelectionRequest::new().with_course("ECON 197 PZ-01", -4);
        let result = optimize(&catalog, &empty).unwrap();
        assert!(result.is_empty());
        assert!(approx(result.objective, 0.0));

        let forced = empty.with_group(AlternateGroup::total_courses(2, 3));
        assert!(optimize(&catalog, &forced).unwrap_err().is_infeasible());
    }

    #[test]
    fn test_total_courses_bound() {
        let catalog = Catalog::new()
            .with_course(course("A 1 X", "a", "M", "09:00", "10:00"))
            .with_course(course("B 1 X", "b", "T", "09:00", "10:00"))
            .with_course(course("C 1 X", "c", "W", "09:00", "10:00"));
        let request = SelectionRequest::new()
            .with_course("A 1 X", 1)
            .with_course("B 1 X", 2)
            .with_course("C 1 X", 3)
            .with_group(AlternateGroup::total_courses(0, 2));

        let result = optimize(&catalog, &request).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["B 1 X", "C 1 X"]);
    }

    #[test]
    fn test_back_to_back_both_selected() {
        let catalog = Catalog::new()
            .with_course(course("A 1 X", "a", "MWF", "09:00", "10:00"))
            .with_course(course("B 1 X", "b", "MWF", "10:00", "11:00"));
        let request = SelectionRequest::new().with_course("A 1 X", 1).with_course("B 1 X", 1);

        let result = optimize(&catalog, &request).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_one_minute_overlap_quantization() {
        let catalog = Catalog::new()
            .with_course(course("A 1 X", "a", "M", "09:00", "10:01"))
            .with_course(course("B 1 X", "b", "M", "10:00", "11:00"))
            .with_course(course("C 1 X", "c", "M", "09:00", "10:15"));

        // 09:00-10:01 vs 10:00-11:00: not detected at 10-minute slots.
        let request = SelectionRequest::new().with_course("A 1 X", 1).with_course("B 1 X", 1);
        assert_eq!(optimize(&catalog, &request).unwrap().len(), 2);

        // 09:00-10:15 vs 10:00-11:00: shares 10:10, so only one is taken.
        let request = SelectionRequest::new().with_course("C 1 X", 1).with_course("B 1 X", 2);
        let result = optimize(&catalog, &request).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["B 1 X"]);
    }

    #[test]
    fn test_config_error_before_solving() {
        let catalog = Catalog::new();
        let request = SelectionRequest::new().with_course("MISSING 1 X", 1);
        let err = optimize(&catalog, &request).unwrap_err();
        assert!(matches!(err, OptimizeError::Config(_)));
    }

    #[test]
    fn test_optimize_with_records() {
        let catalog = Catalog::new()
            .with_course(course("MATH 103 PO-01", "Combinatorics", "TR", "11:00", "12:15"));
        let request = SelectionRequest::new().with_course("MATH 103 PO-01", 8);

        let optimizer = CourseOptimizer::new()
            .with_solver_config(SolverConfig::default().with_time_limit(Duration::from_secs(60)));
        let (result, records) = optimizer.optimize_with_records(&catalog, &request).unwrap();
        assert_eq!(result.pairs(), vec![("MATH 103 PO-01", "Combinatorics")]);
        assert_eq!(records[0]["selected"], true);
    }

    #[test]
    fn test_coarse_grid_config_changes_conflicts() {
        let catalog = Catalog::new()
            .with_course(course("A 1 X", "a", "M", "09:00", "09:50"))
            .with_course(course("B 1 X", "b", "M", "09:40", "10:30"));
        let request = SelectionRequest::new().with_course("A 1 X", 1).with_course("B 1 X", 1);

        // At 10 minutes, 09:40 is B's start and 09:50 is A's end; neither is shared.
        assert_eq!(optimize(&catalog, &request).unwrap().len(), 2);

        let fine = CourseOptimizer::new().with_grid_config(GridConfig::default().with_granularity(5));
        assert_eq!(fine.optimize(&catalog, &request).unwrap().len(), 1);
    }

    #[test]
    fn test_optimizer_is_reusable() {
        let catalog = Catalog::new()
            .with_course(course("A 1 X", "a", "M", "09:00", "10:00"))
            .with_course(course("B 1 X", "b", "M", "09:30", "10:30"));
        let optimizer = CourseOptimizer::new();

        let first = SelectionRequest::new()
            .with_course("A 1 X", 1)
            .with_group(AlternateGroup::exactly("a", 1).with_pattern("A "));
        assert!(optimizer.optimize(&catalog, &first).unwrap().contains("A 1 X"));

        // No leftover rows from the previous request.
        let second = SelectionRequest::new().with_course("B 1 X", 1);
        let result = optimizer.optimize(&catalog, &second).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["B 1 X"]);
    }

    /// Random catalogs: every returned selection honors all three families.
    #[test]
    fn test_random_catalogs_respect_constraints() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let departments = ["CSCI", "MATH", "PHYS"];
        let grid_config = GridConfig::default();

        let mut bounded_rounds = 0;
        for round in 0..25 {
            let mut catalog = Catalog::new();
            let mut request = SelectionRequest::new();
            for i in 0..rng.random_range(3..10) {
                let dept = departments[rng.random_range(0..departments.len())];
                let id = format!("{dept} {:03} S-{i:02}", rng.random_range(1..4));
                let start = rng.random_range(8 * 60..18 * 60);
                let length = rng.random_range(30..120);
                let days: String = "MTWRF".chars().filter(|_| rng.random_bool(0.4)).collect();
                let block = crate::models::MeetingBlock::new(
                    crate::models::WeekdaySet::parse(&days),
                    ClockTime::from_minutes(start).unwrap(),
                    ClockTime::from_minutes(start + length).unwrap(),
                );
                catalog.insert(CourseRecord::new(&id).with_name(dept).with_meeting(block));
                request = request.with_course(id, rng.random_range(0..10));
            }
            let lower: u32 = rng.random_range(0..=2);
            let upper = rng.random_range(lower.max(1)..=3);
            let group = AlternateGroup::new("g", lower, upper).with_pattern("MATH");
            request = request.with_group(group.clone());

            let result = match optimize(&catalog, &request) {
                Ok(result) => result,
                Err(OptimizeError::Solve(SolveError::Infeasible)) => continue,
                Err(e) => panic!("round {round}: {e}"),
            };

            let chosen: Vec<&CourseRecord> =
                result.ids().map(|id| catalog.get(id).unwrap()).collect();
            let grid = TimeGrid::build(&chosen, &grid_config).unwrap();
            for a in 0..chosen.len() {
                for b in a + 1..chosen.len() {
                    assert!(!grid.conflicts(a, b), "round {round}: conflicting pair selected");
                }
            }

            let mut bases: HashMap<String, usize> = HashMap::new();
            for id in result.ids() {
                *bases.entry(base_identifier(id)).or_default() += 1;
            }
            assert!(bases.values().all(|&n| n <= 1), "round {round}: duplicate sections");

            let members = result.ids().filter(|id| group.matches(id)).count() as u32;
            assert!(
                (group.lower..=group.upper).contains(&members),
                "round {round}: {members} group members outside [{}, {}]",
                group.lower,
                group.upper
            );
            if group.lower > 0 {
                bounded_rounds += 1;
            }
        }
        assert!(bounded_rounds > 0, "no feasible round with a positive lower bound");
    }
}
