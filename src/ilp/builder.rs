//! Selection model assembly.

use log::info;

use crate::config::GridConfig;
use crate::encoding::{ConstraintEncoder, ConstraintSet};
use crate::error::ConfigError;
use crate::grid::TimeGrid;
use crate::models::{Catalog, CourseRecord, SelectionRequest};
use crate::validation::{validate_grid, validate_request, ValidationError, ValidationErrorKind};

/// A backend-independent 0/1 selection model.
///
/// One binary decision variable per entry of `course_ids`; `costs[i]` is
/// the objective coefficient of variable `i`; every constraint references
/// the same index space. The model owns its data and can be moved to a
/// solver thread.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionModel {
    /// Course identifiers in variable order (sorted).
    pub course_ids: Vec<String>,
    /// Objective coefficient per variable (maximized).
    pub costs: Vec<i64>,
    /// Encoded constraints over the same index space.
    pub constraints: ConstraintSet,
}

impl SelectionModel {
    pub fn variable_count(&self) -> usize {
        self.course_ids.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of an assignment (one flag per variable).
    pub fn objective_of(&self, selected: &[bool]) -> i64 {
        self.costs
            .iter()
            .zip(selected)
            .filter(|(_, &on)| on)
            .map(|(&cost, _)| cost)
            .sum()
    }

    /// Variable index of a course.
    pub fn index_of(&self, course_id: &str) -> Option<usize> {
        self.course_ids
            .binary_search_by(|id| id.as_str().cmp(course_id))
            .ok()
    }
}

/// Builds a [`SelectionModel`] from a catalog and a request.
///
/// Each call to [`build`](Self::build) produces a fresh model; nothing is
/// shared between builds.
///
/// # Example
/// ```
/// use course_select::ilp::SelectionModelBuilder;
/// use course_select::models::{Catalog, CourseRecord, SelectionRequest};
///
/// let catalog = Catalog::new().with_course(
///     CourseRecord::new("CSCI 140 HM-01")
///         .with_meeting_str("TR", "13:15", "14:30")
///         .unwrap(),
/// );
/// let request = SelectionRequest::new().with_course("CSCI 140 HM-01", 5);
///
/// let model = SelectionModelBuilder::new(&catalog, &request).build().unwrap();
/// assert_eq!(model.variable_count(), 1);
/// ```
pub struct SelectionModelBuilder<'a> {
    catalog: &'a Catalog,
    request: &'a SelectionRequest,
    grid_config: GridConfig,
}

impl<'a> SelectionModelBuilder<'a> {
    /// Creates a builder with the default grid.
    pub fn new(catalog: &'a Catalog, request: &'a SelectionRequest) -> Self {
        Self {
            catalog,
            request,
            grid_config: GridConfig::default(),
        }
    }

    /// Sets the grid discretization.
    pub fn with_grid_config(mut self, config: GridConfig) -> Self {
        self.grid_config = config;
        self
    }

    /// Validates the inputs and assembles the model.
    ///
    /// Creates:
    /// - A variable per considered course, in sorted identifier order
    /// - Time-conflict, duplicate-section and alternate-group rows
    /// - The objective `Σ cost(c) · x_c`
    pub fn build(&self) -> Result<SelectionModel, ConfigError> {
        let mut errors = Vec::new();
        if let Err(e) = validate_request(self.catalog, self.request) {
            errors.extend(e);
        }
        if let Err(e) = validate_grid(&self.grid_config) {
            errors.extend(e);
        }
        if !errors.is_empty() {
            return Err(ConfigError::new(errors));
        }

        // `request.courses` is a BTreeSet, so this order is sorted.
        let courses = self.considered_courses()?;
        let costs = self.costs(&courses)?;

        let grid = TimeGrid::build(&courses, &self.grid_config)?;
        let constraints = ConstraintEncoder::new(&grid, &self.request.groups).encode();

        info!(
            "built selection model: {} variables, {} constraints over {} slots",
            courses.len(),
            constraints.len(),
            grid.slot_count()
        );

        Ok(SelectionModel {
            course_ids: grid.course_ids().to_vec(),
            costs,
            constraints,
        })
    }

    fn considered_courses(&self) -> Result<Vec<&'a CourseRecord>, ConfigError> {
        self.request
            .courses
            .iter()
            .map(|id| {
                self.catalog.get(id).ok_or_else(|| {
                    ConfigError::new(vec![ValidationError::new(
                        ValidationErrorKind::UnknownCourse,
                        format!("Course '{id}' is not in the catalog"),
                    )])
                })
            })
            .collect()
    }

    fn costs(&self, courses: &[&CourseRecord]) -> Result<Vec<i64>, ConfigError> {
        courses
            .iter()
            .map(|course| {
                self.request.cost(&course.id).ok_or_else(|| {
                    ConfigError::new(vec![ValidationError::new(
                        ValidationErrorKind::MissingCost,
                        format!("Course '{}' has no preference cost", course.id),
                    )])
                })
            })
            .collect()
    }
}
