//! Solve result model.

use serde::{Deserialize, Serialize};

/// A selected course, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCourse {
    /// Course identifier.
    pub id: String,
    /// Display name from the catalog.
    pub name: String,
}

impl SelectedCourse {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The outcome of a successful solve.
///
/// An empty `courses` list means the optimum is to take nothing; an
/// infeasible request never produces a `SolveResult`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Objective value reported by the solver.
    pub objective: f64,
    /// Selected courses in identifier order.
    pub courses: Vec<SelectedCourse>,
}

impl SolveResult {
    pub fn new(objective: f64, courses: Vec<SelectedCourse>) -> Self {
        Self { objective, courses }
    }

    /// Whether a course was selected.
    pub fn contains(&self, id: &str) -> bool {
        self.courses.iter().any(|c| c.id == id)
    }

    /// Selected identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.id.as_str())
    }

    /// `(identifier, name)` pairs for reporting.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.courses
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
