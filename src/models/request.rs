//! Selection request: the preference and requirement bundle for one solve.
//!
//! The request names which catalog courses to consider, how much the
//! student wants each one, and which alternate-group requirements apply.
//! It is agnostic to whether it came from a spreadsheet or a form.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::AlternateGroup;
use crate::error::ConfigError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Input bundle for a single course selection solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Course identifiers to consider.
    pub courses: BTreeSet<String>,
    /// Preference cost per course (higher = more desirable).
    pub costs: BTreeMap<String, i64>,
    /// Bounded group requirements.
    pub groups: Vec<AlternateGroup>,
}

impl SelectionRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Considers a course with the given preference cost.
    pub fn with_course(mut self, id: impl Into<String>, cost: i64) -> Self {
        let id = id.into();
        self.costs.insert(id.clone(), cost);
        self.courses.insert(id);
        self
    }

    /// Considers a course without recording a cost.
    ///
    /// Validation rejects the request unless a cost is added later.
    pub fn with_uncosted_course(mut self, id: impl Into<String>) -> Self {
        self.courses.insert(id.into());
        self
    }

    /// Sets or replaces a course's cost without adding it to the considered set.
    pub fn with_cost(mut self, id: impl Into<String>, cost: i64) -> Self {
        self.costs.insert(id.into(), cost);
        self
    }

    /// Adds an alternate group requirement.
    pub fn with_group(mut self, group: AlternateGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Assembles a request from the flat six-part bundle produced by the
    /// input collaborators: considered courses, cost map, group identifiers,
    /// and per-group patterns, lower bounds and upper bounds.
    ///
    /// Every listed group identifier must appear in all three per-group maps.
    pub fn from_bundle(
        courses: BTreeSet<String>,
        costs: BTreeMap<String, i64>,
        group_ids: BTreeSet<String>,
        mut patterns: BTreeMap<String, Vec<String>>,
        lower_bounds: &BTreeMap<String, u32>,
        upper_bounds: &BTreeMap<String, u32>,
    ) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        let mut groups = Vec::with_capacity(group_ids.len());

        for id in group_ids {
            let missing: Vec<&str> = [
                ("patterns", patterns.contains_key(&id)),
                ("lower bound", lower_bounds.contains_key(&id)),
                ("upper bound", upper_bounds.contains_key(&id)),
            ]
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(field, _)| field)
            .collect();

            match (patterns.remove(&id), lower_bounds.get(&id), upper_bounds.get(&id)) {
                (Some(p), Some(&lower), Some(&upper)) => {
                    groups.push(AlternateGroup::new(id, lower, upper).with_patterns(p));
                }
                _ => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingGroupField,
                    format!("Alternate group '{id}' has no {}", missing.join(", ")),
                )),
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::new(errors));
        }

        Ok(Self {
            courses,
            costs,
            groups,
        })
    }

    /// Cost of a course, if recorded.
    pub fn cost(&self, id: &str) -> Option<i64> {
        self.costs.get(id).copied()
    }

    /// Number of considered courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}
