//! Input validation for course selection requests.
//!
//! Checks the request bundle against the catalog and the grid settings
//! before any model is built. Detects:
//! - Considered courses missing from the catalog
//! - Considered courses without a preference cost
//! - Meeting blocks whose start is not before their end
//! - Alternate groups with `lower > upper` or duplicate identifiers
//! - Unusable grid configurations
//!
//! Validation never defaults a missing value; every problem is reported.

use std::collections::HashSet;

use crate::config::GridConfig;
use crate::models::{Catalog, SelectionRequest};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A considered course has no entry in the cost map.
    MissingCost,
    /// A considered course is absent from the catalog.
    UnknownCourse,
    /// A meeting block starts at or after its end.
    InvalidMeeting,
    /// An alternate group has `lower > upper`.
    InvalidBounds,
    /// Two alternate groups share an identifier.
    DuplicateGroupId,
    /// A bundle names a group without patterns or bounds.
    MissingGroupField,
    /// The time grid settings cannot produce a grid.
    InvalidGrid,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request against a catalog.
///
/// Checks:
/// 1. Every considered course exists in the catalog
/// 2. Every considered course has a cost
/// 3. Every meeting block of a considered course has `start < end`
/// 4. No two groups share an identifier
/// 5. Every group has `lower <= upper`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(catalog: &Catalog, request: &SelectionRequest) -> ValidationResult {
    let mut errors = Vec::new();

    for id in &request.courses {
        match catalog.get(id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Course '{id}' is not in the catalog"),
            )),
            Some(course) => {
                for block in course.schedule.iter().filter(|b| !b.is_well_formed()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidMeeting,
                        format!(
                            "Course '{id}' has a meeting from {} to {}",
                            block.start, block.end
                        ),
                    ));
                }
            }
        }

        if !request.costs.contains_key(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCost,
                format!("Course '{id}' has no preference cost"),
            ));
        }
    }

    let mut group_ids = HashSet::new();
    for group in &request.groups {
        if !group_ids.insert(group.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateGroupId,
                format!("Duplicate alternate group ID: {}", group.id),
            ));
        }
        if !group.has_valid_bounds() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBounds,
                format!(
                    "Alternate group '{}' has lower bound {} above upper bound {}",
                    group.id, group.lower, group.upper
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates grid settings: positive granularity and a non-empty window.
pub fn validate_grid(config: &GridConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.granularity_minutes == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGrid,
            "Grid granularity must be at least one minute",
        ));
    }
    if config.window_start >= config.window_end {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGrid,
            format!(
                "Grid window start {} is not before end {}",
                config.window_start, config.window_end
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
