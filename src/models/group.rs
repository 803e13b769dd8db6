//! Alternate groups: bounded "take k of these" requirements.
//!
//! A group selects member courses by substring match on the course
//! identifier (`"CSCI 1"` matches every 100-level CS section) and bounds
//! how many of them may be taken. Membership is a heuristic over the
//! identifier text, not a structured course-number match.

use serde::{Deserialize, Serialize};

/// Identifier of the implicit "total number of courses" group.
pub const TOTAL_COURSES_GROUP: &str = "total";

/// A user-defined bucket of courses with an inclusive selection count range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateGroup {
    /// Unique group identifier.
    pub id: String,
    /// Minimum number of member courses to select.
    pub lower: u32,
    /// Maximum number of member courses to select.
    pub upper: u32,
    /// Identifier substrings; a course is a member if it contains any of them.
    pub patterns: Vec<String>,
}

impl AlternateGroup {
    /// Creates a group with no patterns.
    pub fn new(id: impl Into<String>, lower: u32, upper: u32) -> Self {
        Self {
            id: id.into(),
            lower,
            upper,
            patterns: Vec::new(),
        }
    }

    /// Creates a group requiring exactly `count` members.
    pub fn exactly(id: impl Into<String>, count: u32) -> Self {
        Self::new(id, count, count)
    }

    /// Bounds the total number of selected courses.
    ///
    /// Matches every identifier containing a space, which is every
    /// department-number-section identifier.
    pub fn total_courses(lower: u32, upper: u32) -> Self {
        Self::new(TOTAL_COURSES_GROUP, lower, upper).with_pattern(" ")
    }

    /// Adds a match substring.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Adds several match substrings.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Whether `course_id` belongs to this group.
    pub fn matches(&self, course_id: &str) -> bool {
        self.patterns.iter().any(|p| course_id.contains(p.as_str()))
    }

    /// Whether the bounds are consistent (`lower <= upper`).
    pub fn has_valid_bounds(&self) -> bool {
        self.lower <= self.upper
    }
}
