//! Constraint encoding.
//!
//! Derives the three constraint families of a course selection model from
//! the time grid and the request:
//!
//! 1. **Time conflict**: for each occupied slot, at most one occupant.
//! 2. **Duplicate section**: at most one section per base identifier.
//! 3. **Alternate group**: selected members within `[lower, upper]`.
//!
//! Every constraint has the form `lower ≤ Σ x_c ≤ upper` with unit
//! coefficients, so it is stored as a member list plus bounds.
//!
//! # Determinism
//! Courses are indexed in the caller's order (sorted identifiers when built
//! through the model builder). Constraints are emitted slots-first in grid
//! order, then base groups sorted by base, then alternate groups sorted by
//! identifier. Encoding identical input twice yields identical output.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{debug, trace};

use crate::grid::TimeGrid;
use crate::models::AlternateGroup;

/// Constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstraintFamily {
    /// At most one course per occupied time slot.
    TimeConflict,
    /// At most one section per underlying course.
    DuplicateSection,
    /// User-defined bounded group.
    AlternateGroup,
}

impl fmt::Display for ConstraintFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintFamily::TimeConflict => "time-conflict",
            ConstraintFamily::DuplicateSection => "duplicate-section",
            ConstraintFamily::AlternateGroup => "alternate-group",
        };
        f.write_str(name)
    }
}

/// `lower ≤ Σ_{c ∈ members} x_c ≤ upper`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    pub family: ConstraintFamily,
    /// Slot, base identifier or group identifier this row came from.
    pub label: String,
    /// Course indices with coefficient 1, ascending.
    pub members: Vec<usize>,
    pub lower: u32,
    pub upper: u32,
}

impl LinearConstraint {
    /// Whether the row has no variables (a constant `0` sum).
    pub fn is_constant(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a sum of `count` satisfies the bounds.
    #[inline]
    pub fn admits(&self, count: u32) -> bool {
        self.lower <= count && count <= self.upper
    }
}

/// A constraint row broken by a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub family: ConstraintFamily,
    pub label: String,
    pub selected: u32,
    pub lower: u32,
    pub upper: u32,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} constraint '{}' has {} selected, allowed [{}, {}]",
            self.family, self.label, self.selected, self.lower, self.upper
        )
    }
}

/// Canonical, order-independent form of one constraint row.
pub type CanonicalRow = (ConstraintFamily, Vec<String>, u32, u32);

/// All encoded constraints over a fixed course index space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Course identifiers; `members` index into this list.
    pub course_ids: Vec<String>,
    pub constraints: Vec<LinearConstraint>,
}

impl ConstraintSet {
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter()
    }

    /// Rows of one family.
    pub fn family(&self, family: ConstraintFamily) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    pub fn count(&self, family: ConstraintFamily) -> usize {
        self.family(family).count()
    }

    /// Order-independent canonical form, keyed by member identifiers.
    ///
    /// Two encodings with equal fingerprints describe the same feasible
    /// region regardless of emission order or course indexing.
    pub fn fingerprint(&self) -> BTreeSet<CanonicalRow> {
        self.constraints
            .iter()
            .map(|c| {
                let mut ids: Vec<String> =
                    c.members.iter().map(|&i| self.course_ids[i].clone()).collect();
                ids.sort();
                (c.family, ids, c.lower, c.upper)
            })
            .collect()
    }

    /// Rows broken by `selected` (one flag per course index).
    pub fn violations(&self, selected: &[bool]) -> Vec<ConstraintViolation> {
        self.constraints
            .iter()
            .filter_map(|c| {
                let count = c.members.iter().filter(|&&i| selected[i]).count() as u32;
                (!c.admits(count)).then(|| ConstraintViolation {
                    family: c.family,
                    label: c.label.clone(),
                    selected: count,
                    lower: c.lower,
                    upper: c.upper,
                })
            })
            .collect()
    }
}

/// Base identifier: the course identifier without its final token.
///
/// `"ENGR 190AV HM-01"` → `"ENGR 190AV"`. A single-token identifier is
/// its own base. Tokens are whitespace-delimited; runs of whitespace are
/// collapsed to one space.
pub fn base_identifier(id: &str) -> String {
    let tokens: Vec<&str> = id.split_whitespace().collect();
    match tokens.len() {
        0 => String::new(),
        1 => tokens[0].to_string(),
        n => tokens[..n - 1].join(" "),
    }
}

/// Encodes constraints for a course list over a prebuilt grid.
///
/// The grid must have been built from the same course list, in the same
/// order; course indices are shared between the two.
pub struct ConstraintEncoder<'a> {
    grid: &'a TimeGrid,
    groups: &'a [AlternateGroup],
}

impl<'a> ConstraintEncoder<'a> {
    pub fn new(grid: &'a TimeGrid, groups: &'a [AlternateGroup]) -> Self {
        Self { grid, groups }
    }

    /// Encodes all three families.
    pub fn encode(&self) -> ConstraintSet {
        let mut constraints = self.time_conflicts();
        constraints.extend(self.duplicate_sections());
        constraints.extend(self.alternate_groups());

        let set = ConstraintSet {
            course_ids: self.grid.course_ids().to_vec(),
            constraints,
        };
        debug!(
            "encoded {} constraints ({} time-conflict, {} duplicate-section, {} alternate-group)",
            set.len(),
            set.count(ConstraintFamily::TimeConflict),
            set.count(ConstraintFamily::DuplicateSection),
            set.count(ConstraintFamily::AlternateGroup),
        );
        set
    }

    /// One `Σ ≤ 1` row per slot with at least one occupant.
    ///
    /// Single-occupant rows are kept: they are redundant for binaries but
    /// keep the row set aligned with the occupied slots.
    pub fn time_conflicts(&self) -> Vec<LinearConstraint> {
        self.grid
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(slot_idx, slot)| {
                let members = self.grid.occupants(slot_idx);
                (!members.is_empty()).then(|| LinearConstraint {
                    family: ConstraintFamily::TimeConflict,
                    label: slot.to_string(),
                    members,
                    lower: 0,
                    upper: 1,
                })
            })
            .collect()
    }

    /// One `Σ ≤ 1` row per base identifier shared by two or more sections.
    pub fn duplicate_sections(&self) -> Vec<LinearConstraint> {
        let mut by_base: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, id) in self.grid.course_ids().iter().enumerate() {
            by_base.entry(base_identifier(id)).or_default().push(idx);
        }

        by_base
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(base, members)| {
                trace!("duplicate sections of '{base}': {members:?}");
                LinearConstraint {
                    family: ConstraintFamily::DuplicateSection,
                    label: base,
                    members,
                    lower: 0,
                    upper: 1,
                }
            })
            .collect()
    }

    /// One `lower ≤ Σ ≤ upper` row per alternate group, sorted by group ID.
    ///
    /// Groups with no members are still emitted so that a positive lower
    /// bound surfaces as infeasibility.
    pub fn alternate_groups(&self) -> Vec<LinearConstraint> {
        let mut groups: Vec<&AlternateGroup> = self.groups.iter().collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));

        groups
            .into_iter()
            .map(|group| {
                let members: Vec<usize> = self
                    .grid
                    .course_ids()
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| group.matches(id))
                    .map(|(idx, _)| idx)
                    .collect();
                trace!(
                    "alternate group '{}' [{}, {}]: {} members",
                    group.id,
                    group.lower,
                    group.upper,
                    members.len()
                );
                LinearConstraint {
                    family: ConstraintFamily::AlternateGroup,
                    label: group.id.clone(),
                    members,
                    lower: group.lower,
                    upper: group.upper,
                }
            })
            .collect()
    }
}
