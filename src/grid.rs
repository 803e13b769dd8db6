//! Discretized weekly time grid.
//!
//! The week is cut into fixed-width slot instants (default every 10 minutes
//! from 07:00 to 23:50) on each weekday. A course occupies a slot when one
//! of its meeting blocks on that day strictly contains the slot instant.
//!
//! # Conflict Policy
//! Occupancy uses strict inequalities on both ends (`start < t < end`), so
//! back-to-back meetings never share a slot. Blocks shorter than one slot,
//! or overlaps that fall between two instants, may be invisible to the grid.
//! That is the documented cost of discretization.
//!
//! # Complexity
//! Building is O(c × b × s) in the worst case, where c = courses,
//! b = blocks per course and s = slots covered by a block. Occupied slot
//! ranges are computed arithmetically, not by scanning every instant.

use std::fmt;

use crate::config::GridConfig;
use crate::error::ConfigError;
use crate::models::{ClockTime, CourseRecord, MeetingBlock, Weekday};
use crate::validation::validate_grid;

/// One discretized instant of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlotId {
    pub day: Weekday,
    pub instant: ClockTime,
}

impl TimeSlotId {
    pub fn new(day: Weekday, instant: ClockTime) -> Self {
        Self { day, instant }
    }
}

impl fmt::Display for TimeSlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.instant)
    }
}

/// Total (course, slot) occupancy for a fixed course list.
///
/// Courses are addressed by their position in the list passed to
/// [`TimeGrid::build`]; slots by their position in [`TimeGrid::slots`]
/// (day-major, then instant).
#[derive(Debug, Clone)]
pub struct TimeGrid {
    config: GridConfig,
    instants: Vec<ClockTime>,
    slots: Vec<TimeSlotId>,
    course_ids: Vec<String>,
    /// Row-major by slot: `occupied[slot * course_count + course]`.
    occupied: Vec<bool>,
}

impl TimeGrid {
    /// Builds the grid for `courses` under `config`.
    pub fn build(courses: &[&CourseRecord], config: &GridConfig) -> Result<Self, ConfigError> {
        validate_grid(config)?;

        let instants = config.instants();
        let slots: Vec<TimeSlotId> = Weekday::ALL
            .iter()
            .flat_map(|&day| instants.iter().map(move |&t| TimeSlotId::new(day, t)))
            .collect();

        let course_count = courses.len();
        let mut occupied = vec![false; slots.len() * course_count];

        for (course_idx, course) in courses.iter().enumerate() {
            for block in &course.schedule {
                let range = covered_instants(block, config, instants.len());
                for day in block.days.iter() {
                    let day_offset = day as usize * instants.len();
                    for instant_idx in range.clone() {
                        occupied[(day_offset + instant_idx) * course_count + course_idx] = true;
                    }
                }
            }
        }

        Ok(Self {
            config: config.clone(),
            instants,
            slots,
            course_ids: courses.iter().map(|c| c.id.clone()).collect(),
            occupied,
        })
    }

    /// All slots in grid order.
    pub fn slots(&self) -> &[TimeSlotId] {
        &self.slots
    }

    /// Course identifiers in index order.
    pub fn course_ids(&self) -> &[String] {
        &self.course_ids
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn course_count(&self) -> usize {
        self.course_ids.len()
    }

    /// Index of a slot, if it lies on the grid.
    pub fn slot_index(&self, slot: TimeSlotId) -> Option<usize> {
        let instant_idx = self.instants.binary_search(&slot.instant).ok()?;
        Some(slot.day as usize * self.instants.len() + instant_idx)
    }

    /// Whether course `course` occupies slot `slot` (both by index).
    #[inline]
    pub fn occupies(&self, course: usize, slot: usize) -> bool {
        self.occupied[slot * self.course_ids.len() + course]
    }

    /// Occupancy looked up by identifier and slot. `false` for unknown keys.
    pub fn occupies_id(&self, course_id: &str, slot: TimeSlotId) -> bool {
        match (
            self.course_ids.iter().position(|id| id == course_id),
            self.slot_index(slot),
        ) {
            (Some(course), Some(slot)) => self.occupies(course, slot),
            _ => false,
        }
    }

    /// Indices of the courses occupying `slot`, ascending.
    pub fn occupants(&self, slot: usize) -> Vec<usize> {
        let n = self.course_ids.len();
        let row = &self.occupied[slot * n..(slot + 1) * n];
        row.iter()
            .enumerate()
            .filter_map(|(course, &busy)| busy.then_some(course))
            .collect()
    }

    /// Slots occupied by course `course`, ascending.
    pub fn occupied_slots(&self, course: usize) -> Vec<usize> {
        (0..self.slots.len())
            .filter(|&slot| self.occupies(course, slot))
            .collect()
    }

    /// Whether two courses share at least one slot.
    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        a != b && (0..self.slots.len()).any(|slot| self.occupies(a, slot) && self.occupies(b, slot))
    }
}

/// Range of instant indices `i` with `start < instants[i] < end`.
///
/// Instant `i` is `window_start + i * granularity`.
fn covered_instants(
    block: &MeetingBlock,
    config: &GridConfig,
    instant_count: usize,
) -> std::ops::Range<usize> {
    let origin = i64::from(config.window_start.minutes());
    let step = i64::from(config.granularity_minutes);
    let start = i64::from(block.start.minutes()) - origin;
    let end = i64::from(block.end.minutes()) - origin;

    // First i with i * step > start.
    let first = if start < 0 { 0 } else { start / step + 1 };
    // First i with i * step >= end.
    let last = if end <= 0 { 0 } else { (end + step - 1) / step };

    let clamp = |i: i64| i.clamp(0, instant_count as i64) as usize;
    let (first, last) = (clamp(first), clamp(last));
    first..last.max(first)
}
