//! Course section and meeting block models.
//!
//! A course record is one offered section of a course, identified by a
//! string such as `"CSCI 140 HM-01"`, with the weekly meeting blocks it
//! occupies.
//!
//! # Wire Format
//! Records use the field names of the schedule export (`courseCode`,
//! `courseName`, `courseSchedule`, `scheduleDays`, `scheduleStartTime`,
//! `scheduleEndTime`). Any other fields are kept in `extra`. A record read
//! with [`CourseRecord::from_value`] also keeps the JSON it came from, and
//! [`CourseRecord::export_value`] hands that back to the schedule tool
//! unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ClockTime, Weekday, WeekdaySet};

/// A weekly meeting: a set of days plus a start and end time.
///
/// Invariant (checked by validation): `start < end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingBlock {
    /// Days this block meets.
    #[serde(rename = "scheduleDays")]
    pub days: WeekdaySet,
    /// Start time (exclusive bound for conflict detection).
    #[serde(rename = "scheduleStartTime")]
    pub start: ClockTime,
    /// End time (exclusive bound for conflict detection).
    #[serde(rename = "scheduleEndTime")]
    pub end: ClockTime,
    /// Unrecognized export fields (room, term dates, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeetingBlock {
    /// Creates a meeting block.
    pub fn new(days: WeekdaySet, start: ClockTime, end: ClockTime) -> Self {
        Self {
            days,
            start,
            end,
            extra: Map::new(),
        }
    }

    /// Whether the block meets on `day`.
    #[inline]
    pub fn meets_on(&self, day: Weekday) -> bool {
        self.days.contains(day)
    }

    /// Whether `instant` lies strictly inside the block.
    ///
    /// Both bounds are exclusive, so a block ending at 10:00 and one
    /// starting at 10:00 never share an instant.
    #[inline]
    pub fn covers(&self, instant: ClockTime) -> bool {
        self.start < instant && instant < self.end
    }

    /// Length in minutes (zero for inverted blocks).
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

/// One offered course section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Unique section identifier (department + number + section suffix).
    #[serde(rename = "courseCode", default)]
    pub id: String,
    /// Human-readable course title.
    #[serde(rename = "courseName", default)]
    pub name: String,
    /// Weekly meetings, in export order.
    #[serde(rename = "courseSchedule", default)]
    pub schedule: Vec<MeetingBlock>,
    /// Unrecognized export fields, preserved for re-export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The record exactly as ingested. Cleared by any builder edit.
    #[serde(skip)]
    source: Option<Value>,
}

impl CourseRecord {
    /// Creates a course with the given identifier and no meetings.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            schedule: Vec::new(),
            extra: Map::new(),
            source: None,
        }
    }

    /// Parses a record and keeps `value` for verbatim re-export.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut course: CourseRecord = serde_json::from_value(value.clone())?;
        course.source = Some(value);
        Ok(course)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.source = None;
        self
    }

    /// Adds a meeting block.
    pub fn with_meeting(mut self, block: MeetingBlock) -> Self {
        self.schedule.push(block);
        self.source = None;
        self
    }

    /// The record as the schedule tool should receive it: the ingested JSON
    /// when there is one, otherwise the serialized fields.
    pub fn export_value(&self) -> Result<Value, serde_json::Error> {
        match &self.source {
            Some(value) => Ok(value.clone()),
            None => serde_json::to_value(self),
        }
    }

    /// Adds a meeting block from its export strings (`"MW"`, `"09:00"`, `"10:15"`).
    pub fn with_meeting_str(
        self,
        days: &str,
        start: &str,
        end: &str,
    ) -> Result<Self, crate::error::CatalogError> {
        let block = MeetingBlock::new(WeekdaySet::parse(days), start.parse()?, end.parse()?);
        Ok(self.with_meeting(block))
    }

    /// Blocks that meet on `day`.
    pub fn meetings_on(&self, day: Weekday) -> impl Iterator<Item = &MeetingBlock> {
        self.schedule.iter().filter(move |b| b.meets_on(day))
    }

    /// Whether the course has no scheduled meetings.
    pub fn is_unscheduled(&self) -> bool {
        self.schedule.iter().all(|b| b.days.is_empty())
    }
}
