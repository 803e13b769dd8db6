//! Course catalog.
//!
//! The catalog is the set of offered sections, keyed by identifier. It is
//! passed explicitly into every solve; nothing in the crate holds a
//! process-wide catalog.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::CourseRecord;
use crate::error::CatalogError;

/// Offered course sections keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    courses: BTreeMap<String, CourseRecord>,
}

/// Raw export shape: `{"data": {"courses": {<key>: {courseCode, ...}}}}`.
#[derive(Deserialize)]
struct RawExport {
    data: RawExportData,
}

#[derive(Deserialize)]
struct RawExportData {
    courses: BTreeMap<String, Value>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course (builder form). Replaces any course with the same ID.
    pub fn with_course(mut self, course: CourseRecord) -> Self {
        self.insert(course);
        self
    }

    /// Inserts a course, returning the record it replaced.
    pub fn insert(&mut self, course: CourseRecord) -> Option<CourseRecord> {
        self.courses.insert(course.id.clone(), course)
    }

    /// Parses a JSON object mapping identifier → course record.
    ///
    /// A record without `courseCode` takes its key as identifier. A record
    /// whose `courseCode` disagrees with its key is rejected. Each record
    /// keeps its source JSON for re-export.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let keyed: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let mut courses = BTreeMap::new();
        for (key, value) in keyed {
            let mut course = CourseRecord::from_value(value)?;
            if course.id.is_empty() {
                course.id = key.clone();
            } else if course.id != key {
                return Err(CatalogError::IdMismatch { key, id: course.id });
            }
            courses.insert(key, course);
        }
        Ok(Self { courses })
    }

    /// Parses the raw schedule export, re-keying records by `courseCode`.
    pub fn from_export_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: RawExport = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (key, value) in raw.data.courses {
            let course = CourseRecord::from_value(value)?;
            if course.id.is_empty() {
                return Err(CatalogError::MissingCourseCode(key));
            }
            catalog.insert(course);
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&CourseRecord> {
        self.courses.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Iterates courses in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.courses.values()
    }

    /// Identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }
}

impl FromIterator<CourseRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = CourseRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for course in iter {
            catalog.insert(course);
        }
        catalog
    }
}
