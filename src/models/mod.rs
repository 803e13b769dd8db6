//! Course selection domain models.
//!
//! Provides the data types that flow into and out of a solve: the catalog
//! of offered sections, the student's request bundle, and the result.
//!
//! # Domain Mappings
//!
//! | course-select | Registrar export | Student input |
//! |---------------|------------------|---------------|
//! | CourseRecord | Course section row | Selectable course |
//! | MeetingBlock | Schedule entry | - |
//! | AlternateGroup | - | Requirement column |
//! | SelectionRequest | - | Ratings + requirements |
//! | SolveResult | Re-import payload | Recommended schedule |

mod catalog;
mod course;
mod group;
mod request;
mod result;
mod time;

pub use catalog::Catalog;
pub use course::{CourseRecord, MeetingBlock};
pub use group::{AlternateGroup, TOTAL_COURSES_GROUP};
pub use request::SelectionRequest;
pub use result::{SelectedCourse, SolveResult};
pub use time::{ClockTime, Weekday, WeekdaySet, MINUTES_PER_DAY};
