//! Course section selection by integer programming.
//!
//! Picks the subset of course sections that maximizes total student
//! preference while keeping the timetable free of overlaps, taking at most
//! one section per course, and meeting per-group minimum and maximum counts.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Catalog`, `CourseRecord`, `MeetingBlock`,
//!   `AlternateGroup`, `SelectionRequest`, `SolveResult`, weekday and clock types
//! - **`config`**: Grid discretization and solver settings
//! - **`validation`**: Request and grid checks run before any model is built
//! - **`grid`**: Discretized week and the course/slot occupancy relation
//! - **`encoding`**: Time-conflict, duplicate-section and alternate-group rows
//! - **`ilp`**: Model assembly (`SelectionModelBuilder`) and the `good_lp` adapter
//! - **`projection`**: Selected identifiers back to catalog records
//! - **`optimizer`**: End-to-end pipeline (`CourseOptimizer`)
//! - **`error`**: Error types for each stage
//!
//! # Architecture
//!
//! ```text
//! Catalog + SelectionRequest
//!   → validation → TimeGrid → ConstraintSet → SelectionModel
//!   → good_lp (microlp) → Selection → SolveResult
//! ```
//!
//! Every request builds a fresh model; no solver state is shared.
//!
//! # References
//!
//! - Wolsey (1998), "Integer Programming"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod config;
pub mod encoding;
pub mod error;
pub mod grid;
pub mod ilp;
pub mod models;
pub mod optimizer;
pub mod projection;
pub mod validation;

pub use error::OptimizeError;
pub use optimizer::{optimize, CourseOptimizer};
