//! Integer-programming formulation of course selection.
//!
//! [`SelectionModelBuilder`] validates the request and assembles a
//! backend-independent [`SelectionModel`]; [`solve`] hands that model to
//! the `good_lp` backend and reports the selected courses.
//!
//! # Formulation
//!
//! ```text
//! maximize    Σ_c cost(c) · x_c
//! subject to  Σ_{c occupies s} x_c ≤ 1           for every occupied slot s
//!             Σ_{c ∈ sections(b)} x_c ≤ 1        for every shared base b
//!             lo(g) ≤ Σ_{c ∈ g} x_c ≤ hi(g)      for every alternate group g
//!             x_c ∈ {0, 1}
//! ```
//!
//! # Reference
//! Wolsey (1998), "Integer Programming", Ch. 1 (set packing formulations)

mod builder;
mod solver;

pub use builder::{SelectionModel, SelectionModelBuilder};
pub use solver::{solve, Selection, SELECTION_THRESHOLD};
