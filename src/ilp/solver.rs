//! Solver adapter over `good_lp`.
//!
//! Translates a [`SelectionModel`] into a fresh backend problem, solves it,
//! and maps the termination status onto [`SolveError`]. No backend state
//! survives a call.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError,
    Solution, SolverModel, Variable,
};
use log::{debug, info, warn};

use super::SelectionModel;
use crate::config::SolverConfig;
use crate::error::SolveError;

/// Variable values above this count as "taken".
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Raw solver output: objective value and selected course identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub objective: f64,
    /// Selected identifiers in variable (sorted) order.
    pub course_ids: Vec<String>,
}

/// Solves `model`, honoring the configured time limit.
///
/// With a limit set, the backend runs on a worker thread. `microlp` cannot
/// be interrupted, so after a timeout that thread keeps running (and using
/// a CPU) until the backend finishes, and its result is discarded. No
/// best-so-far selection is returned.
///
/// # Errors
/// - [`SolveError::Infeasible`] if no assignment satisfies the constraints
/// - [`SolveError::Solver`] for any other backend failure
/// - [`SolveError::TimedOut`] if the time limit elapsed first
pub fn solve(model: &SelectionModel, config: &SolverConfig) -> Result<Selection, SolveError> {
    let started = Instant::now();
    let outcome = match config.time_limit {
        None => solve_with_backend(model),
        Some(limit) => solve_with_deadline(model.clone(), limit),
    };

    match &outcome {
        Ok(selection) => info!(
            "solved in {:.2?}: objective {}, {} of {} courses selected",
            started.elapsed(),
            selection.objective,
            selection.course_ids.len(),
            model.variable_count()
        ),
        Err(e) => info!("solve ended after {:.2?}: {e}", started.elapsed()),
    }
    outcome
}

/// Runs the backend on a worker thread and waits at most `limit`.
///
/// On timeout the worker is detached but keeps solving; its eventual result is dropped.
fn solve_with_deadline(model: SelectionModel, limit: Duration) -> Result<Selection, SolveError> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("course-select-solver".into())
        .spawn(move || {
            // The receiver is gone after a timeout.
            let _ = tx.send(solve_with_backend(&model));
        })
        .map_err(|e| SolveError::Solver {
            status: format!("failed to start solver thread: {e}"),
        })?;

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            warn!("solver exceeded {limit:?}; abandoning worker");
            Err(SolveError::TimedOut { limit })
        }
        Err(RecvTimeoutError::Disconnected) => Err(SolveError::Solver {
            status: "solver thread exited without a result".into(),
        }),
    }
}

fn solve_with_backend(model: &SelectionModel) -> Result<Selection, SolveError> {
    // Rows without variables are constants; decide them here.
    for row in model.constraints.iter().filter(|c| c.is_constant()) {
        if !row.admits(0) {
            debug!("constant row '{}' requires at least {}", row.label, row.lower);
            return Err(SolveError::Infeasible);
        }
    }

    if model.variable_count() == 0 {
        return Ok(Selection {
            objective: 0.0,
            course_ids: Vec::new(),
        });
    }

    let mut vars = ProblemVariables::new();
    let decisions: Vec<Variable> = model
        .course_ids
        .iter()
        .map(|_| vars.add(variable().binary()))
        .collect();

    let objective: Expression = decisions
        .iter()
        .zip(&model.costs)
        .map(|(&x, &cost)| x * cost as f64)
        .sum();

    let mut problem = vars.maximise(objective.clone()).using(default_solver);
    for row in model.constraints.iter().filter(|c| !c.is_constant()) {
        let sum: Expression = row.members.iter().map(|&i| decisions[i]).sum();
        let upper = f64::from(row.upper);
        let lower = f64::from(row.lower);
        if row.lower == row.upper {
            problem = problem.with(constraint!(sum == upper));
        } else {
            if row.lower > 0 {
                problem = problem.with(constraint!(sum.clone() >= lower));
            }
            problem = problem.with(constraint!(sum <= upper));
        }
    }

    let solution = problem.solve().map_err(|e| match e {
        ResolutionError::Infeasible => SolveError::Infeasible,
        other => SolveError::Solver {
            status: other.to_string(),
        },
    })?;

    let selected: Vec<bool> = decisions
        .iter()
        .map(|&x| solution.value(x) > SELECTION_THRESHOLD)
        .collect();

    let violations = model.constraints.violations(&selected);
    if let Some(first) = violations.first() {
        warn!("backend returned {} violated rows", violations.len());
        return Err(SolveError::Solver {
            status: format!("backend solution breaks {first}"),
        });
    }

    Ok(Selection {
        objective: objective.eval_with(&solution),
        course_ids: model
            .course_ids
            .iter()
            .zip(&selected)
            .filter(|(_, &on)| on)
            .map(|(id, _)| id.clone())
            .collect(),
    })
}
