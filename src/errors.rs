//! Error taxonomy for the simulation core.
//!
//! Three families of failures exist: configuration errors (bad inputs caught
//! before any integration runs), computation errors (a segment's physics
//! cannot complete), and convergence errors (the distance-matching solver
//! runs out of budget). All of them propagate to the caller; a simulation
//! that cannot complete never yields a partial trajectory presented as
//! complete.

use crate::flight_point::FlightPoint;

/// Errors raised by flight points, segments, routes and the distance solver.
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    /// A field name outside the declared label set was supplied at
    /// `FlightPoint` construction.
    #[error("unknown flight point field `{field}`")]
    UnknownField { field: String },

    /// A field required by the computation is unset on the start point.
    #[error("flight point field `{field}` must be set before computing `{part}`")]
    MissingField { field: &'static str, part: String },

    /// A route was assembled with an inconsistent child, e.g. a climb group
    /// whose last leaf is not a climb segment.
    #[error("inconsistent flight part composition: {reason}")]
    InvalidComposition { reason: String },

    /// A segment's physics integration failed to converge or produced a
    /// non-physical result. Carries the phase name and the last valid state
    /// for diagnostics.
    #[error("computation failed in phase `{phase}`: {reason}")]
    Computation {
        phase: String,
        reason: String,
        last_point: Box<FlightPoint>,
    },

    /// The distance-matching root-finder exceeded its iteration budget or
    /// met a degenerate secant slope without reaching tolerance. The
    /// residual is target minus flown distance, so an overshooting mission
    /// reports a negative residual.
    #[error(
        "distance matching failed for target {target_m:.0} m: \
         last trial cruise distance {last_trial_m:.0} m, residual {residual_m:.0} m"
    )]
    Convergence {
        target_m: f64,
        last_trial_m: f64,
        residual_m: f64,
    },
}

impl FlightError {
    /// Build a computation error for the given phase, keeping the last
    /// valid point for diagnostics.
    pub fn computation(
        phase: impl Into<String>,
        reason: impl Into<String>,
        last_point: &FlightPoint,
    ) -> Self {
        FlightError::Computation {
            phase: phase.into(),
            reason: reason.into(),
            last_point: Box::new(last_point.clone()),
        }
    }
}
