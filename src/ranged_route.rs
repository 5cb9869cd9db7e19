//! Distance-matched route: adjusts cruise length until the whole route
//! covers a target ground distance.

use crate::constants::{DEFAULT_DISTANCE_ACCURACY, DISTANCE_SOLVER_MAX_ITER};
use crate::errors::FlightError;
use crate::flight_point::FlightPoint;
use crate::route::Route;
use crate::trajectory::Trajectory;

/// A route whose total flown ground distance is driven to a target by a
/// secant iteration on the cruise distance.
///
/// Each trial sets the route's cruise distance and re-runs the full route
/// simulation; the trajectory of the accepted trial is the solver's output,
/// so the returned points always match the final cruise distance setting.
#[derive(Debug, Clone)]
pub struct RangedRoute {
    route: Route,
    target_distance: f64,
    tolerance: f64,
    flight_points: Option<Trajectory>,
}

impl RangedRoute {
    pub fn new(route: Route, target_distance: f64) -> Self {
        Self {
            route,
            target_distance,
            tolerance: DEFAULT_DISTANCE_ACCURACY,
            flight_points: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Total ground distance the route must cover (m).
    pub fn target_distance(&self) -> f64 {
        self.target_distance
    }

    pub fn set_target_distance(&mut self, distance: f64) {
        self.target_distance = distance;
    }

    /// Acceptable residual between flown and target distance (m).
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Matched trajectory of the most recent solve. `None` before any solve
    /// and after a failed one.
    pub fn flight_points(&self) -> Option<&Trajectory> {
        self.flight_points.as_ref()
    }

    /// Run one trial: set the cruise distance, simulate the full route, and
    /// return the trajectory with its distance residual (target minus
    /// flown).
    fn evaluate(
        &mut self,
        cruise_distance: f64,
        start: &FlightPoint,
    ) -> Result<(Trajectory, f64), FlightError> {
        self.route.set_cruise_distance(cruise_distance);
        let trajectory = self.route.compute_from(start)?;
        let flown = trajectory
            .net_ground_distance()
            .expect("route points always carry ground distance");
        Ok((trajectory, self.target_distance - flown))
    }

    /// Find the cruise distance matching the target total distance and
    /// return the matched trajectory.
    ///
    /// Secant iteration seeded at half and a quarter of the target. Trial
    /// cruise distances are floored at zero; a degenerate secant slope or an
    /// exhausted iteration budget fails with a convergence error carrying
    /// the last trial.
    pub fn compute_from(&mut self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        // A failed solve must not leave points from an earlier solve behind.
        self.flight_points = None;

        let mut x0 = 0.5 * self.target_distance;
        let (trajectory, mut f0) = self.evaluate(x0, start)?;
        if f0.abs() <= self.tolerance {
            self.flight_points = Some(trajectory.clone());
            return Ok(trajectory);
        }

        let mut x1 = 0.25 * self.target_distance;
        for _ in 0..DISTANCE_SOLVER_MAX_ITER {
            let (trajectory, f1) = self.evaluate(x1, start)?;
            if f1.abs() <= self.tolerance {
                self.flight_points = Some(trajectory.clone());
                return Ok(trajectory);
            }

            let slope = f1 - f0;
            if slope.abs() < f64::EPSILON * self.target_distance.abs().max(1.0) {
                return Err(FlightError::Convergence {
                    target_m: self.target_distance,
                    last_trial_m: x1,
                    residual_m: f1,
                });
            }
            let next = (x1 - f1 * (x1 - x0) / slope).max(0.0);
            x0 = x1;
            f0 = f1;
            x1 = next;
        }

        Err(FlightError::Convergence {
            target_m: self.target_distance,
            last_trial_m: x1,
            residual_m: f0,
        })
    }
}
