//! Route: climb phases + one cruise segment + descent phases.

use crate::cruise::CruiseSegment;
use crate::errors::FlightError;
use crate::flight_point::FlightPoint;
use crate::sequence::FlightPart;
use crate::trajectory::Trajectory;

/// A simple route: any number of climb phases, one cruise segment, any
/// number of descent phases, computed in that order.
///
/// The cruise segment's reference climb configuration is re-derived from
/// the deepest last leaf of the last climb phase on every computation,
/// never cached, since climb phases may be reshaped between solves. The
/// mutation point is the explicit [`Route::resolve_cruise_reference`] call.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    climb_phases: Vec<FlightPart>,
    cruise_segment: CruiseSegment,
    descent_phases: Vec<FlightPart>,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        climb_phases: Vec<FlightPart>,
        cruise_segment: CruiseSegment,
        descent_phases: Vec<FlightPart>,
    ) -> Self {
        Self {
            name: name.into(),
            climb_phases,
            cruise_segment,
            descent_phases,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ground distance to be covered during cruise (m). Proxies the cruise
    /// segment's target; no other state is touched.
    pub fn cruise_distance(&self) -> f64 {
        self.cruise_segment.target_ground_distance()
    }

    /// Set the cruise ground distance in place. This is the control
    /// variable the distance-matching solver adjusts between evaluations.
    pub fn set_cruise_distance(&mut self, distance: f64) {
        self.cruise_segment.set_target_ground_distance(distance);
    }

    pub fn cruise_segment(&self) -> &CruiseSegment {
        &self.cruise_segment
    }

    pub fn climb_phases(&self) -> &[FlightPart] {
        &self.climb_phases
    }

    pub fn descent_phases(&self) -> &[FlightPart] {
        &self.descent_phases
    }

    /// Re-derive the cruise segment's climb reference from the deepest last
    /// leaf of the last climb phase, walking into nested sequences.
    ///
    /// Fails with a configuration error when there is no climb phase, when
    /// the last climb phase is an empty sequence, or when its deepest leaf
    /// is not a climb segment.
    pub fn resolve_cruise_reference(&mut self) -> Result<(), FlightError> {
        let last_phase = self.climb_phases.last().ok_or_else(|| {
            FlightError::InvalidComposition {
                reason: format!("route `{}` has no climb phase", self.name),
            }
        })?;
        let leaf = last_phase
            .last_leaf()
            .ok_or_else(|| FlightError::InvalidComposition {
                reason: format!(
                    "last climb phase `{}` of route `{}` is an empty sequence",
                    last_phase.name(),
                    self.name
                ),
            })?;
        match leaf {
            FlightPart::Climb(climb) => {
                self.cruise_segment.set_climb_reference(climb.reference());
                Ok(())
            }
            other => Err(FlightError::InvalidComposition {
                reason: format!(
                    "last climb leaf `{}` of route `{}` is not a climb segment",
                    other.name(),
                    self.name
                ),
            }),
        }
    }

    /// Compute the whole route: resolve the cruise-climb linkage, then
    /// chain climb phases, cruise, and descent phases into one trajectory.
    pub fn compute_from(&mut self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        self.resolve_cruise_reference()?;

        let mut trajectory = Trajectory::new();
        let mut current_start = start.clone();

        for part in self
            .climb_phases
            .iter()
            .chain(std::iter::once(&FlightPart::Cruise(
                self.cruise_segment.clone(),
            )))
            .chain(self.descent_phases.iter())
        {
            let child = part.compute_from(&current_start)?;
            current_start = child
                .last()
                .expect("a flight part always yields at least one point")
                .clone();
            trajectory.extend(child);
        }
        Ok(trajectory)
    }
}
