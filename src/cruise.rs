//! Cruise segment: level flight over a target ground distance.

use crate::constants::{DEFAULT_CRUISE_TIME_STEP, MAX_SEGMENT_STEPS, NUMERICAL_TOLERANCE};
use crate::errors::FlightError;
use crate::flight_point::{EngineSetting, FlightPoint};
use crate::propulsion::ThrustRequest;
use crate::segment::{engine_state, make_point, AircraftModel, SpeedCommand};
use crate::trajectory::Trajectory;

/// Terminal configuration of the climb phase preceding the cruise.
///
/// The owning route re-derives this from the deepest last climb leaf before
/// every computation; it is never captured at construction time, since climb
/// phases may be reshaped between solves.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimbReference {
    /// Name of the climb part the reference was taken from
    pub name: String,
    /// Commanded equivalent airspeed of that climb (m/s)
    pub equivalent_airspeed: f64,
    /// Engine regime of that climb
    pub engine_setting: EngineSetting,
    /// Thrust setting of that climb
    pub thrust_rate: f64,
}

/// Cruise at constant altitude until a target ground distance is covered.
///
/// Thrust balances drag at every step; speed holds the true airspeed the
/// aircraft reached at end of climb. When the start point carries no
/// airspeed, the initial cruise speed is derived from the injected
/// [`ClimbReference`]'s speed law at the cruise altitude.
#[derive(Debug, Clone)]
pub struct CruiseSegment {
    name: String,
    aircraft: AircraftModel,
    target_ground_distance: f64,
    time_step: f64,
    climb_reference: Option<ClimbReference>,
}

impl CruiseSegment {
    pub fn new(
        name: impl Into<String>,
        aircraft: AircraftModel,
        target_ground_distance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            aircraft,
            target_ground_distance,
            time_step: DEFAULT_CRUISE_TIME_STEP,
            climb_reference: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ground distance this cruise is set to cover (m). This is the control
    /// variable of the distance-matching solver.
    pub fn target_ground_distance(&self) -> f64 {
        self.target_ground_distance
    }

    pub fn set_target_ground_distance(&mut self, distance: f64) {
        self.target_ground_distance = distance;
    }

    pub fn set_time_step(&mut self, time_step: f64) {
        self.time_step = time_step;
    }

    pub fn climb_reference(&self) -> Option<&ClimbReference> {
        self.climb_reference.as_ref()
    }

    /// Inject the reference climb configuration. Called by the owning route
    /// on every computation, before integration starts.
    pub fn set_climb_reference(&mut self, reference: ClimbReference) {
        self.climb_reference = Some(reference);
    }

    pub fn compute_from(&self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        let altitude = start.require("altitude", &self.name)?;
        let mut mass = start.require("mass", &self.name)?;
        let mut ground_distance = start.require("ground_distance", &self.name)?;
        let mut time = start.time.unwrap_or(0.0);

        // Initial conditions: end-of-climb speed, or the reference climb's
        // speed law evaluated at cruise altitude.
        let true_airspeed = match (start.true_airspeed, &self.climb_reference) {
            (Some(tas), _) => tas,
            (None, Some(reference)) => crate::atmosphere::Atmosphere::new(altitude)
                .true_airspeed(reference.equivalent_airspeed),
            (None, None) => {
                return Err(FlightError::MissingField {
                    field: "true_airspeed",
                    part: self.name.clone(),
                })
            }
        };

        let start_distance = ground_distance;
        let target = self.target_ground_distance.max(0.0);

        let mut trajectory = Trajectory::new();
        for _ in 0..MAX_SEGMENT_STEPS {
            let op = self.aircraft.operating_point(
                altitude,
                SpeedCommand::Tas(true_airspeed),
                mass,
                &self.name,
                trajectory.last().unwrap_or(start),
            )?;
            // Level flight: thrust balances drag.
            let engine = engine_state(
                &self.aircraft,
                &op,
                EngineSetting::Cruise,
                ThrustRequest::Thrust(op.drag),
            );

            trajectory.push(make_point(
                &self.name,
                EngineSetting::Cruise,
                time,
                ground_distance,
                mass,
                &op,
                &engine,
                0.0,
            ));

            let covered = ground_distance - start_distance;
            if covered >= target - NUMERICAL_TOLERANCE {
                return Ok(trajectory);
            }

            // Shorten the last step so the final point lands on the target.
            let remaining = target - covered;
            let dt;
            if true_airspeed * self.time_step >= remaining {
                dt = remaining / true_airspeed;
                ground_distance = start_distance + target;
            } else {
                dt = self.time_step;
                ground_distance += true_airspeed * dt;
            }
            mass -= engine.sfc * engine.thrust * dt;
            time += dt;

            if mass <= 0.0 {
                return Err(FlightError::computation(
                    &self.name,
                    "fuel exhausted during cruise",
                    trajectory.last().expect("at least one point pushed"),
                ));
            }
        }

        Err(FlightError::computation(
            &self.name,
            format!("step limit {MAX_SEGMENT_STEPS} exceeded before covering target distance"),
            trajectory.last().unwrap_or(start),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::test_support::test_aircraft;
    use approx::assert_relative_eq;

    fn cruise_start() -> FlightPoint {
        FlightPoint {
            time: Some(900.0),
            altitude: Some(10_000.0),
            ground_distance: Some(150_000.0),
            mass: Some(67_000.0),
            true_airspeed: Some(230.0),
            ..FlightPoint::new()
        }
    }

    #[test]
    fn covers_target_distance_exactly() {
        let segment = CruiseSegment::new("cruise", test_aircraft(), 500_000.0);
        let trajectory = segment.compute_from(&cruise_start()).unwrap();
        assert_relative_eq!(
            trajectory.net_ground_distance().unwrap(),
            500_000.0,
            epsilon = 1e-6
        );
        // Level flight: altitude holds throughout.
        for point in trajectory.iter() {
            assert_eq!(point.altitude, Some(10_000.0));
        }
    }

    #[test]
    fn burns_fuel_while_cruising() {
        let segment = CruiseSegment::new("cruise", test_aircraft(), 800_000.0);
        let trajectory = segment.compute_from(&cruise_start()).unwrap();
        let first_mass = trajectory.first().unwrap().mass.unwrap();
        let last_mass = trajectory.last().unwrap().mass.unwrap();
        assert!(last_mass < first_mass);
        // A transport burns tonnes, not grams, over 800 km.
        assert!(first_mass - last_mass > 1_000.0);
    }

    #[test]
    fn zero_distance_target_yields_single_start_point() {
        let segment = CruiseSegment::new("cruise", test_aircraft(), 0.0);
        let trajectory = segment.compute_from(&cruise_start()).unwrap();
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.first().unwrap().ground_distance, Some(150_000.0));
    }

    #[test]
    fn speed_falls_back_to_climb_reference() {
        let mut segment = CruiseSegment::new("cruise", test_aircraft(), 100_000.0);
        segment.set_climb_reference(ClimbReference {
            name: "climb".to_string(),
            equivalent_airspeed: 150.0,
            engine_setting: EngineSetting::Climb,
            thrust_rate: 0.93,
        });
        let mut start = cruise_start();
        start.true_airspeed = None;

        let trajectory = segment.compute_from(&start).unwrap();
        let expected =
            crate::atmosphere::Atmosphere::new(10_000.0).true_airspeed(150.0);
        assert_relative_eq!(
            trajectory.first().unwrap().true_airspeed.unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn missing_speed_without_reference_is_a_configuration_error() {
        let segment = CruiseSegment::new("cruise", test_aircraft(), 100_000.0);
        let mut start = cruise_start();
        start.true_airspeed = None;
        let result = segment.compute_from(&start);
        assert!(matches!(
            result,
            Err(FlightError::MissingField { field: "true_airspeed", .. })
        ));
    }
}
