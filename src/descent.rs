//! Descent segment: constant-EAS idle descent to a target altitude.

use crate::constants::{
    DEFAULT_CLIMB_TIME_STEP, G_ACCEL_MPS2, MAX_SEGMENT_STEPS, MIN_DESCENT_RATE,
    NUMERICAL_TOLERANCE,
};
use crate::errors::FlightError;
use crate::flight_point::{EngineSetting, FlightPoint};
use crate::propulsion::ThrustRequest;
use crate::segment::{engine_state, make_point, AircraftModel, SpeedCommand};
use crate::trajectory::Trajectory;

/// Descend at constant equivalent airspeed and idle thrust until the target
/// altitude is reached.
///
/// Same quasi-steady slope relation as the climb, with a negative
/// thrust/drag balance. The final step is shortened so the last point lands
/// exactly on the target altitude.
#[derive(Debug, Clone)]
pub struct DescentSegment {
    name: String,
    aircraft: AircraftModel,
    target_altitude: f64,
    equivalent_airspeed: f64,
    thrust_rate: f64,
    time_step: f64,
}

impl DescentSegment {
    /// Idle descent thrust setting used when none is provided.
    pub const DEFAULT_THRUST_RATE: f64 = 0.07;

    pub fn new(
        name: impl Into<String>,
        aircraft: AircraftModel,
        target_altitude: f64,
        equivalent_airspeed: f64,
    ) -> Self {
        Self {
            name: name.into(),
            aircraft,
            target_altitude,
            equivalent_airspeed,
            thrust_rate: Self::DEFAULT_THRUST_RATE,
            time_step: DEFAULT_CLIMB_TIME_STEP,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_altitude(&self) -> f64 {
        self.target_altitude
    }

    pub fn set_thrust_rate(&mut self, thrust_rate: f64) {
        self.thrust_rate = thrust_rate.clamp(0.0, 1.0);
    }

    pub fn set_time_step(&mut self, time_step: f64) {
        self.time_step = time_step;
    }

    pub fn compute_from(&self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        let mut altitude = start.require("altitude", &self.name)?;
        let mut mass = start.require("mass", &self.name)?;
        let mut ground_distance = start.require("ground_distance", &self.name)?;
        let mut time = start.time.unwrap_or(0.0);

        if self.target_altitude > altitude + NUMERICAL_TOLERANCE {
            return Err(FlightError::computation(
                &self.name,
                format!(
                    "target altitude {:.0} m is above start altitude {altitude:.0} m",
                    self.target_altitude
                ),
                start,
            ));
        }

        let mut trajectory = Trajectory::new();
        for _ in 0..MAX_SEGMENT_STEPS {
            let op = self.aircraft.operating_point(
                altitude,
                SpeedCommand::Eas(self.equivalent_airspeed),
                mass,
                &self.name,
                trajectory.last().unwrap_or(start),
            )?;
            let engine = engine_state(
                &self.aircraft,
                &op,
                EngineSetting::Idle,
                ThrustRequest::Rate(self.thrust_rate),
            );

            let sin_gamma = ((engine.thrust - op.drag) / (mass * G_ACCEL_MPS2)).clamp(-1.0, 1.0);
            let slope_angle = sin_gamma.asin();
            let descent_rate = -op.true_airspeed * sin_gamma;

            trajectory.push(make_point(
                &self.name,
                EngineSetting::Idle,
                time,
                ground_distance,
                mass,
                &op,
                &engine,
                slope_angle,
            ));

            if altitude <= self.target_altitude + NUMERICAL_TOLERANCE {
                return Ok(trajectory);
            }

            if descent_rate < MIN_DESCENT_RATE {
                return Err(FlightError::computation(
                    &self.name,
                    format!(
                        "descent rate {descent_rate:.2} m/s at {altitude:.0} m is below the \
                         {MIN_DESCENT_RATE} m/s floor; aircraft will not descend"
                    ),
                    trajectory.last().expect("at least one point pushed"),
                ));
            }

            // Shorten the last step so the final point lands on the target.
            let remaining = altitude - self.target_altitude;
            let dt;
            if descent_rate * self.time_step >= remaining {
                dt = remaining / descent_rate;
                altitude = self.target_altitude;
            } else {
                dt = self.time_step;
                altitude -= descent_rate * dt;
            }
            ground_distance += op.true_airspeed * slope_angle.cos() * dt;
            mass -= engine.sfc * engine.thrust * dt;
            time += dt;

            if mass <= 0.0 {
                return Err(FlightError::computation(
                    &self.name,
                    "fuel exhausted during descent",
                    trajectory.last().expect("at least one point pushed"),
                ));
            }
        }

        Err(FlightError::computation(
            &self.name,
            format!("step limit {MAX_SEGMENT_STEPS} exceeded before reaching target altitude"),
            trajectory.last().unwrap_or(start),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::test_support::test_aircraft;
    use approx::assert_relative_eq;

    fn descent_start() -> FlightPoint {
        FlightPoint {
            time: Some(10_000.0),
            altitude: Some(10_000.0),
            ground_distance: Some(2_000_000.0),
            mass: Some(62_000.0),
            ..FlightPoint::new()
        }
    }

    fn descend_to(target: f64) -> DescentSegment {
        DescentSegment::new("descent", test_aircraft(), target, 150.0)
    }

    #[test]
    fn reaches_target_altitude_exactly() {
        let trajectory = descend_to(0.0).compute_from(&descent_start()).unwrap();
        assert!(trajectory.len() > 2);
        assert_relative_eq!(
            trajectory.last().unwrap().altitude.unwrap(),
            0.0,
            epsilon = 1e-6
        );
        // Altitude decreases monotonically, ground distance still grows.
        for pair in trajectory.windows(2) {
            assert!(pair[1].altitude.unwrap() < pair[0].altitude.unwrap());
            assert!(pair[1].ground_distance.unwrap() > pair[0].ground_distance.unwrap());
        }
    }

    #[test]
    fn descent_slope_is_negative() {
        let trajectory = descend_to(2_000.0).compute_from(&descent_start()).unwrap();
        for point in trajectory.iter() {
            assert!(point.slope_angle.unwrap() < 0.0);
        }
    }

    #[test]
    fn zero_duration_descent_yields_single_start_point() {
        let trajectory = descend_to(10_000.0)
            .compute_from(&descent_start())
            .unwrap();
        assert_eq!(trajectory.len(), 1);
    }

    #[test]
    fn target_above_start_is_a_computation_error() {
        let result = descend_to(12_000.0).compute_from(&descent_start());
        assert!(matches!(
            result,
            Err(FlightError::Computation { phase, .. }) if phase == "descent"
        ));
    }

    #[test]
    fn full_thrust_will_not_descend() {
        let mut segment = descend_to(0.0);
        segment.set_thrust_rate(1.0);
        let result = segment.compute_from(&descent_start());
        assert!(matches!(result, Err(FlightError::Computation { .. })));
    }
}
