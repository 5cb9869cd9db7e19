//! Climb segment: constant-EAS climb to a target altitude.

use crate::constants::{
    DEFAULT_CLIMB_TIME_STEP, G_ACCEL_MPS2, MAX_SEGMENT_STEPS, MIN_CLIMB_RATE, NUMERICAL_TOLERANCE,
};
use crate::cruise::ClimbReference;
use crate::errors::FlightError;
use crate::flight_point::{EngineSetting, FlightPoint};
use crate::propulsion::ThrustRequest;
use crate::segment::{engine_state, make_point, AircraftModel, SpeedCommand};
use crate::trajectory::Trajectory;

/// Climb at constant equivalent airspeed and fixed climb thrust until the
/// target altitude is reached.
///
/// The flight path slope follows the quasi-steady balance
/// sin(γ) = (T − D) / (m·g); the final integration step is shortened so the
/// last point lands exactly on the target altitude.
#[derive(Debug, Clone)]
pub struct ClimbSegment {
    name: String,
    aircraft: AircraftModel,
    target_altitude: f64,
    equivalent_airspeed: f64,
    thrust_rate: f64,
    engine_setting: EngineSetting,
    time_step: f64,
}

impl ClimbSegment {
    /// Climb thrust setting used when none is provided.
    pub const DEFAULT_THRUST_RATE: f64 = 0.93;

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
            engine_setting: EngineSetting::Climb,
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

    /// Terminal configuration of this climb, injected into the cruise
    /// segment by the owning route before each computation.
    pub fn reference(&self) -> ClimbReference {
        ClimbReference {
            name: self.name.clone(),
            equivalent_airspeed: self.equivalent_airspeed,
            engine_setting: self.engine_setting,
            thrust_rate: self.thrust_rate,
        }
    }

    pub fn compute_from(&self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        let mut altitude = start.require("altitude", &self.name)?;
        let mut mass = start.require("mass", &self.name)?;
        let mut ground_distance = start.require("ground_distance", &self.name)?;
        let mut time = start.time.unwrap_or(0.0);

        if self.target_altitude < altitude - NUMERICAL_TOLERANCE {
            return Err(FlightError::computation(
                &self.name,
                format!(
                    "target altitude {:.0} m is below start altitude {altitude:.0} m",
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
                self.engine_setting,
                ThrustRequest::Rate(self.thrust_rate),
            );

            let sin_gamma = ((engine.thrust - op.drag) / (mass * G_ACCEL_MPS2)).clamp(-1.0, 1.0);
            let slope_angle = sin_gamma.asin();
            let climb_rate = op.true_airspeed * sin_gamma;

            trajectory.push(make_point(
                &self.name,
                self.engine_setting,
                time,
                ground_distance,
                mass,
                &op,
                &engine,
                slope_angle,
            ));

            if altitude >= self.target_altitude - NUMERICAL_TOLERANCE {
                return Ok(trajectory);
            }

            if climb_rate < MIN_CLIMB_RATE {
                return Err(FlightError::computation(
                    &self.name,
                    format!(
                        "climb rate {climb_rate:.2} m/s at {altitude:.0} m is below the \
                         {MIN_CLIMB_RATE} m/s floor; target altitude unreachable"
                    ),
                    trajectory.last().expect("at least one point pushed"),
                ));
            }

            // Shorten the last step so the final point lands on the target.
            let remaining = self.target_altitude - altitude;
            let dt;
            if climb_rate * self.time_step >= remaining {
                dt = remaining / climb_rate;
                altitude = self.target_altitude;
            } else {
                dt = self.time_step;
                altitude += climb_rate * dt;
            }
            ground_distance += op.true_airspeed * slope_angle.cos() * dt;
            mass -= engine.sfc * engine.thrust * dt;
            time += dt;

            if mass <= 0.0 {
                return Err(FlightError::computation(
                    &self.name,
                    "fuel exhausted during climb",
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
