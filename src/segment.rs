//! Shared machinery for flight segments.
//!
//! Each concrete segment integrates a quasi-steady point-mass model: at
//! every step the aircraft is assumed in equilibrium normal to its path, so
//! lift balances weight, drag follows from the polar, and the flight path
//! slope follows from the thrust/drag balance. The helpers here evaluate
//! that operating point and assemble fully annotated flight points.
//!
//! Clamp policy, per segment quantity:
//! - thrust rate is clamped to [0, 1] by the propulsion model;
//! - CL is never clamped: a lookup outside the polar table aborts the
//!   segment with a computation error;
//! - mass must stay positive: fuel exhaustion aborts the segment;
//! - the flight path slope sine is clamped to [-1, 1] before `asin`.

use std::sync::Arc;

use crate::atmosphere::Atmosphere;
use crate::constants::G_ACCEL_MPS2;
use crate::errors::FlightError;
use crate::flight_point::{EngineSetting, FlightPoint};
use crate::polar::Polar;
use crate::propulsion::{EngineState, Propulsion, ThrustRequest};

/// Aircraft definition shared by every segment of a mission: reference
/// geometry plus the injected aerodynamic and propulsion sub-models.
#[derive(Debug, Clone)]
pub struct AircraftModel {
    /// Reference wing area (m²)
    pub reference_area: f64,
    /// Drag polar
    pub polar: Polar,
    /// Engine model
    pub propulsion: Arc<dyn Propulsion>,
}

impl AircraftModel {
    pub fn new(reference_area: f64, polar: Polar, propulsion: Arc<dyn Propulsion>) -> Self {
        Self {
            reference_area,
            polar,
            propulsion,
        }
    }
}

/// Speed command for one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SpeedCommand {
    /// Constant equivalent airspeed (m/s)
    Eas(f64),
    /// Constant true airspeed (m/s)
    Tas(f64),
}

/// Quasi-steady aerodynamic state at one instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OperatingPoint {
    pub altitude: f64,
    pub true_airspeed: f64,
    pub equivalent_airspeed: f64,
    pub mach: f64,
    pub cl: f64,
    pub cd: f64,
    pub drag: f64,
}

impl AircraftModel {
    /// Evaluate the lift-equals-weight operating point at the given
    /// altitude, commanded speed and mass. A CL outside the polar table is
    /// a computation error for `phase`, carrying `last_point`.
    pub(crate) fn operating_point(
        &self,
        altitude: f64,
        speed: SpeedCommand,
        mass: f64,
        phase: &str,
        last_point: &FlightPoint,
    ) -> Result<OperatingPoint, FlightError> {
        let atmosphere = Atmosphere::new(altitude);
        let (true_airspeed, equivalent_airspeed) = match speed {
            SpeedCommand::Eas(eas) => (atmosphere.true_airspeed(eas), eas),
            SpeedCommand::Tas(tas) => (tas, atmosphere.equivalent_airspeed(tas)),
        };
        let dynamic_pressure = atmosphere.dynamic_pressure(true_airspeed);
        let cl = mass * G_ACCEL_MPS2 / (dynamic_pressure * self.reference_area);
        let cd = self.polar.cd(cl).ok_or_else(|| {
            let (cl_min, cl_max) = self.polar.cl_range();
            FlightError::computation(
                phase,
                format!("CL {cl:.3} outside polar range [{cl_min:.3}, {cl_max:.3}]"),
                last_point,
            )
        })?;
        Ok(OperatingPoint {
            altitude,
            true_airspeed,
            equivalent_airspeed,
            mach: atmosphere.mach(true_airspeed),
            cl,
            cd,
            drag: dynamic_pressure * self.reference_area * cd,
        })
    }
}

/// Assemble a fully annotated flight point from the integration state and
/// the evaluated operating point.
#[allow(clippy::too_many_arguments)]
pub(crate) fn make_point(
    name: &str,
    setting: EngineSetting,
    time: f64,
    ground_distance: f64,
    mass: f64,
    op: &OperatingPoint,
    engine: &EngineState,
    slope_angle: f64,
) -> FlightPoint {
    FlightPoint {
        time: Some(time),
        altitude: Some(op.altitude),
        ground_distance: Some(ground_distance),
        mass: Some(mass),
        true_airspeed: Some(op.true_airspeed),
        equivalent_airspeed: Some(op.equivalent_airspeed),
        mach: Some(op.mach),
        engine_setting: Some(setting),
        cl: Some(op.cl),
        cd: Some(op.cd),
        drag: Some(op.drag),
        thrust: Some(engine.thrust),
        thrust_rate: Some(engine.thrust_rate),
        sfc: Some(engine.sfc),
        slope_angle: Some(slope_angle),
        // Quasi-steady model: no along-path acceleration term.
        acceleration: Some(0.0),
        name: Some(name.to_string()),
        ..FlightPoint::new()
    }
}

/// Drive the engine at one operating point.
pub(crate) fn engine_state(
    aircraft: &AircraftModel,
    op: &OperatingPoint,
    setting: EngineSetting,
    request: ThrustRequest,
) -> EngineState {
    aircraft
        .propulsion
        .compute(op.mach, op.altitude, setting, request)
}
