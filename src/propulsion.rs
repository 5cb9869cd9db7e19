//! Propulsion sub-model seam.
//!
//! Segments ask the engine model for thrust and specific fuel consumption
//! at an operating point, either by imposing a throttle setting (climb,
//! descent) or by imposing the thrust itself (level cruise, where thrust
//! balances drag).

use std::sync::Arc;

use crate::atmosphere::Atmosphere;
use crate::constants::SEA_LEVEL_DENSITY;
use crate::flight_point::EngineSetting;

/// How a segment drives the engine at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrustRequest {
    /// Impose a throttle setting in [0, 1]; the model returns the thrust.
    Rate(f64),
    /// Impose the thrust in Newtons; the model returns the matching rate.
    Thrust(f64),
}

/// Engine state at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    /// Delivered thrust (N)
    pub thrust: f64,
    /// Throttle setting (dimensionless, 0..=1)
    pub thrust_rate: f64,
    /// Specific fuel consumption (kg/N/s)
    pub sfc: f64,
}

/// Engine performance model supplied by the caller.
pub trait Propulsion: Send + Sync + std::fmt::Debug {
    /// Engine state at the given Mach, altitude and regime.
    fn compute(
        &self,
        mach: f64,
        altitude_m: f64,
        setting: EngineSetting,
        request: ThrustRequest,
    ) -> EngineState;
}

/// Shared handle to a propulsion model; segments clone it freely.
pub type PropulsionRef = Arc<dyn Propulsion>;

/// Simple turbofan-style model: maximum thrust lapses with the density
/// ratio, specific fuel consumption scales with the engine regime. Good
/// enough for mission-level performance studies and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTurbofan {
    /// All-engine static thrust at sea level (N)
    pub max_thrust: f64,
    /// Cruise specific fuel consumption at altitude (kg/N/s)
    pub cruise_sfc: f64,
    /// Exponent of the density-ratio thrust lapse
    pub lapse_exponent: f64,
}

impl SimpleTurbofan {
    pub fn new(max_thrust: f64, cruise_sfc: f64) -> Self {
        Self {
            max_thrust,
            cruise_sfc,
            lapse_exponent: 0.85,
        }
    }

    fn available_thrust(&self, altitude_m: f64) -> f64 {
        let density_ratio = Atmosphere::new(altitude_m).density() / SEA_LEVEL_DENSITY;
        self.max_thrust * density_ratio.powf(self.lapse_exponent)
    }

    fn sfc_for(&self, setting: EngineSetting) -> f64 {
        let factor = match setting {
            EngineSetting::Takeoff => 0.85,
            EngineSetting::Climb => 1.05,
            EngineSetting::Cruise => 1.0,
            EngineSetting::Idle => 1.5,
        };
        self.cruise_sfc * factor
    }
}

impl Propulsion for SimpleTurbofan {
    fn compute(
        &self,
        _mach: f64,
        altitude_m: f64,
        setting: EngineSetting,
        request: ThrustRequest,
    ) -> EngineState {
        let available = self.available_thrust(altitude_m);
        let (thrust, thrust_rate) = match request {
            ThrustRequest::Rate(rate) => {
                let rate = rate.clamp(0.0, 1.0);
                (available * rate, rate)
            }
            ThrustRequest::Thrust(thrust) => {
                let thrust = thrust.max(0.0);
                (thrust, (thrust / available).clamp(0.0, 1.0))
            }
        };
        EngineState {
            thrust,
            thrust_rate,
            sfc: self.sfc_for(setting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> SimpleTurbofan {
        SimpleTurbofan::new(240_000.0, 1.7e-5)
    }

    #[test]
    fn sea_level_static_thrust() {
        let state = engine().compute(0.0, 0.0, EngineSetting::Takeoff, ThrustRequest::Rate(1.0));
        assert_relative_eq!(state.thrust, 240_000.0, epsilon = 1.0);
        assert_relative_eq!(state.thrust_rate, 1.0);
    }

    #[test]
    fn thrust_lapses_with_altitude() {
        let low = engine().compute(0.6, 0.0, EngineSetting::Climb, ThrustRequest::Rate(0.9));
        let high = engine().compute(0.6, 10_000.0, EngineSetting::Climb, ThrustRequest::Rate(0.9));
        assert!(high.thrust < low.thrust);
        assert!(high.thrust > 0.0);
    }

    #[test]
    fn imposed_thrust_returns_matching_rate() {
        let state = engine().compute(
            0.78,
            10_000.0,
            EngineSetting::Cruise,
            ThrustRequest::Thrust(40_000.0),
        );
        assert_relative_eq!(state.thrust, 40_000.0);
        assert!(state.thrust_rate > 0.0 && state.thrust_rate <= 1.0);
    }

    #[test]
    fn idle_burns_worse_than_cruise() {
        let cruise = engine().compute(0.5, 5_000.0, EngineSetting::Cruise, ThrustRequest::Rate(0.5));
        let idle = engine().compute(0.5, 5_000.0, EngineSetting::Idle, ThrustRequest::Rate(0.1));
        assert!(idle.sfc > cruise.sfc);
    }
}
