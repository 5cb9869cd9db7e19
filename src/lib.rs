//! # Flightpath
//!
//! Mission/route flight performance simulation engine: quasi-steady
//! point-mass integration of climb, cruise and descent segments, composable
//! into routes, with a distance-matching solver that sizes the cruise to hit
//! a total mission range.

// Re-export the main types and functions
pub use atmosphere::Atmosphere;
pub use climb::ClimbSegment;
pub use cruise::{ClimbReference, CruiseSegment};
pub use descent::DescentSegment;
pub use errors::FlightError;
pub use flight_point::{EngineSetting, ExtraFields, FieldValue, FlightPoint};
pub use polar::Polar;
pub use propulsion::{EngineState, Propulsion, PropulsionRef, SimpleTurbofan, ThrustRequest};
pub use ranged_route::RangedRoute;
pub use route::Route;
pub use segment::AircraftModel;
pub use sequence::{FlightPart, FlightSequence};
pub use trajectory::Trajectory;

// Module declarations
mod atmosphere;
mod climb;
pub mod constants;
mod cruise;
mod descent;
mod errors;
mod flight_point;
mod polar;
mod propulsion;
mod ranged_route;
mod route;
mod segment;
mod sequence;
mod trajectory;
