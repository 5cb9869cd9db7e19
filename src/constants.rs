/// Physical constants used in flight performance calculations

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Specific gas constant for dry air (J/(kg·K))
pub const R_AIR: f64 = 287.0531;

/// Heat capacity ratio for air
pub const GAMMA_AIR: f64 = 1.4;

/// Air density at sea level, ICAO Standard Atmosphere (kg/m³)
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Temperature at sea level, ICAO Standard Atmosphere (K)
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;

/// Pressure at sea level, ICAO Standard Atmosphere (Pa)
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Speed of sound at sea level, standard atmospheric conditions
///
/// Value: 340.29 m/s at 15°C, 1013.25 hPa, dry air.
/// Source: International Standard Atmosphere (ISO 2533)
pub const SEA_LEVEL_SPEED_OF_SOUND: f64 = 340.29;

// Numerical stability constants

/// General numerical tolerance for floating point comparisons
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Minimum climb rate (m/s) under which a climb is considered stalled
/// against its service ceiling
pub const MIN_CLIMB_RATE: f64 = 0.1;

/// Minimum descent rate (m/s) under which a descent will not terminate
pub const MIN_DESCENT_RATE: f64 = 0.1;

/// Hard cap on integration steps for a single segment; hitting it means the
/// termination condition is unreachable
pub const MAX_SEGMENT_STEPS: usize = 100_000;

/// Default time step for climb/descent integration (s)
pub const DEFAULT_CLIMB_TIME_STEP: f64 = 2.0;

/// Default time step for cruise integration (s)
pub const DEFAULT_CRUISE_TIME_STEP: f64 = 60.0;

/// Default tolerance on the distance-matching residual (m)
pub const DEFAULT_DISTANCE_ACCURACY: f64 = 500.0;

/// Iteration budget for the distance-matching secant solver
pub const DISTANCE_SOLVER_MAX_ITER: usize = 50;
