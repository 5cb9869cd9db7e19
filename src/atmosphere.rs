//! ICAO Standard Atmosphere and airspeed conversions.
//!
//! Segments evaluate their operating point against this model: density and
//! speed of sound at altitude, plus the equivalent/true airspeed and Mach
//! conversions that tie the commanded speed law to the local conditions.

use crate::constants::{
    GAMMA_AIR, G_ACCEL_MPS2, R_AIR, SEA_LEVEL_DENSITY, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE,
};

/// ICAO Standard Atmosphere layer definition
#[derive(Debug, Clone)]
struct AtmosphereLayer {
    /// Base altitude of this layer (m)
    base_altitude: f64,
    /// Temperature at layer base (K)
    base_temperature: f64,
    /// Pressure at layer base (Pa)
    base_pressure: f64,
    /// Temperature lapse rate (K/m)
    lapse_rate: f64,
}

/// ICAO Standard Atmosphere layers covering the altitudes a transport
/// aircraft mission can reach. Base pressures follow the barometric formula
/// between layers.
const ICAO_LAYERS: &[AtmosphereLayer] = &[
    // Troposphere (0 - 11 km)
    AtmosphereLayer {
        base_altitude: 0.0,
        base_temperature: SEA_LEVEL_TEMPERATURE,
        base_pressure: SEA_LEVEL_PRESSURE,
        lapse_rate: -0.0065,
    },
    // Tropopause (11 - 20 km), isothermal
    AtmosphereLayer {
        base_altitude: 11_000.0,
        base_temperature: 216.65,
        base_pressure: 22_632.1,
        lapse_rate: 0.0,
    },
    // Lower stratosphere (20 - 32 km)
    AtmosphereLayer {
        base_altitude: 20_000.0,
        base_temperature: 216.65,
        base_pressure: 5_474.89,
        lapse_rate: 0.001,
    },
];

/// Upper bound of the modelled altitude range (m)
const MAX_MODEL_ALTITUDE: f64 = 32_000.0;

/// Standard atmosphere conditions at one altitude.
///
/// Constructing an instance evaluates the layered ICAO model once; the
/// airspeed conversion methods then operate on the stored state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    altitude: f64,
    temperature: f64,
    pressure: f64,
    density: f64,
    speed_of_sound: f64,
}

impl Atmosphere {
    /// Evaluate standard conditions at `altitude_m`. Altitudes are clamped
    /// to the modelled range [0, 32 km].
    pub fn new(altitude_m: f64) -> Self {
        let altitude = altitude_m.clamp(0.0, MAX_MODEL_ALTITUDE);

        let layer = ICAO_LAYERS
            .iter()
            .rev()
            .find(|layer| altitude >= layer.base_altitude)
            .unwrap_or(&ICAO_LAYERS[0]);

        let height_diff = altitude - layer.base_altitude;
        let temperature = layer.base_temperature + layer.lapse_rate * height_diff;

        let pressure = if layer.lapse_rate.abs() < 1e-10 {
            // Isothermal layer
            layer.base_pressure
                * (-G_ACCEL_MPS2 * height_diff / (R_AIR * layer.base_temperature)).exp()
        } else {
            let temp_ratio = temperature / layer.base_temperature;
            layer.base_pressure * temp_ratio.powf(-G_ACCEL_MPS2 / (layer.lapse_rate * R_AIR))
        };

        let density = pressure / (R_AIR * temperature);
        let speed_of_sound = (GAMMA_AIR * R_AIR * temperature).sqrt();

        Self {
            altitude,
            temperature,
            pressure,
            density,
            speed_of_sound,
        }
    }

    /// Altitude the conditions were evaluated at (m)
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Static temperature (K)
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Static pressure (Pa)
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Air density (kg/m³)
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Speed of sound (m/s)
    pub fn speed_of_sound(&self) -> f64 {
        self.speed_of_sound
    }

    /// Convert equivalent airspeed to true airspeed at these conditions.
    pub fn true_airspeed(&self, equivalent_airspeed: f64) -> f64 {
        equivalent_airspeed * (SEA_LEVEL_DENSITY / self.density).sqrt()
    }

    /// Convert true airspeed to equivalent airspeed at these conditions.
    pub fn equivalent_airspeed(&self, true_airspeed: f64) -> f64 {
        true_airspeed * (self.density / SEA_LEVEL_DENSITY).sqrt()
    }

    /// Mach number for a given true airspeed.
    pub fn mach(&self, true_airspeed: f64) -> f64 {
        true_airspeed / self.speed_of_sound
    }

    /// Dynamic pressure q = ½ρV² for a given true airspeed (Pa).
    pub fn dynamic_pressure(&self, true_airspeed: f64) -> f64 {
        0.5 * self.density * true_airspeed * true_airspeed
    }
}
