//! Structure for managing flight point data.
//!
//! A [`FlightPoint`] is one timestamped snapshot of aircraft state. The set
//! of declared fields is closed: construction from a name/value mapping
//! rejects anything outside [`FlightPoint::LABELS`], and every declared
//! field left unspecified stays explicitly unset (`None`), never a silent
//! zero. After construction, dict-style writes through [`FlightPoint::set`]
//! are unvalidated; undeclared keys land in an extra side-map and are never
//! promoted to typed access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::FlightError;

/// Enumerated engine regime tag carried by flight points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineSetting {
    Takeoff,
    Climb,
    Cruise,
    Idle,
}

/// Value accepted by the mapping constructor. Most fields are numeric;
/// `engine_setting` and `name` carry their own types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Setting(EngineSetting),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<EngineSetting> for FieldValue {
    fn from(value: EngineSetting) -> Self {
        FieldValue::Setting(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Side-map for undeclared keys written through [`FlightPoint::set`].
///
/// Opaque outside this module: entries are only written through `set` and
/// read through `get`, so undeclared keys are never promoted to typed
/// access. The type is public only so `FlightPoint` stays constructible
/// with functional-update syntax.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraFields(BTreeMap<String, f64>);

impl ExtraFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One snapshot of aircraft kinematic/mass/aerodynamic state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPoint {
    /// Time since start of the trajectory (s)
    pub time: Option<f64>,
    /// Altitude (m)
    pub altitude: Option<f64>,
    /// Covered ground distance (m)
    pub ground_distance: Option<f64>,
    /// Aircraft mass (kg)
    pub mass: Option<f64>,
    /// True airspeed (m/s)
    pub true_airspeed: Option<f64>,
    /// Equivalent airspeed (m/s)
    pub equivalent_airspeed: Option<f64>,
    /// Mach number
    pub mach: Option<f64>,
    /// Engine regime
    pub engine_setting: Option<EngineSetting>,
    /// Lift coefficient
    #[serde(rename = "CL")]
    pub cl: Option<f64>,
    /// Drag coefficient
    #[serde(rename = "CD")]
    pub cd: Option<f64>,
    /// Drag (N)
    pub drag: Option<f64>,
    /// Thrust (N)
    pub thrust: Option<f64>,
    /// Thrust rate (dimensionless, 0..=1)
    pub thrust_rate: Option<f64>,
    /// Specific fuel consumption (kg/N/s)
    pub sfc: Option<f64>,
    /// Slope angle of the flight path (rad)
    pub slope_angle: Option<f64>,
    /// Acceleration along the flight path (m/s²)
    pub acceleration: Option<f64>,
    /// Label of the flight part that produced this point
    pub name: Option<String>,
    /// Unvalidated side-map for undeclared keys written through `set`.
    /// Never serialized as declared columns, never readable as typed fields.
    #[serde(default, skip_serializing_if = "ExtraFields::is_empty")]
    pub extra: ExtraFields,
}

impl FlightPoint {
    /// Declared field labels. The mapping constructor accepts only these.
    pub const LABELS: [&'static str; 17] = [
        "time",
        "altitude",
        "ground_distance",
        "mass",
        "true_airspeed",
        "equivalent_airspeed",
        "mach",
        "engine_setting",
        "CL",
        "CD",
        "drag",
        "thrust",
        "thrust_rate",
        "sfc",
        "slope_angle",
        "acceleration",
        "name",
    ];

    /// A flight point with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a flight point from a name/value mapping.
    ///
    /// Any key outside [`FlightPoint::LABELS`] is rejected, as is a value of
    /// the wrong type for its field (e.g. a number for `name`).
    pub fn from_fields<K, V, I>(fields: I) -> Result<Self, FlightError>
    where
        K: AsRef<str>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut point = Self::new();
        for (key, value) in fields {
            point.set_declared(key.as_ref(), value.into())?;
        }
        Ok(point)
    }

    fn set_declared(&mut self, key: &str, value: FieldValue) -> Result<(), FlightError> {
        let slot = match key {
            "time" => &mut self.time,
            "altitude" => &mut self.altitude,
            "ground_distance" => &mut self.ground_distance,
            "mass" => &mut self.mass,
            "true_airspeed" => &mut self.true_airspeed,
            "equivalent_airspeed" => &mut self.equivalent_airspeed,
            "mach" => &mut self.mach,
            "CL" => &mut self.cl,
            "CD" => &mut self.cd,
            "drag" => &mut self.drag,
            "thrust" => &mut self.thrust,
            "thrust_rate" => &mut self.thrust_rate,
            "sfc" => &mut self.sfc,
            "slope_angle" => &mut self.slope_angle,
            "acceleration" => &mut self.acceleration,
            "engine_setting" => {
                return match value {
                    FieldValue::Setting(setting) => {
                        self.engine_setting = Some(setting);
                        Ok(())
                    }
                    _ => Err(FlightError::UnknownField {
                        field: "engine_setting (non-setting value)".to_string(),
                    }),
                };
            }
            "name" => {
                return match value {
                    FieldValue::Text(text) => {
                        self.name = Some(text);
                        Ok(())
                    }
                    _ => Err(FlightError::UnknownField {
                        field: "name (non-text value)".to_string(),
                    }),
                };
            }
            other => {
                return Err(FlightError::UnknownField {
                    field: other.to_string(),
                });
            }
        };
        match value {
            FieldValue::Number(number) => {
                *slot = Some(number);
                Ok(())
            }
            _ => Err(FlightError::UnknownField {
                field: format!("{key} (non-numeric value)"),
            }),
        }
    }

    /// Dict-style numeric write. Declared numeric keys update the typed
    /// field; any other key goes to the extra side-map without validation.
    pub fn set(&mut self, key: &str, value: f64) {
        if Self::LABELS.contains(&key) && key != "engine_setting" && key != "name" {
            // Declared numeric field; cannot fail.
            let _ = self.set_declared(key, FieldValue::Number(value));
        } else {
            self.extra.0.insert(key.to_string(), value);
        }
    }

    /// Dict-style numeric read. Declared numeric keys read the typed field;
    /// undeclared keys read the extra side-map.
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "time" => self.time,
            "altitude" => self.altitude,
            "ground_distance" => self.ground_distance,
            "mass" => self.mass,
            "true_airspeed" => self.true_airspeed,
            "equivalent_airspeed" => self.equivalent_airspeed,
            "mach" => self.mach,
            "CL" => self.cl,
            "CD" => self.cd,
            "drag" => self.drag,
            "thrust" => self.thrust,
            "thrust_rate" => self.thrust_rate,
            "sfc" => self.sfc,
            "slope_angle" => self.slope_angle,
            "acceleration" => self.acceleration,
            _ => self.extra.0.get(key).copied(),
        }
    }

    /// Read a required numeric field, failing with a configuration error
    /// naming the flight part that needed it.
    pub(crate) fn require(&self, field: &'static str, part: &str) -> Result<f64, FlightError> {
        self.get(field).ok_or_else(|| FlightError::MissingField {
            field,
            part: part.to_string(),
        })
    }
}
