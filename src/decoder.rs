use crate::error::ExportError;
use std::fmt;

/// Marker the report api uses for a field that wasn't reported at a timestamp.
pub const MISSING_VALUE: &str = "null";

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    Runtime,
    Sensor,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Runtime => write!(f, "runtime"),
            Category::Sensor => write!(f, "sensor"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecodeRule {
    /// Categorical fields without a numeric representation.
    Drop,
    FahrenheitToCelsius,
    Percentage,
    Passthrough,
    Binary,
}

impl DecodeRule {
    pub fn for_key(category: Category, key: &str) -> Option<DecodeRule> {
        match category {
            Category::Runtime => runtime_rule(key),
            Category::Sensor => sensor_rule(key),
        }
    }

    pub fn apply(&self, key: &str, raw: &str) -> Result<Option<f64>, ExportError> {
        let value = match self {
            DecodeRule::Drop => return Ok(None),
            DecodeRule::FahrenheitToCelsius => (parse_float(key, raw)? - 32.0) * (5.0 / 9.0),
            DecodeRule::Percentage => parse_float(key, raw)? / 100.0,
            DecodeRule::Passthrough => parse_float(key, raw)?,
            DecodeRule::Binary => {
                if parse_int(key, raw)? == 1 {
                    1.0
                } else {
                    0.0
                }
            }
        };

        Ok(Some(value))
    }
}

// the report api is inconsistent about the casing of the hvac mode columns, so both spellings are registered
fn runtime_rule(key: &str) -> Option<DecodeRule> {
    use DecodeRule::{Binary, FahrenheitToCelsius, Passthrough, Percentage};

    let rule = match key {
        "zoneHVACmode" | "zoneHvacMode" => DecodeRule::Drop,
        "zoneCalendarEvent" => DecodeRule::Drop,
        "zoneCoolTemp" | "zoneHeatTemp" | "zoneAveTemp" => FahrenheitToCelsius,
        "zoneHumidity" | "zoneHumidityLow" | "zoneHumidityHigh" => Percentage,
        "zoneOccupancy" => Binary,
        "outdoorTemp" => FahrenheitToCelsius,
        "outdoorHumidity" => Percentage,
        "compCool1" | "compCool2" | "compHeat1" | "compHeat2" => Passthrough,
        "auxHeat1" | "auxHeat2" | "auxHeat3" => Passthrough,
        "fan" | "humidifier" | "dehumidifier" | "economizer" | "ventilator" => Passthrough,
        "HVACmode" | "hvacMode" => DecodeRule::Drop,
        "zoneClimate" => DecodeRule::Drop,
        "wind" | "sky" => Passthrough,
        _ => return None,
    };

    Some(rule)
}

fn sensor_rule(sensor_type: &str) -> Option<DecodeRule> {
    match sensor_type {
        "temperature" => Some(DecodeRule::FahrenheitToCelsius),
        "humidity" => Some(DecodeRule::Passthrough),
        "occupancy" => Some(DecodeRule::Binary),
        _ => None,
    }
}

/// Decodes a raw report value into its normalized numeric form; `None` means the reading is to be skipped.
pub fn decode(category: Category, key: &str, raw: &str) -> Result<Option<f64>, ExportError> {
    if raw == MISSING_VALUE {
        return Ok(None);
    }

    let rule = DecodeRule::for_key(category, key).ok_or_else(|| ExportError::UnknownField {
        category,
        key: key.to_string(),
    })?;

    rule.apply(key, raw)
}

fn parse_float(key: &str, raw: &str) -> Result<f64, ExportError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| malformed_value(key, raw))
}

fn parse_int(key: &str, raw: &str) -> Result<i64, ExportError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| malformed_value(key, raw))
}

fn malformed_value(key: &str, raw: &str) -> ExportError {
    ExportError::MalformedValue {
        key: key.to_string(),
        raw: raw.to_string(),
    }
}
