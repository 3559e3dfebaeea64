use crate::config_client::SetDefaults;
use crate::error::ExportError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COLUMNS: &str = "zoneHvacMode,zoneCalendarEvent,zoneCoolTemp,zoneHeatTemp,zoneAveTemp,zoneHumidity,zoneHumidityLow,zoneHumidityHigh,zoneOccupancy,outdoorTemp,outdoorHumidity,wind,sky,compCool1,compCool2,compHeat1,compHeat2,auxHeat1,auxHeat2,auxHeat3,fan,humidifier,dehumidifier,economizer,ventilator,hvacMode,zoneClimate";
pub const DEFAULT_TIMEZONE: &str = "America/Toronto";
pub const DEFAULT_PREFIX: &str = "ecobee.thermostat";
pub const DEFAULT_WRITE_PATH: &str = "/write?db=graphite";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExporterConfig {
    /// Thermostat selection match, usually a serial number.
    pub selector: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub columns: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub sink: SinkConfig,
}

impl SetDefaults for ExporterConfig {
    fn set_defaults(&mut self) {
        if self.days <= 0 {
            self.days = 1;
        }
        if self.columns.is_empty() {
            self.columns = DEFAULT_COLUMNS.to_string();
        }
        if self.timezone.is_empty() {
            self.timezone = DEFAULT_TIMEZONE.to_string();
        }
        if self.prefix.is_empty() {
            self.prefix = DEFAULT_PREFIX.to_string();
        }
        if let SinkConfig::Influx(influx) = &mut self.sink {
            if influx.write_path.is_empty() {
                influx.write_path = DEFAULT_WRITE_PATH.to_string();
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum SinkConfig {
    Graphite(GraphiteSinkConfig),
    Influx(InfluxSinkConfig),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphiteSinkConfig {
    /// Pickle receiver, e.g. localhost:2004.
    pub address: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InfluxSinkConfig {
    /// Http api, e.g. localhost:8086.
    pub address: String,
    #[serde(default)]
    pub write_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkAddress {
    pub host: String,
    pub port: u16,
}

impl FromStr for SinkAddress {
    type Err = ExportError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let invalid = || ExportError::InvalidAddress {
            address: address.to_string(),
        };

        let (host, port) = address.rsplit_once(':').ok_or_else(invalid)?;
        if host.is_empty() {
            return Err(invalid());
        }
        let port = port.parse::<u16>().map_err(|_| invalid())?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for SinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
