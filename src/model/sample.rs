use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub metric_name: String,
    /// Seconds since the unix epoch, utc.
    pub timestamp: i64,
    pub value: f64,
    /// Ordered `key=value` pairs; empty for runtime samples.
    pub tags: Vec<String>,
}

impl Sample {
    pub fn new(metric_name: String, timestamp: i64, value: f64) -> Self {
        Self {
            metric_name,
            timestamp,
            value,
            tags: vec![],
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Sensor samples collected from a single thermostat's sensor block.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermostatSamples {
    pub thermostat_id: String,
    pub samples: Vec<Sample>,
}

/// One batch handed to a sink.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkCall {
    pub samples: Vec<Sample>,
    pub extra_tags: Vec<String>,
}
