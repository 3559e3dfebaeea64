use crate::error::ExportError;
use serde::{Deserialize, Serialize};

/// Runtime report as returned by the report api, after json decoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    /// Comma joined runtime column names, in payload order.
    pub columns: String,
    pub report_list: Vec<RuntimeRowBlock>,
    pub sensor_list: Vec<SensorBlock>,
}

impl ReportDocument {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ExportError> {
        serde_json::from_value(value).map_err(|e| ExportError::Schema {
            reason: e.to_string(),
        })
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.split(',').collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeRowBlock {
    pub thermostat_identifier: String,
    pub row_list: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorBlock {
    pub thermostat_identifier: String,
    pub sensors: Vec<SensorMetadata>,
    /// Leading date and time columns followed by one sensor id per payload value.
    pub columns: Vec<String>,
    pub data: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorMetadata {
    pub sensor_id: String,
    pub sensor_name: String,
    pub sensor_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use serde_json::json;

    #[test]
    fn from_value_reads_report_document() {
        let value = json!({
            "columns": "zoneAveTemp,zoneHumidity",
            "reportList": [
                {
                    "thermostatIdentifier": "511863752245",
                    "rowList": ["2023-01-01,00:00:00,70.1,43,"]
                }
            ],
            "sensorList": [
                {
                    "thermostatIdentifier": "511863752245",
                    "sensors": [
                        {
                            "sensorId": "rs1:100:1",
                            "sensorName": "Bedroom",
                            "sensorType": "temperature",
                            "sensorUsage": "monitor"
                        }
                    ],
                    "columns": ["date", "time", "rs1:100:1"],
                    "data": ["2023-01-01,00:00:00,68.5,"]
                }
            ]
        });

        // act
        let_assert!(Ok(document) = ReportDocument::from_value(value));

        check!(document.headers() == vec!["zoneAveTemp", "zoneHumidity"]);
        check!(document.report_list.len() == 1);
        check!(document.report_list[0].row_list == vec!["2023-01-01,00:00:00,70.1,43,".to_string()]);
        check!(document.sensor_list[0].sensors[0].sensor_name == "Bedroom");
        check!(document.sensor_list[0].columns.len() == 3);
    }

    #[test]
    fn from_value_fails_on_missing_key() {
        let value = json!({
            "columns": "zoneAveTemp",
            "reportList": []
        });

        // act
        let_assert!(Err(ExportError::Schema { reason }) = ReportDocument::from_value(value));

        check!(reason.contains("sensorList"));
    }
}
