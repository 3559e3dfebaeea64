use crate::error::ExportError;
use crate::model::ExporterConfig;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeReportRequest {
    pub selection: Selection,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub columns: String,
    pub include_sensors: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selection_type: String,
    pub selection_match: String,
}

impl RuntimeReportRequest {
    pub fn from_config(config: &ExporterConfig) -> Result<Self, ExportError> {
        let end_date = u64::try_from(config.days)
            .ok()
            .and_then(|days| config.start_date.checked_add_days(Days::new(days)))
            .ok_or_else(|| ExportError::InvalidDateRange {
                start_date: config.start_date,
                days: config.days,
            })?;

        Ok(Self {
            selection: Selection {
                selection_type: "thermostats".to_string(),
                selection_match: config.selector.clone(),
            },
            start_date: config.start_date,
            end_date,
            columns: config.columns.clone(),
            include_sensors: true,
        })
    }
}
