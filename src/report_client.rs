use crate::model::RuntimeReportRequest;
use std::error::Error;

/// Fetches a runtime report with already authorized credentials and returns the json decoded body.
pub trait ReportClient {
    fn get_runtime_report(
        &self,
        request: &RuntimeReportRequest,
    ) -> Result<serde_json::Value, Box<dyn Error>>;
}
