mod exporter_config;
mod report;
mod runtime_report_request;
mod sample;

pub use crate::model::exporter_config::{
    ExporterConfig, GraphiteSinkConfig, InfluxSinkConfig, SinkAddress, SinkConfig,
    DEFAULT_COLUMNS, DEFAULT_PREFIX, DEFAULT_TIMEZONE, DEFAULT_WRITE_PATH,
};
pub use crate::model::report::{ReportDocument, RuntimeRowBlock, SensorBlock, SensorMetadata};
pub use crate::model::runtime_report_request::{RuntimeReportRequest, Selection};
pub use crate::model::sample::{Sample, SinkCall, ThermostatSamples};
