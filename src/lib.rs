pub mod config_client;
pub mod decoder;
pub mod error;
pub mod exporter_service;
pub mod graphite_client;
pub mod influx_client;
pub mod metric_assembler;
pub mod model;
pub mod report_client;
pub mod report_parser;
pub mod sink;
