use crate::config_client::ConfigClient;
use crate::error::ExportError;
use crate::model::{ReportDocument, RuntimeReportRequest, SinkCall};
use crate::report_client::ReportClient;
use crate::report_parser::parse;
use crate::sink::Sink;
use std::error::Error;
use tracing::{debug, info};

pub struct ExporterServiceConfig {
    config_client: ConfigClient,
    report_client: Box<dyn ReportClient>,
}

impl ExporterServiceConfig {
    pub fn new(
        config_client: ConfigClient,
        report_client: Box<dyn ReportClient>,
    ) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config_client,
            report_client,
        })
    }
}

pub struct ExporterService {
    config: ExporterServiceConfig,
}

impl ExporterService {
    pub fn new(config: ExporterServiceConfig) -> Self {
        Self { config }
    }

    /// Runs a single export: fetch the configured report range, decode it and hand it to the configured sink.
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let config = self.config.config_client.read_exporter_config_from_file()?;
        let sink = Sink::from_config(&config)?;

        let request = RuntimeReportRequest::from_config(&config)?;
        info!(
            "Fetching runtime report for {} from {} to {}",
            request.selection.selection_match, request.start_date, request.end_date
        );

        let document = ReportDocument::from_value(
            self.config.report_client.get_runtime_report(&request)?,
        )?;
        info!(
            "Fetched runtime report with {} runtime blocks and {} sensor blocks",
            document.report_list.len(),
            document.sensor_list.len()
        );

        export(&document, &config.timezone, &sink)?;

        Ok(())
    }
}

/// Parses a fetched report and sends every non-empty batch through the sink, in order. Returns the number of samples
/// sent.
pub fn export(document: &ReportDocument, timezone: &str, sink: &Sink) -> Result<usize, ExportError> {
    let calls: Vec<SinkCall> = parse(document, timezone)?.into();

    let mut sent = 0;
    for call in &calls {
        if call.samples.is_empty() {
            debug!("Skipping empty batch with extra tags {:?}", call.extra_tags);
            continue;
        }

        sink.send(&call.samples, &call.extra_tags)?;
        sent += call.samples.len();
    }

    info!("Exported {} samples to {}", sent, sink.name());

    Ok(sent)
}
