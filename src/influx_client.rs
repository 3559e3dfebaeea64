use crate::error::ExportError;
use crate::model::{Sample, SinkAddress};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, info};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

#[derive(Debug)]
pub struct InfluxClientConfig {
    pub address: SinkAddress,
    pub write_path: String,
    pub prefix: String,
    /// Static `key=value` tags added to every line.
    pub tags: Vec<String>,
}

impl InfluxClientConfig {
    pub fn new(address: SinkAddress, write_path: String, prefix: String, tags: Vec<String>) -> Self {
        debug!(
            "InfluxClientConfig::new(address: {}, write_path: {}, prefix: {}, tags: {:?})",
            address, write_path, prefix, tags
        );

        Self {
            address,
            write_path,
            prefix,
            tags,
        }
    }

    pub fn write_url(&self) -> String {
        if self.write_path.starts_with('/') {
            format!("http://{}{}", self.address, self.write_path)
        } else {
            format!("http://{}/{}", self.address, self.write_path)
        }
    }
}

/// Posts batches in line protocol to the influxdb write endpoint; the database has to exist already.
#[derive(Debug)]
pub struct InfluxClient {
    config: InfluxClientConfig,
    http_client: Client,
}

impl InfluxClient {
    pub fn new(config: InfluxClientConfig) -> Result<InfluxClient, ExportError> {
        // influxdb is addressed directly, never through a proxy
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ExportError::SinkTransport {
                reason: format!("failed to build http client: {}", e),
            })?;

        Ok(InfluxClient { config, http_client })
    }

    pub fn send(&self, samples: &[Sample], extra_tags: &[String]) -> Result<(), ExportError> {
        let url = self.config.write_url();
        let payload = self.format_lines(samples, extra_tags)?;

        debug!("Posting {} lines to {}", samples.len(), url);

        let response = self
            .http_client
            .post(&url)
            .body(payload)
            .send()
            .map_err(|e| ExportError::SinkTransport {
                reason: format!("failed to post to {}: {}", url, e),
            })?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            return Err(ExportError::SinkRejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        info!("Sent {} samples to influxdb at {}", samples.len(), self.config.address);

        Ok(())
    }

    /// Renders one `name[,tags] value=<value> <nanoseconds>` line per sample. A sample's own tags come first, then
    /// the static tags, then the call's extra tags.
    pub fn format_lines(&self, samples: &[Sample], extra_tags: &[String]) -> Result<String, ExportError> {
        let shared_tags: Vec<&str> = self
            .config
            .tags
            .iter()
            .chain(extra_tags)
            .map(String::as_str)
            .collect();

        samples
            .iter()
            .map(|sample| -> Result<String, ExportError> {
                let tags: Vec<&str> = sample
                    .tags
                    .iter()
                    .map(String::as_str)
                    .chain(shared_tags.iter().copied())
                    .collect();

                let mut series = format!("{}.{}", self.config.prefix, sample.metric_name);
                if !tags.is_empty() {
                    series.push(',');
                    series.push_str(&tags.join(","));
                }

                let nanos = sample
                    .timestamp
                    .checked_mul(NANOS_PER_SECOND)
                    .ok_or_else(|| ExportError::TimestampOutOfRange {
                        metric_name: sample.metric_name.clone(),
                        timestamp: sample.timestamp,
                    })?;

                Ok(format!("{} value={} {}", series, sample.value, nanos))
            })
            .collect::<Result<Vec<String>, ExportError>>()
            .map(|lines| lines.join("\n"))
    }
}
