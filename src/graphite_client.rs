use crate::error::ExportError;
use crate::model::{Sample, SinkAddress};
use serde_pickle::SerOptions;
use std::convert::TryFrom;
use std::io::Write;
use std::net::TcpStream;
use tracing::{debug, info};

#[derive(Debug)]
pub struct GraphiteClientConfig {
    pub address: SinkAddress,
    pub prefix: String,
}

impl GraphiteClientConfig {
    pub fn new(address: SinkAddress, prefix: String) -> Self {
        debug!(
            "GraphiteClientConfig::new(address: {}, prefix: {})",
            address, prefix
        );

        Self { address, prefix }
    }
}

/// Sends batches to a carbon pickle receiver. Tags have no place in the pickle format and are left out.
#[derive(Debug)]
pub struct GraphiteClient {
    config: GraphiteClientConfig,
}

impl GraphiteClient {
    pub fn new(config: GraphiteClientConfig) -> GraphiteClient {
        GraphiteClient { config }
    }

    pub fn send(&self, samples: &[Sample]) -> Result<(), ExportError> {
        let payload = self.encode(samples)?;
        let header = u32::try_from(payload.len())
            .map_err(|_| ExportError::SinkTransport {
                reason: format!("pickle payload of {} bytes exceeds length header", payload.len()),
            })?
            .to_be_bytes();

        debug!(
            "Writing {} byte pickle payload to graphite at {}",
            payload.len(),
            self.config.address
        );

        let mut stream = TcpStream::connect((self.config.address.host.as_str(), self.config.address.port))
            .map_err(|e| self.transport_error("connect to", e))?;

        stream
            .write_all(&header)
            .and_then(|_| stream.write_all(&payload))
            .and_then(|_| stream.flush())
            .map_err(|e| self.transport_error("write to", e))?;

        info!("Sent {} samples to graphite at {}", samples.len(), self.config.address);

        Ok(())
    }

    /// Pickles samples as a list of `(prefix.metric, (timestamp, value))` tuples.
    pub fn encode(&self, samples: &[Sample]) -> Result<Vec<u8>, ExportError> {
        let metrics: Vec<(String, (i64, f64))> = samples
            .iter()
            .map(|sample| {
                (
                    format!("{}.{}", self.config.prefix, sample.metric_name),
                    (sample.timestamp, sample.value),
                )
            })
            .collect();

        serde_pickle::to_vec(&metrics, SerOptions::new().proto_v2()).map_err(|e| ExportError::SinkTransport {
            reason: format!("failed to pickle {} samples: {}", samples.len(), e),
        })
    }

    fn transport_error(&self, action: &str, e: std::io::Error) -> ExportError {
        ExportError::SinkTransport {
            reason: format!("failed to {} graphite at {}: {}", action, self.config.address, e),
        }
    }
}
