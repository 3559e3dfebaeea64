use crate::error::ExportError;
use crate::graphite_client::{GraphiteClient, GraphiteClientConfig};
use crate::influx_client::{InfluxClient, InfluxClientConfig};
use crate::model::{ExporterConfig, Sample, SinkAddress, SinkConfig};

#[derive(Debug)]
pub enum Sink {
    Graphite(GraphiteClient),
    Influx(InfluxClient),
}

impl Sink {
    pub fn from_config(config: &ExporterConfig) -> Result<Self, ExportError> {
        match &config.sink {
            SinkConfig::Graphite(graphite) => Ok(Sink::Graphite(GraphiteClient::new(
                GraphiteClientConfig::new(graphite.address.parse::<SinkAddress>()?, config.prefix.clone()),
            ))),
            SinkConfig::Influx(influx) => Ok(Sink::Influx(InfluxClient::new(InfluxClientConfig::new(
                influx.address.parse::<SinkAddress>()?,
                influx.write_path.clone(),
                config.prefix.clone(),
                config.tags.clone(),
            ))?)),
        }
    }

    /// Transmits one batch; it either goes out completely or the call fails.
    pub fn send(&self, samples: &[Sample], extra_tags: &[String]) -> Result<(), ExportError> {
        match self {
            Sink::Graphite(client) => client.send(samples),
            Sink::Influx(client) => client.send(samples, extra_tags),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sink::Graphite(_) => "graphite",
            Sink::Influx(_) => "influxdb",
        }
    }
}
