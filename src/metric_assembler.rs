use crate::model::{Sample, SinkCall, ThermostatSamples};
use crate::report_parser::ParsedReport;

pub const THERMOSTAT_TAG_KEY: &str = "thermostat";

/// Batches parsed samples into sink calls: the runtime stream first, untagged, then one call per thermostat's sensor
/// samples tagged with that thermostat. Sample order is preserved.
pub fn assemble(runtime_samples: Vec<Sample>, sensor_samples: Vec<ThermostatSamples>) -> Vec<SinkCall> {
    let mut calls = Vec::with_capacity(sensor_samples.len() + 1);

    calls.push(SinkCall {
        samples: runtime_samples,
        extra_tags: vec![],
    });

    for thermostat in sensor_samples {
        calls.push(SinkCall {
            samples: thermostat.samples,
            extra_tags: vec![format!("{}={}", THERMOSTAT_TAG_KEY, thermostat.thermostat_id)],
        });
    }

    calls
}

impl From<ParsedReport> for Vec<SinkCall> {
    fn from(parsed: ParsedReport) -> Self {
        assemble(parsed.runtime_samples, parsed.sensor_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sensor_sample(id: &str, timestamp: i64, value: f64) -> Sample {
        Sample::new(format!("sensor.{}", id), timestamp, value)
            .with_tags(vec!["name=bedroom".into(), "type=temperature".into()])
    }

    #[test]
    fn assemble_returns_runtime_call_followed_by_call_per_thermostat() {
        let runtime = vec![
            Sample::new("zoneAveTemp".into(), 1672549500, 21.1),
            Sample::new("zoneAveTemp".into(), 1672549800, 21.2),
        ];
        let sensors = vec![
            ThermostatSamples {
                thermostat_id: "511863752245".into(),
                samples: vec![sensor_sample("rs1:100:1", 1672549500, 20.0)],
            },
            ThermostatSamples {
                thermostat_id: "311019854321".into(),
                samples: vec![
                    sensor_sample("rs2:101:2", 1672549800, 19.5),
                    sensor_sample("rs2:101:2", 1672549500, 19.0),
                ],
            },
        ];

        // act
        let calls = assemble(runtime.clone(), sensors);

        assert_eq!(
            calls,
            vec![
                SinkCall {
                    samples: runtime,
                    extra_tags: vec![],
                },
                SinkCall {
                    samples: vec![sensor_sample("rs1:100:1", 1672549500, 20.0)],
                    extra_tags: vec!["thermostat=511863752245".into()],
                },
                SinkCall {
                    samples: vec![
                        sensor_sample("rs2:101:2", 1672549800, 19.5),
                        sensor_sample("rs2:101:2", 1672549500, 19.0),
                    ],
                    extra_tags: vec!["thermostat=311019854321".into()],
                },
            ]
        );
    }

    #[test]
    fn assemble_keeps_empty_batches() {
        // act
        let calls: Vec<SinkCall> = ParsedReport {
            runtime_samples: vec![],
            sensor_samples: vec![ThermostatSamples {
                thermostat_id: "511863752245".into(),
                samples: vec![],
            }],
        }
        .into();

        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|call| call.samples.is_empty()));
    }
}
