use crate::decoder::{decode, Category};
use crate::error::ExportError;
use crate::model::{ReportDocument, RuntimeRowBlock, Sample, SensorBlock, SensorMetadata, ThermostatSamples};
use chrono::{Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use tracing::debug;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of leading date and time columns in a sensor block header.
const SENSOR_COLUMN_OFFSET: usize = 2;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedReport {
    pub runtime_samples: Vec<Sample>,
    pub sensor_samples: Vec<ThermostatSamples>,
}

pub fn parse(document: &ReportDocument, timezone_name: &str) -> Result<ParsedReport, ExportError> {
    let timezone = timezone_name
        .parse::<Tz>()
        .map_err(|_| ExportError::UnknownTimezone {
            name: timezone_name.to_string(),
        })?;

    let headers = document.headers();

    let mut runtime_samples = vec![];
    for block in &document.report_list {
        parse_runtime_block(block, &headers, &timezone, &mut runtime_samples)?;
    }

    let mut sensor_samples = vec![];
    for block in &document.sensor_list {
        sensor_samples.push(ThermostatSamples {
            thermostat_id: block.thermostat_identifier.clone(),
            samples: parse_sensor_block(block, &timezone)?,
        });
    }

    Ok(ParsedReport {
        runtime_samples,
        sensor_samples,
    })
}

fn parse_runtime_block(
    block: &RuntimeRowBlock,
    headers: &[&str],
    timezone: &Tz,
    samples: &mut Vec<Sample>,
) -> Result<(), ExportError> {
    debug!(
        "Parsing {} runtime rows for thermostat {}",
        block.row_list.len(),
        block.thermostat_identifier
    );

    for row in &block.row_list {
        let (timestamp, values) = split_row(row, timezone)?;

        for (i, raw) in values.into_iter().enumerate() {
            if raw.is_empty() {
                continue;
            }

            let key = headers.get(i).ok_or_else(|| ExportError::Schema {
                reason: format!("runtime row {:?} has no column for value {}", row, i),
            })?;

            if let Some(value) = decode(Category::Runtime, key, raw)? {
                samples.push(Sample::new(key.to_string(), timestamp, value));
            }
        }
    }

    Ok(())
}

fn parse_sensor_block(block: &SensorBlock, timezone: &Tz) -> Result<Vec<Sample>, ExportError> {
    debug!(
        "Parsing {} sensor rows for thermostat {}",
        block.data.len(),
        block.thermostat_identifier
    );

    let sensors: HashMap<&str, &SensorMetadata> = block
        .sensors
        .iter()
        .map(|sensor| (sensor.sensor_id.as_str(), sensor))
        .collect();
    let sensor_columns = block.columns.get(SENSOR_COLUMN_OFFSET..).unwrap_or(&[]);

    let mut samples = vec![];
    for row in &block.data {
        let (timestamp, values) = split_row(row, timezone)?;

        for (i, raw) in values.into_iter().enumerate() {
            if raw.is_empty() {
                continue;
            }

            let sensor_id = sensor_columns.get(i).ok_or_else(|| ExportError::Schema {
                reason: format!("sensor row {:?} has no column for value {}", row, i),
            })?;
            let sensor = sensors
                .get(sensor_id.as_str())
                .ok_or_else(|| ExportError::Schema {
                    reason: format!(
                        "thermostat {} has no sensor with id {}",
                        block.thermostat_identifier, sensor_id
                    ),
                })?;

            if let Some(value) = decode(Category::Sensor, &sensor.sensor_type, raw)? {
                samples.push(
                    Sample::new(format!("sensor.{}", sensor.sensor_id), timestamp, value)
                        .with_tags(sensor_tags(sensor)),
                );
            }
        }
    }

    Ok(samples)
}

fn sensor_tags(sensor: &SensorMetadata) -> Vec<String> {
    vec![
        format!("name={}", sensor.sensor_name.to_lowercase().replace(' ', "_")),
        format!("type={}", sensor.sensor_type),
    ]
}

/// Splits a `date,time,v1,..,vN,<extra>` row into its utc epoch seconds and the positional values.
fn split_row<'a>(row: &'a str, timezone: &Tz) -> Result<(i64, Vec<&'a str>), ExportError> {
    let mut parts = row.splitn(3, ',');
    let date = parts.next().unwrap_or("");
    let time = parts.next().ok_or_else(|| ExportError::MalformedTimestamp {
        raw: row.to_string(),
    })?;
    let payload = parts.next().unwrap_or("");

    let timestamp = to_epoch_seconds(date, time, timezone)?;

    // every row carries one trailing column that is not part of the report columns
    let mut values: Vec<&str> = payload.split(',').collect();
    values.pop();

    Ok((timestamp, values))
}

fn to_epoch_seconds(date: &str, time: &str, timezone: &Tz) -> Result<i64, ExportError> {
    let raw = format!("{} {}", date, time);
    let local = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|_| ExportError::MalformedTimestamp { raw: raw.clone() })?;

    let timestamp = match timezone.from_local_datetime(&local) {
        LocalResult::Single(instant) => instant.timestamp(),
        // repeated hour when clocks fall back resolves to standard time
        LocalResult::Ambiguous(_, latest) => latest.timestamp(),
        // skipped hour when clocks spring forward resolves against the offset before the transition
        LocalResult::None => {
            let offset = timezone
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix();
            let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
            Utc.from_utc_datetime(&utc).timestamp()
        }
    };

    Ok(timestamp)
}
