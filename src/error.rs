use crate::decoder::Category;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No decode rule registered for {category} field {key}")]
    UnknownField { category: Category, key: String },

    #[error("Malformed value {raw:?} for field {key}")]
    MalformedValue { key: String, raw: String },

    #[error("Malformed timestamp {raw:?}; expected %Y-%m-%d,%H:%M:%S")]
    MalformedTimestamp { raw: String },

    #[error("Timestamp {timestamp} of {metric_name} is out of range for nanosecond precision")]
    TimestampOutOfRange { metric_name: String, timestamp: i64 },

    #[error("Report range of {days} days from {start_date} is out of range")]
    InvalidDateRange { start_date: NaiveDate, days: i64 },

    #[error("Unknown timezone: {name}")]
    UnknownTimezone { name: String },

    #[error("Unexpected report document shape: {reason}")]
    Schema { reason: String },

    #[error("Invalid sink address {address:?}; expected host:port")]
    InvalidAddress { address: String },

    #[error("Sink transport failed: {reason}")]
    SinkTransport { reason: String },

    #[error("Sink rejected batch with status {status}: {body}")]
    SinkRejected { status: u16, body: String },
}

impl ExportError {
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ExportError::SinkTransport { .. } | ExportError::SinkRejected { .. }
        )
    }
}
