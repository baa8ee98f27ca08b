use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_value};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub input: Option<String>,
    pub interval: Option<DurationValue>,
    pub report_interval: Option<DurationValue>,
    pub inbound_capacity: Option<usize>,
    pub failure_capacity: Option<usize>,
    pub failures_out: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
