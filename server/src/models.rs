use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary data source identifier in multi-source documents.
pub const SOURCE_NOAA: &str = "noaa";

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("measurement `{field}` has no usable value")]
    MissingValue { field: &'static str },
}

/// A measurement as stored in the hourly documents: either the legacy bare
/// number, or the multi-source mapping keyed by provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Measurement {
    Scalar(f64),
    BySource(BTreeMap<String, f64>),
}

impl Measurement {
    /// Canonical numeric value: the bare number, or the primary source's
    /// entry in the keyed form.
    pub fn primary(&self) -> Option<f64> {
        match self {
            Measurement::Scalar(value) => Some(*value),
            Measurement::BySource(sources) => sources.get(SOURCE_NOAA).copied(),
        }
    }

    pub fn value(&self, field: &'static str) -> Result<f64, ForecastError> {
        self.primary().ok_or(ForecastError::MissingValue { field })
    }
}

/// One hourly forecast document.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub time: DateTime<Utc>,
    pub air_temperature: Measurement,
    pub wave_height: Measurement,
    pub wave_direction: Measurement,
    pub wind_speed: Measurement,
    pub wind_direction: Measurement,
    pub cloud_cover: Measurement,
    pub precipitation: Measurement,
}
