//! CSV-backed record source: `drivers.csv`, `passengers.csv` and `trips.csv` in one directory.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::driver::DriverStatus;
use crate::error::RecordSourceError;
use crate::identified::Id;
use crate::records::{DriverRecord, PassengerRecord, RecordSource, TripRecord};

pub const DRIVERS_FILE: &str = "drivers.csv";
pub const PASSENGERS_FILE: &str = "passengers.csv";
pub const TRIPS_FILE: &str = "trips.csv";

/// Timestamp layout used by the bundled datasets, e.g. `2018-05-25 11:52:40 -0700`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Deserialize)]
struct DriverRow {
    id: Id,
    name: String,
    vin: String,
    #[serde(default)]
    status: Option<DriverStatus>,
}

#[derive(Debug, Deserialize)]
struct PassengerRow {
    id: Id,
    name: String,
    phone_num: String,
}

// Times and costs stay textual until parsed into exact types below.
#[derive(Debug, Deserialize)]
struct TripRow {
    id: Id,
    driver_id: Id,
    passenger_id: Id,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    cost: Option<String>,
    #[serde(default)]
    rating: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_rows<T: DeserializeOwned>(
        &self,
        file_name: &str,
    ) -> Result<Vec<(u64, T)>, RecordSourceError> {
        let path = self.root.join(file_name);
        let file = File::open(&path).map_err(|source| RecordSourceError::Io {
            path: path.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for (index, row) in reader.deserialize::<T>().enumerate() {
            let row = row.map_err(|source| RecordSourceError::Csv {
                path: path.clone(),
                source,
            })?;
            // Line 1 is the header.
            rows.push((index as u64 + 2, row));
        }
        tracing::debug!(file = %path.display(), rows = rows.len(), "read csv records");
        Ok(rows)
    }
}

impl RecordSource for CsvDirectory {
    fn driver_records(&self) -> Result<Vec<DriverRecord>, RecordSourceError> {
        let rows = self.read_rows::<DriverRow>(DRIVERS_FILE)?;
        Ok(rows
            .into_iter()
            .map(|(_, row)| DriverRecord {
                id: row.id,
                name: row.name,
                vin: row.vin,
                status: row.status,
            })
            .collect())
    }

    fn passenger_records(&self) -> Result<Vec<PassengerRecord>, RecordSourceError> {
        let rows = self.read_rows::<PassengerRow>(PASSENGERS_FILE)?;
        Ok(rows
            .into_iter()
            .map(|(_, row)| PassengerRecord {
                id: row.id,
                name: row.name,
                phone_num: row.phone_num,
            })
            .collect())
    }

    fn trip_records(&self) -> Result<Vec<TripRecord>, RecordSourceError> {
        let path = self.root.join(TRIPS_FILE);
        let parse_error = |line: u64, message: String| RecordSourceError::Parse {
            path: path.clone(),
            line,
            message,
        };

        self.read_rows::<TripRow>(TRIPS_FILE)?
            .into_iter()
            .map(|(line, row)| -> Result<TripRecord, RecordSourceError> {
                let start_time =
                    parse_timestamp(&row.start_time).map_err(|m| parse_error(line, m))?;
                let end_time = non_empty(row.end_time)
                    .map(|raw| parse_timestamp(&raw))
                    .transpose()
                    .map_err(|m| parse_error(line, m))?;
                let cost = non_empty(row.cost)
                    .map(|raw| {
                        Decimal::from_str(&raw).map_err(|e| format!("invalid cost {raw:?}: {e}"))
                    })
                    .transpose()
                    .map_err(|m| parse_error(line, m))?;
                Ok(TripRecord {
                    id: row.id,
                    driver_id: row.driver_id,
                    passenger_id: row.passenger_id,
                    start_time,
                    end_time,
                    cost,
                    rating: row.rating,
                })
            })
            .collect()
    }
}

/// Accepts the dataset layout (`2018-05-25 11:52:40 -0700`) or RFC 3339, normalized to UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}
