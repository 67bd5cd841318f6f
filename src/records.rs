use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::{data::*, error::ParkError, park::TaxiParkBuilder};

pub const DRIVERS_FILE: &str = "drivers.csv";
pub const PASSENGERS_FILE: &str = "passengers.csv";
pub const TRIPS_FILE: &str = "trips.csv";

#[derive(Deserialize, Debug)]
pub struct DriverRecord {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct PassengerRecord {
    pub name: String,
}

/// One row of `trips.csv`. `passengers` is `;`-separated and an empty
/// `discount` column means the trip was paid in full.
#[derive(Deserialize, Debug)]
pub struct TripRecord {
    pub driver: String,
    pub passengers: String,
    pub duration: Minutes,
    pub cost: f64,
    pub discount: Option<f64>,
}

impl TripRecord {
    pub fn passenger_names(&self) -> impl Iterator<Item = &str> {
        self.passengers
            .split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct ParkRecords {
    pub drivers: Vec<DriverRecord>,
    pub passengers: Vec<PassengerRecord>,
    pub trips: Vec<TripRecord>,
}

fn deserialize_into<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, ParkError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?
        .deserialize()
        .map(|parse_result| parse_result.map_err(ParkError::from))
        .collect()
}

impl ParkRecords {
    pub fn read_dir(dir: &Path) -> Result<Self, ParkError> {
        info!(dir = %dir.display(), "Reading park records");

        Ok(Self {
            drivers: deserialize_into(&dir.join(DRIVERS_FILE))?,
            passengers: deserialize_into(&dir.join(PASSENGERS_FILE))?,
            trips: deserialize_into(&dir.join(TRIPS_FILE))?,
        })
    }
}

impl From<ParkRecords> for TaxiParkBuilder {
    fn from(records: ParkRecords) -> Self {
        let builder = TaxiParkBuilder::new()
            .drivers(records.drivers.into_iter().map(|record| Driver::new(record.name)))
            .passengers(
                records
                    .passengers
                    .into_iter()
                    .map(|record| Passenger::new(record.name)),
            );

        records.trips.iter().fold(builder, |builder, record| {
            builder.trip(
                record.driver.as_str(),
                record.passenger_names(),
                record.duration,
                record.cost,
                record.discount,
            )
        })
    }
}

/// Reads `drivers.csv`, `passengers.csv` and `trips.csv` from `dir` and
/// builds a validated park from them.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<TaxiPark, ParkError> {
    TaxiParkBuilder::from(ParkRecords::read_dir(dir.as_ref())?).build()
}
