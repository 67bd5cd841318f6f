use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use tracing::{info, warn};

use taxipark::{logging, records, Driver, TaxiPark};

#[derive(Parser)]
#[command(
    name = "taxipark",
    about = "Answer the taxi park questions for a directory of CSV trip data",
    long_about = "Reads drivers.csv, passengers.csv and trips.csv from the data\n\
                  directory and prints fake drivers, faithful, frequent and smart\n\
                  passengers, the busiest trip duration and the Pareto check."
)]
struct Cli {
    /// Directory holding drivers.csv, passengers.csv and trips.csv
    #[arg(long, env = "TAXIPARK_DATA", default_value = "park")]
    data: PathBuf,
    /// Minimum number of trips for a faithful passenger
    #[arg(long, env = "TAXIPARK_MIN_TRIPS", default_value_t = 2, allow_negative_numbers = true)]
    min_trips: i64,
    /// Driver whose frequent passengers are listed (defaults to the first driver)
    #[arg(long, env = "TAXIPARK_DRIVER")]
    driver: Option<String>,
}

fn names<T: std::fmt::Display + Ord>(items: impl IntoIterator<Item = Arc<T>>) -> String {
    let listed = items.into_iter().sorted().join(", ");
    if listed.is_empty() {
        "-".to_owned()
    } else {
        listed
    }
}

/// The named driver, or the first rostered one. A name missing from the
/// roster still yields a driver, whose frequent passengers are empty.
fn pick_driver(park: &TaxiPark, name: Option<&str>) -> Option<Arc<Driver>> {
    match name {
        Some(name) => Some(park.driver(name).unwrap_or_else(|| {
            warn!(driver = name, "Driver is not on the roster");
            Arc::new(Driver::new(name))
        })),
        None => park.sorted_drivers().into_iter().next(),
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    info!(data = %cli.data.display(), "Loading taxi park");
    let park = records::load_dir(&cli.data)
        .with_context(|| format!("Could not load taxi park from {}", cli.data.display()))?;
    let driver = pick_driver(&park, cli.driver.as_deref());

    println!("Fake drivers: {}", names(park.find_fake_drivers()));
    println!(
        "Faithful passengers (>= {} trips): {}",
        cli.min_trips,
        names(park.find_faithful_passengers(cli.min_trips))
    );
    match driver {
        Some(driver) => println!(
            "Frequent passengers of {}: {}",
            driver,
            names(park.find_frequent_passengers(&driver))
        ),
        None => println!("Frequent passengers: no drivers"),
    }
    println!("Smart passengers: {}", names(park.find_smart_passengers()));
    match park.find_the_most_frequent_trip_duration_period() {
        Some(period) => println!(
            "Most frequent trip duration: {}..{} min",
            period.start(),
            period.end()
        ),
        None => println!("Most frequent trip duration: no trips"),
    }
    println!(
        "Pareto principle holds: {}",
        park.check_pareto_principle()
    );

    Ok(())
}
