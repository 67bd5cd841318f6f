use std::{
    collections::{HashMap, HashSet},
    ops::RangeInclusive,
    sync::Arc,
};

use tracing::{debug, info};

use crate::{data::*, error::ParkError};

#[derive(Debug)]
struct PendingTrip {
    driver: Driver,
    passengers: Vec<Passenger>,
    duration: Minutes,
    cost: f64,
    discount: Option<f64>,
}

/// Assembles a [`TaxiPark`] and checks it against the roster before handing
/// it to the queries.
///
/// ```
/// use taxipark::park::TaxiParkBuilder;
///
/// let park = TaxiParkBuilder::numbered(1..=3, 1..=2)
///     .trip("D-1", ["P-1"], 10, 12.5, None)
///     .trip("D-1", ["P-2"], 25, 30.0, Some(0.2))
///     .build()
///     .unwrap();
///
/// assert_eq!(park.trips.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TaxiParkBuilder {
    drivers: Vec<Driver>,
    passengers: Vec<Passenger>,
    trips: Vec<PendingTrip>,
}

pub fn numbered_driver(n: u32) -> Driver {
    Driver::new(format!("D-{}", n))
}

pub fn numbered_passenger(n: u32) -> Passenger {
    Passenger::new(format!("P-{}", n))
}

impl TaxiParkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster of drivers `D-<n>` and passengers `P-<n>` for each `n` in the
    /// given ranges. Empty ranges yield an empty roster.
    pub fn numbered(drivers: RangeInclusive<u32>, passengers: RangeInclusive<u32>) -> Self {
        Self::new()
            .drivers(drivers.map(numbered_driver))
            .passengers(passengers.map(numbered_passenger))
    }

    pub fn driver(mut self, driver: impl Into<Driver>) -> Self {
        self.drivers.push(driver.into());
        self
    }

    pub fn drivers<D: Into<Driver>>(mut self, drivers: impl IntoIterator<Item = D>) -> Self {
        self.drivers.extend(drivers.into_iter().map(Into::into));
        self
    }

    pub fn passenger(mut self, passenger: impl Into<Passenger>) -> Self {
        self.passengers.push(passenger.into());
        self
    }

    pub fn passengers<P: Into<Passenger>>(
        mut self,
        passengers: impl IntoIterator<Item = P>,
    ) -> Self {
        self.passengers
            .extend(passengers.into_iter().map(Into::into));
        self
    }

    pub fn trip<P: Into<Passenger>>(
        mut self,
        driver: impl Into<Driver>,
        passengers: impl IntoIterator<Item = P>,
        duration: Minutes,
        cost: f64,
        discount: Option<f64>,
    ) -> Self {
        self.trips.push(PendingTrip {
            driver: driver.into(),
            passengers: passengers.into_iter().map(Into::into).collect(),
            duration,
            cost,
            discount,
        });
        self
    }

    /// Validates every trip against the roster and freezes the park.
    pub fn build(self) -> Result<TaxiPark, ParkError> {
        let known_drivers: HashSet<&Driver> = self.drivers.iter().collect();
        let known_passengers: HashSet<&Passenger> = self.passengers.iter().collect();

        for (index, trip) in self.trips.iter().enumerate() {
            if !known_drivers.contains(&trip.driver) {
                return Err(ParkError::UnknownDriver {
                    driver: trip.driver.name.to_owned(),
                    trip: index,
                });
            }

            if trip.passengers.is_empty() {
                return Err(ParkError::NoPassengers { trip: index });
            }

            if let Some(passenger) = trip
                .passengers
                .iter()
                .find(|passenger| !known_passengers.contains(passenger))
            {
                return Err(ParkError::UnknownPassenger {
                    passenger: passenger.name.to_owned(),
                    trip: index,
                });
            }

            if !trip.cost.is_finite() || trip.cost < 0.0 {
                return Err(ParkError::InvalidCost {
                    cost: trip.cost,
                    trip: index,
                });
            }

            if let Some(discount) = trip.discount {
                if !(discount > 0.0 && discount <= 1.0) {
                    return Err(ParkError::InvalidDiscount {
                        discount,
                        trip: index,
                    });
                }
            }
        }

        let park = self.build_unchecked();
        info!(
            drivers = park.all_drivers.len(),
            passengers = park.all_passengers.len(),
            trips = park.trips.len(),
            "Built taxi park"
        );
        Ok(park)
    }

    /// Freezes the park without validating it.
    ///
    /// Queries over a park built this way never panic, but their answers are
    /// only meaningful if every trip references rostered drivers and
    /// passengers.
    pub fn build_unchecked(self) -> TaxiPark {
        let drivers: HashMap<Driver, Arc<Driver>> = self
            .drivers
            .into_iter()
            .map(|driver| (driver.clone(), Arc::new(driver)))
            .collect();
        let passengers: HashMap<Passenger, Arc<Passenger>> = self
            .passengers
            .into_iter()
            .map(|passenger| (passenger.clone(), Arc::new(passenger)))
            .collect();

        let trips = self
            .trips
            .into_iter()
            .map(|trip| {
                let driver = drivers
                    .get(&trip.driver)
                    .cloned()
                    .unwrap_or_else(|| Arc::new(trip.driver));
                let passengers = trip
                    .passengers
                    .into_iter()
                    .map(|passenger| {
                        passengers
                            .get(&passenger)
                            .cloned()
                            .unwrap_or_else(|| Arc::new(passenger))
                    })
                    .collect();

                Arc::new(Trip {
                    driver,
                    passengers,
                    duration: trip.duration,
                    cost: trip.cost,
                    discount: trip.discount,
                })
            })
            .collect::<Vec<_>>();

        debug!(trips = trips.len(), "Interned trip participants");

        TaxiPark::new(
            drivers.into_values().collect(),
            passengers.into_values().collect(),
            trips,
        )
    }
}
