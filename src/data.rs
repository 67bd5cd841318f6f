use itertools::*;
use std::{collections::HashSet, fmt, sync::Arc};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Driver {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Passenger {
    pub name: String,
}

pub type Minutes = u32;

impl Driver {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Passenger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Driver {
    fn from(value: &str) -> Self {
        Driver::new(value)
    }
}

impl From<&str> for Passenger {
    fn from(value: &str) -> Self {
        Passenger::new(value)
    }
}

/// A single completed ride.
///
/// `discount` is `None` when the fare was paid in full; a present discount is
/// a fraction in `(0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub driver: Arc<Driver>,
    pub passengers: HashSet<Arc<Passenger>>,
    pub duration: Minutes,
    pub cost: f64,
    pub discount: Option<f64>,
}

impl Trip {
    pub fn has_discount(&self) -> bool {
        self.discount.is_some()
    }

    pub fn carries(&self, passenger: &Passenger) -> bool {
        self.passengers.contains(passenger)
    }

    pub fn is_driven_by(&self, driver: &Driver) -> bool {
        *self.driver == *driver
    }

    pub fn sorted_passengers(&self) -> Vec<Arc<Passenger>> {
        self.passengers.iter().cloned().sorted().collect()
    }
}

/// The dataset every query runs over.
///
/// Built once through [`crate::park::TaxiParkBuilder`] and never mutated
/// afterwards; every derived figure is recomputed from `trips` on demand.
#[derive(Debug, Clone, Default)]
pub struct TaxiPark {
    pub all_drivers: HashSet<Arc<Driver>>,
    pub all_passengers: HashSet<Arc<Passenger>>,
    pub trips: Vec<Arc<Trip>>,
}

impl TaxiPark {
    pub fn new(
        all_drivers: HashSet<Arc<Driver>>,
        all_passengers: HashSet<Arc<Passenger>>,
        trips: Vec<Arc<Trip>>,
    ) -> Self {
        Self {
            all_drivers,
            all_passengers,
            trips,
        }
    }

    pub fn driver(&self, name: &str) -> Option<Arc<Driver>> {
        self.all_drivers
            .iter()
            .find(|driver| driver.name == name)
            .cloned()
    }

    pub fn passenger(&self, name: &str) -> Option<Arc<Passenger>> {
        self.all_passengers
            .iter()
            .find(|passenger| passenger.name == name)
            .cloned()
    }

    pub fn sorted_drivers(&self) -> Vec<Arc<Driver>> {
        self.all_drivers.iter().cloned().sorted().collect()
    }

    pub fn sorted_passengers(&self) -> Vec<Arc<Passenger>> {
        self.all_passengers.iter().cloned().sorted().collect()
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}, {} min, ${}",
            self.driver,
            self.sorted_passengers().iter().join(", "),
            self.duration,
            self.cost
        )?;
        if let Some(discount) = self.discount {
            write!(f, ", {}% discount", discount * 100.0)?;
        }
        Ok(())
    }
}

impl fmt::Display for TaxiPark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Taxi park:")?;
        writeln!(f, "Drivers: {}", self.sorted_drivers().iter().join(", "))?;
        writeln!(
            f,
            "Passengers: {}",
            self.sorted_passengers().iter().join(", ")
        )?;
        writeln!(f, "Trips:")?;
        for trip in &self.trips {
            writeln!(f, "  {}", trip)?;
        }
        Ok(())
    }
}
