//! The six analyses over a [`TaxiPark`].
//!
//! Every query borrows the park immutably and returns a freshly computed
//! answer, so they can run in any order or in parallel over one snapshot.

use itertools::*;
use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    hash::Hash,
    ops::RangeInclusive,
    sync::Arc,
};
use tracing::debug;

use crate::data::*;

/// Width of a trip-duration period in minutes.
pub const PERIOD_LENGTH: Minutes = 10;

/// Share of drivers allowed in the top group of the Pareto check.
pub const PARETO_DRIVER_SHARE: f64 = 0.2;

/// Share of income the top group has to earn.
pub const PARETO_INCOME_SHARE: f64 = 0.8;

/// Fewer drivers than this cannot form a meaningful top 20%.
pub const PARETO_MIN_DRIVERS: usize = 5;

/// Counts how many times each key occurs.
pub fn occurrences<T, I>(items: I) -> HashMap<T, usize>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    items.into_iter().counts()
}

/// Running sum over `incomes`, e.g. `[1, 2, 3]` becomes `[1, 3, 6]`.
pub fn cumulative_income(incomes: &[f64]) -> Vec<f64> {
    incomes
        .iter()
        .scan(0.0, |running, income| {
            *running += income;
            Some(*running)
        })
        .collect()
}

/// Whether any prefix of the descending cumulative incomes covers at most
/// 20% of the drivers while earning at least 80% of `total_income`.
///
/// Every prefix is tried, not only the rounded 20% cut-off.
pub fn any_pareto_prefix(cumulative_incomes: &[f64], total_income: f64) -> bool {
    let driver_count = cumulative_incomes.len() as f64;

    cumulative_incomes
        .iter()
        .enumerate()
        .any(|(index, cumulative)| {
            (index + 1) as f64 / driver_count <= PARETO_DRIVER_SHARE
                && cumulative / total_income >= PARETO_INCOME_SHARE
        })
}

impl TaxiPark {
    /// Drivers who made no trips.
    pub fn find_fake_drivers(&self) -> HashSet<Arc<Driver>> {
        let active = self.drivers_who_made_trips();

        self.all_drivers
            .iter()
            .filter(|&driver| !active.contains(&**driver))
            .cloned()
            .collect()
    }

    /// Passengers who made at least `min_trips` trips.
    ///
    /// `0` returns the whole roster, including passengers who never rode.
    /// Any other threshold only considers passengers with at least one trip.
    pub fn find_faithful_passengers(&self, min_trips: i64) -> HashSet<Arc<Passenger>> {
        if min_trips == 0 {
            return self.all_passengers.clone();
        }

        occurrences(self.passenger_occurrences())
            .into_iter()
            .filter(|&(_, count)| count as i64 >= min_trips)
            .map(|(passenger, _)| Arc::clone(passenger))
            .collect()
    }

    /// Passengers taken by `driver` more than once. Empty for unknown drivers.
    pub fn find_frequent_passengers(&self, driver: &Driver) -> HashSet<Arc<Passenger>> {
        occurrences(self.passengers_of(driver))
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(passenger, _)| Arc::clone(passenger))
            .collect()
    }

    /// Passengers who had a discount on the strict majority of their trips.
    pub fn find_smart_passengers(&self) -> HashSet<Arc<Passenger>> {
        self.discount_tally()
            .into_iter()
            .filter(|&(_, (discounted, total))| discounted > total / 2)
            .map(|(passenger, _)| Arc::clone(passenger))
            .collect()
    }

    /// The 10-minute period (`0..=9`, `10..=19`, ...) holding the most trips,
    /// or `None` if there are no trips.
    ///
    /// Ties resolve to the shortest of the tied periods.
    pub fn find_the_most_frequent_trip_duration_period(&self) -> Option<RangeInclusive<Minutes>> {
        // Empty periods never win once a trip exists, so only occupied ones compete.
        occurrences(
            self.trips
                .iter()
                .map(|trip| trip.duration / PERIOD_LENGTH),
        )
        .into_iter()
        .max_by_key(|&(period, count)| (count, Reverse(period)))
        .map(|(period, _)| {
            let start = period * PERIOD_LENGTH;
            start..=start.saturating_add(PERIOD_LENGTH - 1)
        })
    }

    /// Whether the top 20% of drivers earn at least 80% of the income.
    ///
    /// Always `false` with fewer than five drivers or without trips.
    pub fn check_pareto_principle(&self) -> bool {
        if self.trips.is_empty() || self.all_drivers.len() < PARETO_MIN_DRIVERS {
            return false;
        }

        let incomes = self
            .all_drivers
            .iter()
            .map(|driver| self.income_of(driver))
            .sorted_by(|a, b| b.total_cmp(a))
            .collect::<Vec<_>>();
        let total_income: f64 = incomes.iter().sum();
        let cumulative = cumulative_income(&incomes);

        debug!(?incomes, total_income, "Checking income concentration");

        any_pareto_prefix(&cumulative, total_income)
    }

    /// Sum of the cost of every trip `driver` made.
    pub fn income_of(&self, driver: &Driver) -> f64 {
        self.trips
            .iter()
            .filter(|trip| trip.is_driven_by(driver))
            .map(|trip| trip.cost)
            .sum()
    }

    fn drivers_who_made_trips(&self) -> HashSet<&Driver> {
        self.trips.iter().map(|trip| trip.driver.as_ref()).collect()
    }

    fn passenger_occurrences(&self) -> impl Iterator<Item = &Arc<Passenger>> {
        self.trips.iter().flat_map(|trip| trip.passengers.iter())
    }

    fn passengers_of<'a>(&'a self, driver: &'a Driver) -> impl Iterator<Item = &'a Arc<Passenger>> {
        self.trips
            .iter()
            .filter(move |trip| trip.is_driven_by(driver))
            .flat_map(|trip| trip.passengers.iter())
    }

    /// `(discounted, total)` trip counts for every passenger who rode.
    fn discount_tally(&self) -> HashMap<&Arc<Passenger>, (usize, usize)> {
        self.trips
            .iter()
            .flat_map(|trip| {
                trip.passengers
                    .iter()
                    .map(move |passenger| (passenger, trip.has_discount()))
            })
            .fold(HashMap::new(), |mut tally, (passenger, discounted)| {
                let (with_discount, total) = tally.entry(passenger).or_insert((0, 0));
                *with_discount += usize::from(discounted);
                *total += 1;
                tally
            })
    }
}
