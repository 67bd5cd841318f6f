use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use taxipark::park::{numbered_driver, numbered_passenger};
use taxipark::{Driver, TaxiPark, TaxiParkBuilder};

type TripParts = (u32, Vec<u32>, u32, f64, Option<f64>);

fn trip_strategy(drivers: u32, passengers: u32) -> impl Strategy<Value = TripParts> {
    let riders = (passengers as usize).min(3);
    (
        1..=drivers,
        prop::collection::btree_set(1..=passengers, 1..=riders)
            .prop_map(|ids| ids.into_iter().collect::<Vec<_>>()),
        0u32..90,
        0.0f64..100.0,
        prop::option::of(0.05f64..=1.0),
    )
}

fn park_strategy() -> impl Strategy<Value = TaxiPark> {
    (1u32..10, 1u32..8).prop_flat_map(|(drivers, passengers)| {
        prop::collection::vec(trip_strategy(drivers, passengers), 0..25).prop_map(move |trips| {
            trips
                .into_iter()
                .fold(
                    TaxiParkBuilder::numbered(1..=drivers, 1..=passengers),
                    |builder, (driver, riders, duration, cost, discount)| {
                        builder.trip(
                            numbered_driver(driver),
                            riders.into_iter().map(numbered_passenger),
                            duration,
                            cost,
                            discount,
                        )
                    },
                )
                .build()
                .expect("generated park is valid")
        })
    })
}

proptest! {
    #[test]
    fn fake_drivers_partition_the_roster(park in park_strategy()) {
        let fake = park.find_fake_drivers();
        let active: HashSet<Arc<Driver>> =
            park.trips.iter().map(|trip| Arc::clone(&trip.driver)).collect();

        prop_assert!(fake.is_disjoint(&active));
        prop_assert_eq!(
            fake.union(&active).cloned().collect::<HashSet<_>>(),
            park.all_drivers.clone()
        );
    }

    #[test]
    fn zero_threshold_returns_every_passenger(park in park_strategy()) {
        prop_assert_eq!(park.find_faithful_passengers(0), park.all_passengers.clone());
    }

    #[test]
    fn faithful_passengers_shrink_as_threshold_grows(park in park_strategy()) {
        for min_trips in 0..6 {
            let looser = park.find_faithful_passengers(min_trips);
            let stricter = park.find_faithful_passengers(min_trips + 1);
            prop_assert!(stricter.is_subset(&looser), "threshold {}", min_trips);
        }
    }

    #[test]
    fn negative_threshold_returns_passengers_who_rode(park in park_strategy()) {
        let riders: HashSet<_> = park
            .trips
            .iter()
            .flat_map(|trip| trip.passengers.iter().cloned())
            .collect();

        prop_assert_eq!(park.find_faithful_passengers(-3), riders);
    }

    #[test]
    fn unknown_driver_has_no_frequent_passengers(park in park_strategy()) {
        prop_assert!(park.find_frequent_passengers(&numbered_driver(99)).is_empty());
    }

    #[test]
    fn frequent_passengers_rode_with_the_driver_twice(park in park_strategy()) {
        for driver in park.sorted_drivers() {
            for passenger in park.find_frequent_passengers(&driver) {
                let rides = park
                    .trips
                    .iter()
                    .filter(|trip| trip.is_driven_by(&driver) && trip.carries(&passenger))
                    .count();
                prop_assert!(rides > 1);
            }
        }
    }

    #[test]
    fn smart_passengers_have_trips(park in park_strategy()) {
        for passenger in park.find_smart_passengers() {
            let (discounted, total) = park
                .trips
                .iter()
                .filter(|trip| trip.carries(&passenger))
                .fold((0, 0), |(discounted, total), trip| {
                    (discounted + usize::from(trip.has_discount()), total + 1)
                });
            prop_assert!(total > 0);
            prop_assert!(discounted * 2 > total);
        }
    }

    #[test]
    fn busiest_period_holds_the_most_trips(park in park_strategy()) {
        let count_in = |start: u32| {
            park.trips
                .iter()
                .filter(|trip| (start..start + 10).contains(&trip.duration))
                .count()
        };

        match park.find_the_most_frequent_trip_duration_period() {
            None => prop_assert!(park.trips.is_empty()),
            Some(period) => {
                prop_assert_eq!(*period.end(), period.start() + 9);
                prop_assert_eq!(period.start() % 10, 0);

                let best = count_in(*period.start());
                prop_assert!(best > 0);

                let longest = park.trips.iter().map(|trip| trip.duration).max().unwrap_or(0);
                for start in (0..=longest).step_by(10) {
                    prop_assert!(count_in(start) <= best);
                }
            }
        }
    }

    #[test]
    fn pareto_needs_drivers_and_trips(park in park_strategy()) {
        if park.all_drivers.len() < 5 || park.trips.is_empty() {
            prop_assert!(!park.check_pareto_principle());
        }
    }
}

#[test]
fn single_twenty_minute_trip_lands_in_its_period() {
    let park = TaxiParkBuilder::numbered(1..=3, 1..=5)
        .trip("D-1", ["P-1"], 20, 10.0, None)
        .build()
        .unwrap();

    assert_eq!(park.find_the_most_frequent_trip_duration_period(), Some(20..=29));
}

#[test]
fn queries_agree_on_a_mixed_park() {
    let park = TaxiParkBuilder::numbered(1..=5, 1..=4)
        .trip("D-1", ["P-1", "P-2"], 12, 40.0, Some(0.1))
        .trip("D-1", ["P-1"], 14, 30.0, Some(0.2))
        .trip("D-1", ["P-3"], 31, 10.0, None)
        .trip("D-2", ["P-2"], 8, 5.0, None)
        .build()
        .unwrap();

    assert_eq!(park.find_fake_drivers().len(), 3);
    assert_eq!(
        park.find_frequent_passengers(&numbered_driver(1)),
        HashSet::from([Arc::new(numbered_passenger(1))])
    );
    assert_eq!(
        park.find_smart_passengers(),
        HashSet::from([Arc::new(numbered_passenger(1))])
    );
    assert_eq!(park.find_the_most_frequent_trip_duration_period(), Some(10..=19));
    // D-1 earns 80 of 85.
    assert!(park.check_pareto_principle());
}
