use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParkError {
    #[error("Trip #{trip} is driven by {driver:?}, who is not on the driver roster")]
    UnknownDriver { driver: String, trip: usize },

    #[error("Trip #{trip} carries {passenger:?}, who is not on the passenger roster")]
    UnknownPassenger { passenger: String, trip: usize },

    #[error("Trip #{trip} has no passengers")]
    NoPassengers { trip: usize },

    #[error("Trip #{trip} has an invalid cost {cost}")]
    InvalidCost { cost: f64, trip: usize },

    #[error("Trip #{trip} has discount {discount}, expected a fraction in (0, 1]")]
    InvalidDiscount { discount: f64, trip: usize },

    #[error("Failed to read park data")]
    Csv(#[from] csv::Error),
}
