pub mod data;
pub mod error;
pub mod logging;
pub mod park;
pub mod queries;
pub mod records;

pub use data::{Driver, Minutes, Passenger, TaxiPark, Trip};
pub use error::ParkError;
pub use park::TaxiParkBuilder;
