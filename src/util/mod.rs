pub mod coord;
pub mod error;
pub mod validate;

pub use coord::Coordinate;
pub use error::GeohashError;
pub use validate::{precision_from_int, validate_hash, validate_point, validate_precision};
