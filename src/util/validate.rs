use crate::core::alphabet::char_index;
use crate::core::constants::{LAT_RANGE, LON_RANGE, MAX_PRECISION};
use crate::util::coord::Coordinate;
use crate::util::error::GeohashError;

/// Checks that a coordinate lies within the WGS84 domain, extremes included.
///
/// NaN values fail the check.
pub fn validate_point<C: Coordinate>(coord: &C) -> Result<(), GeohashError> {
    let (lat, lon) = (coord.lat(), coord.lon());
    if !(LAT_RANGE[0]..=LAT_RANGE[1]).contains(&lat)
        || !(LON_RANGE[0]..=LON_RANGE[1]).contains(&lon)
    {
        return Err(GeohashError::InvalidPoint { lat, lon });
    }
    Ok(())
}

/// Checks that a precision is within `1..=12`.
pub fn validate_precision(precision: u8) -> Result<(), GeohashError> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(GeohashError::InvalidPrecision(precision.into()));
    }
    Ok(())
}

/// Narrows an integer precision from an outer surface (query string, JSON)
/// to the codec's `u8`. Values outside `1..=12` are `InvalidPrecision`.
pub fn precision_from_int(value: i64) -> Result<u8, GeohashError> {
    u8::try_from(value)
        .ok()
        .filter(|&p| validate_precision(p).is_ok())
        .ok_or(GeohashError::InvalidPrecision(value))
}

/// Checks that a hash is at most 12 characters drawn from the base-32
/// alphabet, ignoring case. The empty string passes.
pub fn validate_hash(hash: &str) -> Result<(), GeohashError> {
    let len = hash.chars().count();
    if len > MAX_PRECISION as usize {
        return Err(GeohashError::HashTooLong(len));
    }
    match hash.chars().find(|&c| char_index(c).is_none()) {
        Some(c) => Err(GeohashError::InvalidCharacter(c)),
        None => Ok(()),
    }
}
