use crate::core::alphabet::char_index;
use crate::core::constants::{BASE32_ALPHABET, BITS_PER_CHAR, MAX_PRECISION};
use crate::core::geometry::GeoBox;
use crate::util::coord::Coordinate;
use crate::util::error::GeohashError;
use crate::util::validate::{validate_hash, validate_point, validate_precision};
use geo_types::Point;

/// Axis narrowed by the current bit. Bit 0 is a longitude turn and turns
/// strictly alternate from there across the whole bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Longitude,
    Latitude,
}

impl Turn {
    fn flip(self) -> Self {
        match self {
            Turn::Longitude => Turn::Latitude,
            Turn::Latitude => Turn::Longitude,
        }
    }
}

/// Running bounds shared by the encoder and the decoder.
struct Bounds(GeoBox);

impl Bounds {
    fn world() -> Self {
        Bounds(GeoBox::WORLD)
    }

    fn midpoint(&self, turn: Turn) -> f64 {
        match turn {
            Turn::Longitude => (self.0.lon_min + self.0.lon_max) / 2.0,
            Turn::Latitude => (self.0.lat_min + self.0.lat_max) / 2.0,
        }
    }

    /// Halves the active axis, keeping the upper half when `upper` is set.
    fn bisect(&mut self, turn: Turn, upper: bool) {
        let mid = self.midpoint(turn);
        let (min, max) = match turn {
            Turn::Longitude => (&mut self.0.lon_min, &mut self.0.lon_max),
            Turn::Latitude => (&mut self.0.lat_min, &mut self.0.lat_max),
        };
        if upper {
            *min = mid;
        } else {
            *max = mid;
        }
    }
}

/// Encodes a coordinate as a geohash of `precision` characters.
///
/// Values exactly on a midpoint go to the upper half at every step.
///
/// # Example
/// ```
/// use geohash_rs::encode_with_precision;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// // (lon, lat)
/// let hash = encode_with_precision(&(0.119, 52.205), 7)?;
/// assert_eq!(hash, "u120fxw");
/// # Ok(())
/// # }
/// ```
pub fn encode_with_precision<C: Coordinate>(
    coord: &C,
    precision: u8,
) -> Result<String, GeohashError> {
    validate_point(coord)?;
    validate_precision(precision)?;

    let mut hash = String::with_capacity(precision as usize);
    let mut bounds = Bounds::world();
    let mut turn = Turn::Longitude;

    for _ in 0..precision {
        let mut idx = 0u8;
        for _ in 0..BITS_PER_CHAR {
            let value = match turn {
                Turn::Longitude => coord.lon(),
                Turn::Latitude => coord.lat(),
            };
            let upper = value >= bounds.midpoint(turn);
            bounds.bisect(turn, upper);
            idx = (idx << 1) | upper as u8;
            turn = turn.flip();
        }
        hash.push(BASE32_ALPHABET[idx as usize] as char);
    }

    Ok(hash)
}

/// Encodes a coordinate at the maximum precision of 12 characters.
pub fn encode<C: Coordinate>(coord: &C) -> Result<String, GeohashError> {
    encode_with_precision(coord, MAX_PRECISION)
}

/// Decodes a geohash into the box of every point that encodes to it.
///
/// Case-insensitive. The empty string is rejected with
/// [`GeohashError::EmptyHash`].
///
/// # Example
/// ```
/// use geohash_rs::decode_to_box;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let bbox = decode_to_box("u120fxw")?;
/// assert!(bbox.contains(&(0.119, 52.205)));
/// # Ok(())
/// # }
/// ```
pub fn decode_to_box(hash: &str) -> Result<GeoBox, GeohashError> {
    validate_hash(hash)?;
    if hash.is_empty() {
        return Err(GeohashError::EmptyHash);
    }

    let mut bounds = Bounds::world();
    let mut turn = Turn::Longitude;

    for c in hash.chars() {
        let idx = char_index(c).ok_or(GeohashError::InvalidCharacter(c))?;
        for n in (0..BITS_PER_CHAR).rev() {
            bounds.bisect(turn, (idx >> n) & 1 == 1);
            turn = turn.flip();
        }
    }

    Ok(bounds.0)
}

/// Decodes a geohash to the center of its box (x = longitude, y = latitude).
pub fn decode_to_point(hash: &str) -> Result<Point<f64>, GeohashError> {
    decode_to_box(hash).map(|bbox| bbox.center())
}
