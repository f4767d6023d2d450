/// Geohash base-32 alphabet (digits plus lowercase letters without a, i, l, o)
pub const BASE32_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Bits carried by one hash character
pub const BITS_PER_CHAR: usize = 5;

/// Maximum hash length (60 bits)
pub const MAX_PRECISION: u8 = 12;

/// Latitude domain [min, max]
pub const LAT_RANGE: [f64; 2] = [-90.0, 90.0];

/// Longitude domain [min, max]
pub const LON_RANGE: [f64; 2] = [-180.0, 180.0];
