pub mod alphabet;
pub mod codec;
pub mod constants;
pub mod geometry;

pub use alphabet::{char_index, index_char};
pub use codec::{decode_to_box, decode_to_point, encode, encode_with_precision};
pub use constants::{BASE32_ALPHABET, BITS_PER_CHAR, LAT_RANGE, LON_RANGE, MAX_PRECISION};
pub use geometry::GeoBox;
