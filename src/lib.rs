//! # geohash-rs
//!
//! Classic interleaved-bit geohashes: a coordinate is narrowed by alternating
//! longitude/latitude bisection and written out 5 bits per character in the
//! `0123456789bcdefghjkmnpqrstuvwxyz` alphabet. Decoding replays the same
//! bisections to recover the box the hash stands for.
//!
//! Coordinates are `geo_types::Point<f64>` or `(lon, lat)` tuples.
//!
//! ### 1. Codec functions
//!
//! ```
//! use geohash_rs::{decode_to_box, encode_with_precision};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let hash = encode_with_precision(&(0.119, 52.205), 7)?;
//! assert_eq!(hash, "u120fxw");
//!
//! let bbox = decode_to_box(&hash)?;
//! assert!(bbox.contains(&(0.119, 52.205)));
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GeoHash` - Single Cell Operations
//!
//! ```
//! use geohash_rs::GeoHash;
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let cell = GeoHash::from_wgs84(&(-2.248, 53.481), 9)?;
//! println!("{} centered at {:?}", cell, cell.center());
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Batches and files
//!
//! ```no_run
//! use geohash_rs::{CsvHashConfig, CsvToGeohash, EncodeRequest, try_encode_batch};
//!
//! let hashes = try_encode_batch(&[
//!     EncodeRequest::new(52.205, 0.119, 7),
//!     EncodeRequest::new(53.481, -2.248, 7),
//! ])
//! .unwrap();
//!
//! let config = CsvHashConfig::from_coords("Longitude", "Latitude", 9);
//! "input.csv".to_geohash_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod server;
pub mod util;

pub use api::{
    CoordinateSource, CsvHashConfig, CsvToGeohash, EncodeRequest, GeoHash, GeoHashesToArrow,
    GeoHashesToGeoParquet, GeoParquetSink, GeometryFormat, csv_to_geohash_csv, decode_batch,
    encode_batch, parse_geometry, try_decode_batch, try_encode_batch, write_geoparquet,
};
pub use crate::core::{
    BASE32_ALPHABET, BITS_PER_CHAR, GeoBox, LAT_RANGE, LON_RANGE, MAX_PRECISION, char_index,
    decode_to_box, decode_to_point, encode, encode_with_precision, index_char,
};
pub use server::{ServiceConfig, router, serve};
pub use util::{
    Coordinate, GeohashError, precision_from_int, validate_hash, validate_point,
    validate_precision,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), GeohashError> {
        let pt = point! { x: 0.119, y: 52.205 };

        let hash = encode_with_precision(&pt, 7)?;
        assert_eq!(hash, "u120fxw");

        let cell = GeoHash::from_hash(&hash.to_uppercase())?;
        assert_eq!(cell.hash, hash);
        assert!(cell.contains(&pt));

        let center = decode_to_point(&hash)?;
        assert_eq!(encode_with_precision(&center, 7)?, hash);

        let polygon = cell.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_hash_prefixes_nest() -> Result<(), GeohashError> {
        let full = encode(&(151.2093, -33.8688))?;
        for p in 1..=MAX_PRECISION {
            let shorter = encode_with_precision(&(151.2093, -33.8688), p)?;
            assert!(full.starts_with(&shorter));
        }
        Ok(())
    }

    #[test]
    fn test_batch_matches_single_calls() -> Result<(), GeohashError> {
        let requests = [
            EncodeRequest::new(52.205, 0.119, 7),
            EncodeRequest::new(77.27799, 142.28038, 10),
        ];
        let hashes = try_encode_batch(&requests)?;
        let boxes = try_decode_batch(&hashes)?;

        for ((req, hash), bbox) in requests.iter().zip(&hashes).zip(&boxes) {
            assert_eq!(hash, &encode_with_precision(&(req.lon, req.lat), req.precision)?);
            assert!(bbox.contains(&(req.lon, req.lat)));
        }
        Ok(())
    }

    #[test]
    fn test_validation_examples() {
        assert_eq!(validate_point(&(23.41, 40.23)), Ok(()));
        assert!(validate_point(&(14.51, 140.2)).is_err());
        assert!(validate_point(&(245.51, 20.2)).is_err());
        assert_eq!(validate_hash("u120fxwu120fx"), Err(GeohashError::HashTooLong(13)));
        assert_eq!(validate_hash("a"), Err(GeohashError::InvalidCharacter('a')));
    }
}
