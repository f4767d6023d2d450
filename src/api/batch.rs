//! Parallel encode/decode over slices.
//!
//! Items are independent, so work is spread with rayon. Results always come
//! back in input order.

use crate::core::codec::{decode_to_box, encode_with_precision};
use crate::core::geometry::GeoBox;
use crate::util::error::GeohashError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One item of a batch encode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub lat: f64,
    pub lon: f64,
    pub precision: u8,
}

impl EncodeRequest {
    pub fn new(lat: f64, lon: f64, precision: u8) -> Self {
        Self {
            lat,
            lon,
            precision,
        }
    }
}

/// Encodes every request, keeping a per-item result.
pub fn encode_batch(requests: &[EncodeRequest]) -> Vec<Result<String, GeohashError>> {
    debug!(items = requests.len(), "encoding batch");
    requests
        .par_iter()
        .map(|r| encode_with_precision(&(r.lon, r.lat), r.precision))
        .collect()
}

/// Decodes every hash, keeping a per-item result.
pub fn decode_batch<S>(hashes: &[S]) -> Vec<Result<GeoBox, GeohashError>>
where
    S: AsRef<str> + Sync,
{
    debug!(items = hashes.len(), "decoding batch");
    hashes.par_iter().map(|h| decode_to_box(h.as_ref())).collect()
}

/// Encodes every request or fails with the first error in input order.
pub fn try_encode_batch(requests: &[EncodeRequest]) -> Result<Vec<String>, GeohashError> {
    encode_batch(requests).into_iter().collect()
}

/// Decodes every hash or fails with the first error in input order.
pub fn try_decode_batch<S>(hashes: &[S]) -> Result<Vec<GeoBox>, GeohashError>
where
    S: AsRef<str> + Sync,
{
    decode_batch(hashes).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_batch_preserves_order() -> Result<(), GeohashError> {
        let requests: Vec<EncodeRequest> = (0..500)
            .map(|i| EncodeRequest::new(-89.0 + i as f64 * 0.35, -179.0 + i as f64 * 0.7, 8))
            .collect();

        let hashes = try_encode_batch(&requests)?;
        assert_eq!(hashes.len(), requests.len());

        for (req, hash) in requests.iter().zip(&hashes) {
            assert_eq!(hash, &encode_with_precision(&(req.lon, req.lat), req.precision)?);
        }
        Ok(())
    }

    #[test]
    fn test_encode_batch_keeps_item_errors() {
        let requests = vec![
            EncodeRequest::new(52.205, 0.119, 7),
            EncodeRequest::new(140.2, 14.51, 7),
            EncodeRequest::new(52.205, 0.119, 13),
        ];

        let results = encode_batch(&requests);
        assert_eq!(results[0], Ok("u120fxw".to_string()));
        assert!(matches!(results[1], Err(GeohashError::InvalidPoint { .. })));
        assert_eq!(results[2], Err(GeohashError::InvalidPrecision(13)));
    }

    #[test]
    fn test_try_encode_batch_returns_first_error() {
        let requests = vec![
            EncodeRequest::new(52.205, 0.119, 0),
            EncodeRequest::new(140.2, 14.51, 7),
        ];
        assert_eq!(
            try_encode_batch(&requests),
            Err(GeohashError::InvalidPrecision(0))
        );
    }

    #[test]
    fn test_decode_batch() -> Result<(), GeohashError> {
        let hashes = ["u120fxw", "U120FXW", "zjtptsj2vn"];
        let boxes = try_decode_batch(&hashes)?;

        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0], boxes[1]);
        assert!(boxes[2].contains(&(142.28038, 77.27799)));
        Ok(())
    }

    #[test]
    fn test_decode_batch_with_owned_strings() {
        let hashes = vec!["gcpvj".to_string(), "abc".to_string(), String::new()];
        let results = decode_batch(&hashes);

        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(GeohashError::InvalidCharacter('a')));
        assert_eq!(results[2], Err(GeohashError::EmptyHash));
    }

    #[test]
    fn test_empty_batch() {
        let empty: [EncodeRequest; 0] = [];
        assert_eq!(try_encode_batch(&empty), Ok(vec![]));
    }
}
