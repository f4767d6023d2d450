use crate::api::hash_arrow::GeoHashesToArrow;
use crate::api::hash_parquet::GeoHashesToGeoParquet;
use crate::core::codec::{decode_to_box, encode_with_precision};
use crate::core::geometry::GeoBox;
use crate::util::coord::Coordinate;
use crate::util::error::GeohashError;
use arrow_array::RecordBatch;
use geo_types::{Point, Polygon, Rect};
use geoarrow_array::array::{PointArray, PolygonArray};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A single geohash cell: the hash string together with the box it covers.
///
/// # Example
///
/// ```
/// use geohash_rs::GeoHash;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// // (lon, lat)
/// let cell = GeoHash::from_wgs84(&(0.119, 52.205), 7)?;
/// assert_eq!(cell.hash, "u120fxw");
///
/// let restored = GeoHash::from_hash("U120FXW")?;
/// assert_eq!(cell, restored);
///
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoHash {
    /// Lowercase geohash string
    pub hash: String,
    /// Region covered by the hash
    pub bbox: GeoBox,
    /// Number of characters in the hash (1-12)
    pub precision: u8,
}

impl GeoHash {
    /// Create the cell of the given precision containing a WGS84 (lon/lat) coordinate.
    pub fn from_wgs84(coord: &impl Coordinate, precision: u8) -> Result<Self, GeohashError> {
        let hash = encode_with_precision(coord, precision)?;
        let bbox = decode_to_box(&hash)?;

        Ok(Self {
            hash,
            bbox,
            precision,
        })
    }

    /// Create a cell from an existing hash string (case-insensitive).
    pub fn from_hash(hash: &str) -> Result<Self, GeohashError> {
        let bbox = decode_to_box(hash)?;

        Ok(Self {
            hash: hash.to_ascii_lowercase(),
            bbox,
            precision: hash.len() as u8,
        })
    }

    /// Returns the center of the cell (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        self.bbox.center()
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bbox.contains(coord)
    }

    /// The enclosing cell one character shorter, `None` at precision 1.
    pub fn parent(&self) -> Option<GeoHash> {
        if self.precision <= 1 {
            return None;
        }
        GeoHash::from_hash(&self.hash[..self.hash.len() - 1]).ok()
    }

    pub fn to_rect(&self) -> Rect<f64> {
        self.bbox.to_rect()
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` suitable for spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bbox.to_polygon()
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, GeohashError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeohashError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

impl fmt::Display for GeoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}
