use crate::core::constants::{LAT_RANGE, LON_RANGE};
use crate::util::coord::Coordinate;
use geo_types::{LineString, Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// The rectangular region a geohash represents, in WGS84 degrees.
///
/// Invariant: `lat_min <= lat_max` and `lon_min <= lon_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBox {
    /// The whole WGS84 domain.
    pub const WORLD: GeoBox = GeoBox {
        lat_min: LAT_RANGE[0],
        lat_max: LAT_RANGE[1],
        lon_min: LON_RANGE[0],
        lon_max: LON_RANGE[1],
    };

    /// Midpoint of the box as a `Point` (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.lon_min + self.lon_max) / 2.0,
            (self.lat_min + self.lat_max) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Returns true when the coordinate lies inside the box, edges included.
    pub fn contains<C: Coordinate>(&self, coord: &C) -> bool {
        (self.lat_min..=self.lat_max).contains(&coord.lat())
            && (self.lon_min..=self.lon_max).contains(&coord.lon())
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.lon_min, y: self.lat_min },
            coord! { x: self.lon_max, y: self.lat_max },
        )
    }

    /// Converts the box to a closed counter-clockwise polygon ring.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let coords = vec![
            (self.lon_min, self.lat_min),
            (self.lon_max, self.lat_min),
            (self.lon_max, self.lat_max),
            (self.lon_min, self.lat_max),
            (self.lon_min, self.lat_min),
        ];
        Polygon::new(LineString::from(coords), vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_box() -> GeoBox {
        GeoBox {
            lat_min: 10.0,
            lat_max: 20.0,
            lon_min: -5.0,
            lon_max: 5.0,
        }
    }

    #[test]
    fn test_world_box() {
        let world = GeoBox::WORLD;
        assert_eq!(world.lat_span(), 180.0);
        assert_eq!(world.lon_span(), 360.0);
        assert_eq!(world.center(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_contains_edges() {
        let b = sample_box();
        assert!(b.contains(&(-5.0, 10.0)));
        assert!(b.contains(&(5.0, 20.0)));
        assert!(!b.contains(&(5.1, 15.0)));
        assert!(!b.contains(&(0.0, 9.9)));
    }

    #[test]
    fn test_to_polygon() {
        let b = sample_box();
        let poly = b.to_polygon();
        let exterior = poly.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
    }

    #[test]
    fn test_to_rect() {
        let b = sample_box();
        let rect = b.to_rect();
        assert_eq!(rect.min(), coord! { x: -5.0, y: 10.0 });
        assert_eq!(rect.max(), coord! { x: 5.0, y: 20.0 });
    }

    #[test]
    fn test_json_field_names() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(GeoBox::WORLD)?;
        assert_eq!(json["latMin"], -90.0);
        assert_eq!(json["lonMax"], 180.0);
        Ok(())
    }
}
