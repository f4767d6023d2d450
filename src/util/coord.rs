use geo_types::Point;

/// Trait for types that can provide a WGS84 longitude/latitude pair.
///
/// Implemented for `(f64, f64)` tuples in `(lon, lat)` order and
/// `geo_types::Point<f64>` (x = longitude, y = latitude), so functions can
/// accept either type.
pub trait Coordinate {
    /// Returns the longitude in degrees.
    fn lon(&self) -> f64;
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (0.119, 52.205);
        assert_eq!(tuple.lon(), 0.119);
        assert_eq!(tuple.lat(), 52.205);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(0.119, 52.205);
        assert_eq!(Coordinate::lon(&point), 0.119);
        assert_eq!(Coordinate::lat(&point), 52.205);
    }
}
