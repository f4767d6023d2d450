use crate::api::geohash::GeoHash;
use crate::util::error::GeohashError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt8Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`GeoHash`] cells to Arrow arrays.
///
/// Implemented for `[GeoHash]` and `Vec<GeoHash>`.
pub trait GeoHashesToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cells to an Arrow PolygonArray of boxes.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with geohash, precision, lat, lon and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, GeohashError>;
}

impl GeoHashesToArrow for [GeoHash] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|c: &GeoHash| c.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, GeohashError> {
        let polygon_array = self.to_arrow_polygons();
        let hashes: StringArray = self.iter().map(|c| Some(c.hash.as_str())).collect();
        let precisions: UInt8Array = self.iter().map(|c| Some(c.precision)).collect();
        let lats: Float64Array = self.iter().map(|c| Some(c.center().y())).collect();
        let lons: Float64Array = self.iter().map(|c| Some(c.center().x())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("geohash", DataType::Utf8, false),
            Field::new("precision", DataType::UInt8, false),
            Field::new("lat", DataType::Float64, false),
            Field::new("lon", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(hashes),
                Arc::new(precisions),
                Arc::new(lats),
                Arc::new(lons),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| GeohashError::IoError(e.to_string()))
    }
}

impl GeoHashesToArrow for Vec<GeoHash> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, GeohashError> {
        self.as_slice().to_record_batch()
    }
}
