pub mod batch;
pub mod geohash;
pub mod hash_arrow;
pub mod hash_csv;
pub mod hash_parquet;

pub use batch::{EncodeRequest, decode_batch, encode_batch, try_decode_batch, try_encode_batch};
pub use geohash::GeoHash;
pub use hash_arrow::GeoHashesToArrow;
pub use hash_csv::{
    CoordinateSource, CsvHashConfig, CsvToGeohash, GeometryFormat, csv_to_geohash_csv,
    parse_geometry,
};
pub use hash_parquet::{GeoHashesToGeoParquet, GeoParquetSink, write_geoparquet};
