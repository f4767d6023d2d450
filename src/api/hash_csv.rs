use crate::api::geohash::GeoHash;
use crate::util::error::GeohashError;
use geo::Centroid;
use geo_types::{Geometry, Point};
use geojson::GeoJson;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use wkt::Wkt;

/// Resolved column positions for the configured source.
enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

/// Output format for cell box geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in WGS84
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to geohash conversion.
#[derive(Debug, Clone)]
pub struct CsvHashConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub precision: u8,
    pub include_box_geometry: Option<GeometryFormat>,
}

impl CsvHashConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvHashConfig;
    ///
    /// let config = CsvHashConfig::new("geometry", 9);
    /// ```
    pub fn new(geometry_column: impl Into<String>, precision: u8) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            precision,
            include_box_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvHashConfig;
    ///
    /// let config = CsvHashConfig::from_coords("Longitude", "Latitude", 9);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        precision: u8,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            precision,
            include_box_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Include the cell box geometry in output.
    pub fn with_box_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_box_geometry = Some(format);
        self
    }
}

pub trait CsvToGeohash {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvHashConfig,
    ) -> Result<usize, GeohashError>;
}

impl<P: AsRef<Path>> CsvToGeohash for P {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvHashConfig,
    ) -> Result<usize, GeohashError> {
        csv_to_geohash_csv(self, output_path, config)
    }
}

fn geometry_err(e: impl std::fmt::Display) -> GeohashError {
    GeohashError::GeometryParseError(e.to_string())
}

fn csv_err(e: impl std::fmt::Display) -> GeohashError {
    GeohashError::CsvError(e.to_string())
}

/// Parses a geometry string. GeoJSON is detected by a leading `{`,
/// everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let trimmed = s.trim();
    if !trimmed.starts_with('{') {
        let wkt = Wkt::<f64>::from_str(trimmed).map_err(geometry_err)?;
        return wkt
            .try_into()
            .map_err(|_| geometry_err("WKT has no geometry representation"));
    }

    let geometry = match trimmed.parse::<GeoJson>().map_err(geometry_err)? {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| geometry_err("Feature has no geometry"))?,
        GeoJson::FeatureCollection(_) => {
            return Err(geometry_err(
                "FeatureCollection not supported, use individual geometries",
            ));
        }
    };
    Geometry::try_from(geometry).map_err(geometry_err)
}

/// Cells covering the geometry's representative points: points and line
/// vertices directly, polygons by centroid. Duplicates are dropped, first
/// occurrence wins.
fn geometry_to_geohashes(
    geom: &Geometry<f64>,
    precision: u8,
) -> Result<Vec<GeoHash>, GeohashError> {
    let mut points = Vec::new();
    collect_points(geom, &mut points)?;

    let mut seen = HashSet::with_capacity(points.len());
    let mut cells = Vec::with_capacity(points.len());
    for pt in points {
        let cell = GeoHash::from_wgs84(&pt, precision)?;
        if seen.insert(cell.hash.clone()) {
            cells.push(cell);
        }
    }
    Ok(cells)
}

fn collect_points(
    geom: &Geometry<f64>,
    out: &mut Vec<Point<f64>>,
) -> Result<(), GeohashError> {
    match geom {
        Geometry::Point(pt) => out.push(*pt),
        Geometry::MultiPoint(mp) => out.extend(mp.0.iter().copied()),
        Geometry::LineString(line) => out.extend(line.points()),
        Geometry::MultiLineString(mls) => {
            for line in &mls.0 {
                out.extend(line.points());
            }
        }
        Geometry::Polygon(poly) => out.extend(poly.centroid()),
        Geometry::MultiPolygon(mp) => out.extend(mp.0.iter().filter_map(|p| p.centroid())),
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                collect_points(g, out)?;
            }
        }
        _ => return Err(geometry_err("Unsupported geometry type")),
    }
    Ok(())
}

fn box_to_string(cell: &GeoHash, format: GeometryFormat) -> String {
    let polygon = cell.to_polygon();
    match format {
        GeometryFormat::Wkt => {
            use wkt::ToWkt;
            polygon.wkt_string()
        }
        GeometryFormat::GeoJson => geojson::Geometry::from(&polygon).to_string(),
    }
}

/// Converts a CSV file with a geometry column or lon/lat columns to a CSV
/// whose rows are prefixed with a `geohash` column.
///
/// Streams row by row. A geometry that covers several cells yields one
/// output row per cell. Returns the number of rows written.
///
/// # Example
///
/// ```no_run
/// use geohash_rs::{csv_to_geohash_csv, CsvHashConfig, GeometryFormat};
///
/// let config = CsvHashConfig::from_coords("Longitude", "Latitude", 9)
///     .with_box_geometry(GeometryFormat::Wkt);
///
/// csv_to_geohash_csv("stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_geohash_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvHashConfig,
) -> Result<usize, GeohashError> {
    let csv_path = csv_path.as_ref();
    info!(path = %csv_path.display(), precision = config.precision, "converting CSV to geohashes");

    let file = File::open(csv_path).map_err(|e| GeohashError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| csv_err(format!("Column '{}' not found", name)))
    };

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = position(col.as_str())?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = position(lon_column.as_str())?;
            let lat_idx = position(lat_column.as_str())?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| GeohashError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geohash"];
    if config.include_box_geometry.is_some() {
        header_row.push("geohash_geometry");
    }
    header_row.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude_indices.contains(i))
            .map(|(_, h)| h),
    );
    writer.write_record(&header_row).map_err(csv_err)?;

    let mut written = 0;
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let field = |idx: usize| {
            record
                .get(idx)
                .map(str::trim)
                .ok_or_else(|| csv_err(format!("Missing field {} on record {}", idx, line + 1)))
        };

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom = parse_geometry(field(*idx)?)?;
                geometry_to_geohashes(&geom, config.precision)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let parse = |idx: usize| {
                    let s = field(idx)?;
                    s.parse::<f64>()
                        .map_err(|_| csv_err(format!("Invalid coordinate: '{}'", s)))
                };
                let (lon, lat) = (parse(*lon_idx)?, parse(*lat_idx)?);
                vec![GeoHash::from_wgs84(&(lon, lat), config.precision)?]
            }
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.hash.clone()];
            if let Some(format) = config.include_box_geometry {
                row.push(box_to_string(&cell, format));
            }
            row.extend(
                record
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !exclude_indices.contains(i))
                    .map(|(_, f)| f.to_string()),
            );
            writer.write_record(&row).map_err(csv_err)?;
            written += 1;
        }
    }

    writer.flush().map_err(csv_err)?;
    debug!(rows = written, "CSV conversion finished");

    Ok(written)
}
