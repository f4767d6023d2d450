//! GeoParquet export for geohash cells.
//!
//! Cells are converted to Arrow in chunks and streamed through one
//! [`GeoParquetSink`], so the whole set never has to sit in a single batch.

use crate::api::geohash::GeoHash;
use crate::api::hash_arrow::GeoHashesToArrow;
use crate::util::error::GeohashError;
use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Rows per record batch when exporting cell slices.
pub const CHUNK_ROWS: usize = 65_536;

fn io_err(e: impl std::fmt::Display) -> GeohashError {
    GeohashError::IoError(e.to_string())
}

/// Streams record batches with a geoarrow geometry column into any writer
/// as GeoParquet (WKB geometry). The `geo` metadata, including the bbox
/// over every batch written, is attached by [`GeoParquetSink::finish`].
pub struct GeoParquetSink<W: Write + Send> {
    encoder: GeoParquetRecordBatchEncoder,
    writer: ArrowWriter<W>,
    rows: usize,
}

impl<W: Write + Send> GeoParquetSink<W> {
    pub fn try_new(sink: W, schema: &SchemaRef) -> Result<Self, GeohashError> {
        let options = GeoParquetWriterOptionsBuilder::default()
            .set_encoding(GeoParquetWriterEncoding::WKB)
            .build();
        let encoder = GeoParquetRecordBatchEncoder::try_new(schema, &options).map_err(io_err)?;
        let writer = ArrowWriter::try_new(sink, encoder.target_schema(), None).map_err(io_err)?;

        Ok(Self {
            encoder,
            writer,
            rows: 0,
        })
    }

    pub fn write(&mut self, batch: &RecordBatch) -> Result<(), GeohashError> {
        let encoded = self.encoder.encode_record_batch(batch).map_err(io_err)?;
        self.writer.write(&encoded).map_err(io_err)?;
        self.rows += batch.num_rows();
        Ok(())
    }

    /// Writes the footer and returns the number of rows written.
    pub fn finish(mut self) -> Result<usize, GeohashError> {
        let kv_metadata = self.encoder.into_keyvalue().map_err(io_err)?;
        self.writer.append_key_value_metadata(kv_metadata);
        self.writer.finish().map_err(io_err)?;
        Ok(self.rows)
    }
}

/// Writes a single RecordBatch to `sink` as GeoParquet.
pub fn write_geoparquet<W: Write + Send>(
    batch: &RecordBatch,
    sink: W,
) -> Result<usize, GeohashError> {
    let mut writer = GeoParquetSink::try_new(sink, &batch.schema())?;
    writer.write(batch)?;
    writer.finish()
}

pub trait GeoHashesToGeoParquet: GeoHashesToArrow {
    /// Writes the cells to a GeoParquet file at `path`.
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeohashError>;
}

impl GeoHashesToGeoParquet for [GeoHash] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeohashError> {
        let file = File::create(path.as_ref()).map_err(io_err)?;

        // The first chunk fixes the schema, even when there are no cells.
        let (head, rest) = self.split_at(self.len().min(CHUNK_ROWS));
        let first = head.to_record_batch()?;
        let mut sink = GeoParquetSink::try_new(file, &first.schema())?;
        sink.write(&first)?;
        for chunk in rest.chunks(CHUNK_ROWS) {
            sink.write(&chunk.to_record_batch()?)?;
        }

        let rows = sink.finish()?;
        debug!(rows, path = %path.as_ref().display(), "wrote geoparquet");
        Ok(())
    }
}

impl GeoHashesToGeoParquet for Vec<GeoHash> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeohashError> {
        self.as_slice().to_geoparquet(path)
    }
}
