use clap::{Parser, Subcommand};
use geohash_rs::{
    CsvHashConfig, GeoHash, GeohashError, GeometryFormat, MAX_PRECISION, ServiceConfig,
    csv_to_geohash_csv, encode_with_precision, serve,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geohash", version, about = "Encode and decode geohashes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a latitude/longitude pair
    Encode {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        #[arg(short, long, default_value_t = MAX_PRECISION)]
        precision: u8,
    },
    /// Decode a geohash to its bounding box
    Decode { hash: String },
    /// Add a geohash column to a CSV file with longitude/latitude columns
    Csv {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "lon")]
        lon_col: String,
        #[arg(long, default_value = "lat")]
        lat_col: String,
        #[arg(short, long, default_value_t = MAX_PRECISION)]
        precision: u8,
        /// Also write each cell's box as WKT
        #[arg(long)]
        with_box: bool,
    },
    /// Run the HTTP service
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
        /// Precision for encode requests without `pre`
        #[arg(short, long, default_value_t = MAX_PRECISION)]
        precision: u8,
    },
}

#[tokio::main]
async fn main() -> Result<(), GeohashError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Cli::parse().command {
        Command::Encode {
            lat,
            lon,
            precision,
        } => {
            println!("{}", encode_with_precision(&(lon, lat), precision)?);
        }
        Command::Decode { hash } => {
            let cell = GeoHash::from_hash(&hash)?;
            let json = serde_json::to_string_pretty(&cell)
                .map_err(|e| GeohashError::IoError(e.to_string()))?;
            println!("{}", json);
        }
        Command::Csv {
            input,
            output,
            lon_col,
            lat_col,
            precision,
            with_box,
        } => {
            let mut config = CsvHashConfig::from_coords(lon_col, lat_col, precision);
            if with_box {
                config = config.with_box_geometry(GeometryFormat::Wkt);
            }
            let rows = csv_to_geohash_csv(&input, &output, &config)?;
            println!("Wrote {} rows to {}", rows, output.display());
        }
        Command::Serve { bind, precision } => {
            let config = ServiceConfig::default().bind(bind).default_precision(precision);
            serve(config).await?;
        }
    }

    Ok(())
}
