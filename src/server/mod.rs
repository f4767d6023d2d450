//! JSON-over-HTTP front end for the codec.
//!
//! ```text
//!   GET  /                           - Welcome text
//!   GET  /v1/health                  - Liveness check
//!   GET  /v1/encode/{lat},{lon}?pre= - Encode one point
//!   GET  /v1/decode/{hash}           - Decode one hash
//!   POST /v1/batchEncode             - Encode a JSON array of points
//!   POST /v1/batchDecode             - Decode a JSON array of hashes
//! ```

pub mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

use crate::core::constants::MAX_PRECISION;
use crate::util::error::GeohashError;
use crate::util::validate::validate_precision;

use routes::{batch_decode, batch_encode, decode_hash, encode_point, health, index, not_found};

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Socket address to listen on
    pub bind: SocketAddr,
    /// Precision used by `/v1/encode` when no `pre` query parameter is given
    pub default_precision: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            default_precision: MAX_PRECISION,
        }
    }
}

impl ServiceConfig {
    pub fn bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn default_precision(mut self, precision: u8) -> Self {
        self.default_precision = precision;
        self
    }
}

/// Builds the service router.
pub fn router(config: ServiceConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/v1/health", get(health))
        .route("/v1/encode/:coords", get(encode_point))
        .route("/v1/decode/:hash", get(decode_hash))
        .route("/v1/batchEncode", post(batch_encode))
        .route("/v1/batchDecode", post(batch_decode))
        .fallback(not_found)
        .with_state(Arc::new(config))
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(config: ServiceConfig) -> Result<(), GeohashError> {
    validate_precision(config.default_precision)?;

    let addr = config.bind;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| GeohashError::IoError(e.to_string()))?;

    info!(%addr, default_precision = config.default_precision, "geohash service listening");

    axum::serve(listener, router(config))
        .await
        .map_err(|e| GeohashError::IoError(e.to_string()))
}
