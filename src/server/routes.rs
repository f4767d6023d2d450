//! HTTP route handlers for the geohash service.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::batch::{EncodeRequest, try_decode_batch, try_encode_batch};
use crate::core::codec::{decode_to_box, encode_with_precision};
use crate::core::geometry::GeoBox;
use crate::server::ServiceConfig;
use crate::util::error::GeohashError;
use crate::util::validate::{precision_from_int, validate_point};

pub type AppState = Arc<ServiceConfig>;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// REQUEST / RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EncodeParams {
    pub pre: Option<String>,
}

/// Batch encode item as it arrives on the wire. The precision is a plain
/// integer so that out-of-range values surface as `InvalidPrecision`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EncodeItem {
    pub lat: f64,
    pub lon: f64,
    pub precision: i64,
}

impl TryFrom<EncodeItem> for EncodeRequest {
    type Error = GeohashError;

    fn try_from(item: EncodeItem) -> Result<Self, Self::Error> {
        validate_point(&(item.lon, item.lat))?;
        let precision = precision_from_int(item.precision)?;
        Ok(EncodeRequest::new(item.lat, item.lon, precision))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecodeRequest {
    pub geohash: String,
}

#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub query: String,
    pub lat: f64,
    pub lon: f64,
    pub precision: u8,
    pub geohash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResponse {
    pub input_geohash: String,
    pub lat: f64,
    pub lon: f64,
    pub bounding_box: GeoBox,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse<T> {
    pub query: String,
    pub results: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub query: String,
    pub errors: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub alive: String,
}

fn error_response(
    status: StatusCode,
    query: impl Into<String>,
    errors: impl Into<String>,
) -> ApiError {
    let (query, errors) = (query.into(), errors.into());
    warn!(%status, query = %query, "{}", errors);
    (status, Json(ErrorResponse { query, errors }))
}

fn codec_error(query: impl Into<String>, err: GeohashError) -> ApiError {
    error_response(
        StatusCode::BAD_REQUEST,
        query,
        format!("The request returned an error : {}", err),
    )
}

fn internal_error(query: impl Into<String>, err: tokio::task::JoinError) -> ApiError {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, query, err.to_string())
}

fn decode_response(input: String, bbox: GeoBox) -> DecodeResponse {
    let center = bbox.center();
    DecodeResponse {
        input_geohash: input,
        lat: center.y(),
        lon: center.x(),
        bounding_box: bbox,
    }
}

// ============================================================================
// SINGLE ITEM ENDPOINTS
// ============================================================================

/// GET /v1/encode/{lat},{lon}[?pre=N]
///
/// Precision defaults to the service's configured default.
pub async fn encode_point(
    State(config): State<AppState>,
    Path(coords): Path<String>,
    Query(params): Query<EncodeParams>,
    uri: Uri,
) -> Result<Json<EncodeResponse>, ApiError> {
    let query = uri.to_string();

    let parse = |s: &str| s.trim().parse::<f64>().ok();
    let parsed = coords
        .split_once(',')
        .and_then(|(lat, lon)| Some((parse(lat)?, parse(lon)?)));
    let Some((lat, lon)) = parsed else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            query,
            "Provided Latitude or Longitude could not be parsed as a float",
        ));
    };

    let requested = match params.pre {
        None => i64::from(config.default_precision),
        Some(pre) => pre.trim().parse::<i64>().map_err(|_| {
            error_response(
                StatusCode::BAD_REQUEST,
                query.clone(),
                "Could not parse provided precision as a valid integer",
            )
        })?,
    };
    validate_point(&(lon, lat)).map_err(|e| codec_error(query.clone(), e))?;
    let precision = precision_from_int(requested).map_err(|e| codec_error(query.clone(), e))?;

    let geohash =
        encode_with_precision(&(lon, lat), precision).map_err(|e| codec_error(query.clone(), e))?;
    debug!(lat, lon, precision, %geohash, "encoded");

    Ok(Json(EncodeResponse {
        query,
        lat,
        lon,
        precision,
        geohash,
    }))
}

/// GET /v1/decode/{hash}
pub async fn decode_hash(Path(hash): Path<String>) -> Result<Json<DecodeResponse>, ApiError> {
    let bbox = decode_to_box(&hash).map_err(|e| codec_error(hash.clone(), e))?;
    debug!(%hash, "decoded");
    Ok(Json(decode_response(hash, bbox)))
}

// ============================================================================
// BATCH ENDPOINTS
// ============================================================================

/// POST /v1/batchEncode
///
/// Body: `[{"lat": f64, "lon": f64, "precision": int}, ...]`. Any invalid
/// item fails the whole request.
pub async fn batch_encode(body: String) -> Result<Json<BatchResponse<EncodeResponse>>, ApiError> {
    let items: Vec<EncodeItem> = serde_json::from_str(&body).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            body.clone(),
            "Could not unmarshal JSON into a valid format",
        )
    })?;
    let requests = items
        .into_iter()
        .map(EncodeRequest::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| codec_error(body.clone(), e))?;

    let (requests, hashes) = tokio::task::spawn_blocking(move || {
        let hashes = try_encode_batch(&requests);
        (requests, hashes)
    })
    .await
    .map_err(|e| internal_error(body.clone(), e))?;
    let hashes = hashes.map_err(|e| codec_error(body.clone(), e))?;

    let results = requests
        .into_iter()
        .zip(hashes)
        .map(|(r, geohash)| EncodeResponse {
            query: format!("{:.6},{:.6},{}", r.lat, r.lon, r.precision),
            lat: r.lat,
            lon: r.lon,
            precision: r.precision,
            geohash,
        })
        .collect();

    Ok(Json(BatchResponse {
        query: body,
        results,
    }))
}

/// POST /v1/batchDecode
///
/// Body: `[{"geohash": "..."}, ...]`. Any invalid item fails the whole request.
pub async fn batch_decode(body: String) -> Result<Json<BatchResponse<DecodeResponse>>, ApiError> {
    let requests: Vec<DecodeRequest> = serde_json::from_str(&body).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            body.clone(),
            "Could not unmarshal JSON into a valid format",
        )
    })?;
    let hashes: Vec<String> = requests.into_iter().map(|r| r.geohash).collect();

    let (hashes, boxes) = tokio::task::spawn_blocking(move || {
        let boxes = try_decode_batch(&hashes);
        (hashes, boxes)
    })
    .await
    .map_err(|e| internal_error(body.clone(), e))?;
    let boxes = boxes.map_err(|e| codec_error(body.clone(), e))?;

    let results = hashes
        .into_iter()
        .zip(boxes)
        .map(|(hash, bbox)| decode_response(hash, bbox))
        .collect();

    Ok(Json(BatchResponse {
        query: body,
        results,
    }))
}

// ============================================================================
// UTILITY ENDPOINTS
// ============================================================================

/// GET /
pub async fn index() -> &'static str {
    "Welcome home!"
}

/// GET /v1/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        alive: "true".to_string(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    error_response(StatusCode::NOT_FOUND, uri.to_string(), "Route not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        Arc::new(ServiceConfig::default())
    }

    async fn encode(coords: &str, pre: Option<&str>) -> Result<Json<EncodeResponse>, ApiError> {
        let uri: Uri = format!("/v1/encode/{}", coords)
            .parse()
            .expect("valid uri");
        encode_point(
            State(state()),
            Path(coords.to_string()),
            Query(EncodeParams {
                pre: pre.map(str::to_string),
            }),
            uri,
        )
        .await
    }

    #[tokio::test]
    async fn test_encode_with_precision() {
        let Json(res) = encode("52.205,0.119", Some("7")).await.expect("encodes");
        assert_eq!(res.geohash, "u120fxw");
        assert_eq!(res.precision, 7);
        assert_eq!(res.lat, 52.205);
        assert_eq!(res.lon, 0.119);
    }

    #[tokio::test]
    async fn test_encode_default_precision() {
        let Json(res) = encode("52.205,0.119", None).await.expect("encodes");
        assert_eq!(res.precision, 12);
        assert_eq!(res.geohash.len(), 12);
    }

    #[tokio::test]
    async fn test_encode_bad_inputs() {
        let (status, Json(body)) = encode("abc,0.119", None).await.expect_err("bad float");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.errors.contains("could not be parsed as a float"));

        let (status, _) = encode("52.205,0.119", Some("x")).await.expect_err("bad precision");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = encode("140.2,14.51", None).await.expect_err("bad point");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.errors.starts_with("The request returned an error : Invalid point"));

        let (status, _) = encode("52.205,0.119", Some("13")).await.expect_err("precision 13");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_encode_out_of_range_precision_is_codec_error() {
        for (pre, value) in [("-1", -1), ("300", 300), ("0", 0)] {
            let (status, Json(body)) = encode("52.205,0.119", Some(pre))
                .await
                .expect_err("out of range precision");
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body.errors,
                format!(
                    "The request returned an error : {}",
                    GeohashError::InvalidPrecision(value)
                )
            );
        }

        // The point is checked before the precision.
        let (_, Json(body)) = encode("140.2,14.51", Some("300"))
            .await
            .expect_err("bad point and precision");
        assert!(body.errors.contains("Invalid point"));
    }

    #[tokio::test]
    async fn test_decode_hash() {
        let Json(res) = decode_hash(Path("u120fxw".to_string())).await.expect("decodes");
        assert_eq!(res.input_geohash, "u120fxw");
        assert!(res.bounding_box.contains(&(res.lon, res.lat)));
        assert!((res.lat - 52.205).abs() < 0.001);

        let (status, _) = decode_hash(Path("u12a".to_string())).await.expect_err("bad hash");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_decode_response_json_shape() {
        let Json(res) = decode_hash(Path("gcpvj".to_string())).await.expect("decodes");
        let json = serde_json::to_value(&res).expect("serializes");
        assert_eq!(json["inputGeohash"], "gcpvj");
        assert!(json["boundingBox"]["latMin"].is_number());
    }

    #[tokio::test]
    async fn test_batch_encode() {
        let body = r#"[{"lat":52.205,"lon":0.119,"precision":7},{"lat":-33.8688,"lon":151.2093,"precision":5}]"#;
        let Json(res) = batch_encode(body.to_string()).await.expect("encodes");
        assert_eq!(res.query, body);
        assert_eq!(res.results.len(), 2);
        assert_eq!(res.results[0].geohash, "u120fxw");
        assert_eq!(res.results[0].query, "52.205000,0.119000,7");
        assert_eq!(res.results[1].geohash.len(), 5);
    }

    #[tokio::test]
    async fn test_batch_encode_fails_whole_request() {
        let body = r#"[{"lat":52.205,"lon":0.119,"precision":7},{"lat":52.205,"lon":0.119,"precision":0}]"#;
        let (status, _) = batch_encode(body.to_string()).await.expect_err("precision 0");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(err)) = batch_encode("not json".to_string())
            .await
            .expect_err("bad json");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.errors, "Could not unmarshal JSON into a valid format");
    }

    #[tokio::test]
    async fn test_batch_encode_out_of_range_precision_is_codec_error() {
        for value in [300, -1] {
            let body = format!(
                r#"[{{"lat":52.205,"lon":0.119,"precision":7}},{{"lat":52.205,"lon":0.119,"precision":{}}}]"#,
                value
            );
            let (status, Json(err)) = batch_encode(body.clone())
                .await
                .expect_err("out of range precision");
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(err.query, body);
            assert_eq!(
                err.errors,
                format!(
                    "The request returned an error : {}",
                    GeohashError::InvalidPrecision(value)
                )
            );
        }
    }

    #[tokio::test]
    async fn test_batch_decode() {
        let body = r#"[{"geohash":"u120fxw"},{"geohash":"ZJTPTSJ2VN"}]"#;
        let Json(res) = batch_decode(body.to_string()).await.expect("decodes");
        assert_eq!(res.results.len(), 2);
        assert_eq!(res.results[0].input_geohash, "u120fxw");
        assert_eq!(res.results[1].input_geohash, "ZJTPTSJ2VN");

        let (status, _) = batch_decode(r#"[{"geohash":""}]"#.to_string())
            .await
            .expect_err("empty hash");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_utility_endpoints() {
        assert_eq!(index().await, "Welcome home!");
        assert_eq!(health().await.0.alive, "true");

        let (status, Json(body)) = not_found(Uri::from_static("/v2/nothing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.errors, "Route not found");
        assert_eq!(body.query, "/v2/nothing");
    }
}
