/// Error type for geohash-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GeohashError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    InvalidPoint { lat: f64, lon: f64 },
    /// The precision is outside the valid range (1-12).
    InvalidPrecision(i64),
    /// The hash is longer than the maximum precision of 12 characters.
    HashTooLong(usize),
    /// The hash contains a character that is not in the base-32 alphabet.
    InvalidCharacter(char),
    /// An empty string was given where a hash was expected.
    EmptyHash,
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for GeohashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeohashError::InvalidPoint { lat, lon } => write!(
                f,
                "Invalid point ({}, {}): latitude must be within [-90, 90] and longitude within [-180, 180]",
                lat, lon
            ),
            GeohashError::InvalidPrecision(p) => {
                write!(f, "Invalid precision {}: must be between 1 and 12", p)
            }
            GeohashError::HashTooLong(len) => write!(
                f,
                "Invalid hash: length {} exceeds max precision of 12 chars",
                len
            ),
            GeohashError::InvalidCharacter(c) => {
                write!(f, "Invalid hash: '{}' is not in the base32 charset", c)
            }
            GeohashError::EmptyHash => write!(f, "Invalid hash: empty string"),
            GeohashError::IoError(msg) => write!(f, "IO error: {}", msg),
            GeohashError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            GeohashError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeohashError {}
