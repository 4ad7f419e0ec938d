use std::fmt;

/// Why an RMC-tagged line was excluded from the fix sequence
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Fewer than the ten comma-separated fields an RMC sentence needs
    InsufficientFields { found: usize },
    /// A numeric field failed to parse
    InvalidNumber {
        field: &'static str,
        value: String,
        source: std::num::ParseFloatError,
    },
    /// A degree/minute string too short to split into degrees and minutes
    InvalidCoordinate { field: &'static str, value: String },
    /// A decoded value outside its physical bounds
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientFields { found } => {
                write!(f, "insufficient fields ({} < 10)", found)
            }
            SkipReason::InvalidNumber {
                field,
                value,
                source,
            } => write!(f, "invalid {} '{}': {}", field, value, source),
            SkipReason::InvalidCoordinate { field, value } => {
                write!(f, "malformed {} '{}'", field, value)
            }
            SkipReason::OutOfRange { field, value } => {
                write!(f, "{} out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for SkipReason {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SkipReason::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Per-line warning reported to the caller for a malformed RMC sentence
#[derive(Debug, Clone, PartialEq)]
pub struct LineWarning {
    /// Index of the input source the line came from
    pub source_index: usize,
    /// 1-based line number within that source
    pub line_number: usize,
    pub line: String,
    pub reason: SkipReason,
}

impl fmt::Display for LineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error parsing line {} of source {}: {}\nError: {}",
            self.line_number,
            self.source_index + 1,
            self.line,
            self.reason
        )
    }
}

impl std::error::Error for LineWarning {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Custom error types for NMEA log processing
#[derive(Debug)]
pub enum NmeaError {
    /// Input that is not valid UTF-8 text
    Utf8(std::str::Utf8Error),
    /// No valid fix was produced from any input
    NoValidData,
    /// Export format error
    Export(String),
}

impl fmt::Display for NmeaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmeaError::Utf8(err) => write!(f, "UTF-8 error: {}", err),
            NmeaError::NoValidData => write!(f, "No valid GPS data found in input"),
            NmeaError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for NmeaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NmeaError::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::str::Utf8Error> for NmeaError {
    fn from(err: std::str::Utf8Error) -> Self {
        NmeaError::Utf8(err)
    }
}
