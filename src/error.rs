//! Error types for ferro-pgx
//!
//! Only a handful of conditions are hard failures: an oversized VCF, a
//! request that names no supported drug, and the I/O and configuration
//! errors of the surrounding tooling. Everything else in the pipeline
//! (malformed lines, unsupported genes, unmapped drug-gene pairs) degrades
//! to a skipped record or an `Unknown` result instead of an error.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// VCF content exceeds the byte ceiling
    SizeLimitExceeded = 1001,
    /// Input could not be decoded as UTF-8
    InvalidEncoding = 1002,

    // Request errors (E2xxx)
    /// None of the requested drugs is supported
    NoSupportedDrugs = 2001,

    // Configuration errors (E8xxx)
    /// Configuration file could not be parsed
    InvalidConfig = 8001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON serialization error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::SizeLimitExceeded => "VCF exceeds size limit",
            ErrorCode::InvalidEncoding => "input is not valid UTF-8",
            ErrorCode::NoSupportedDrugs => "no supported drugs provided",
            ErrorCode::InvalidConfig => "invalid configuration",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-pgx operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FerroError {
    /// VCF content is larger than the configured ceiling
    #[error("VCF exceeds size limit: {size} bytes > {limit} bytes")]
    SizeLimit { size: usize, limit: usize },

    /// Input bytes are not valid UTF-8
    #[error("Unable to decode VCF as UTF-8: {msg}")]
    InvalidEncoding { msg: String },

    /// The requested drug list contained no supported drug
    #[error("No supported drugs provided: {input:?}")]
    NoSupportedDrugs { input: String },

    /// Configuration file error
    #[error("Config error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl FerroError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            FerroError::SizeLimit { .. } => ErrorCode::SizeLimitExceeded,
            FerroError::InvalidEncoding { .. } => ErrorCode::InvalidEncoding,
            FerroError::NoSupportedDrugs { .. } => ErrorCode::NoSupportedDrugs,
            FerroError::Config { .. } => ErrorCode::InvalidConfig,
            FerroError::Io { .. } => ErrorCode::IoError,
            FerroError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Whether this error is a rejection of the caller's input, as opposed
    /// to a failure of the environment (files, configuration).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FerroError::SizeLimit { .. }
                | FerroError::InvalidEncoding { .. }
                | FerroError::NoSupportedDrugs { .. }
        )
    }

    /// Get the message prefixed with its error code
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for FerroError {
    fn from(err: std::io::Error) -> Self {
        FerroError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FerroError {
    fn from(err: serde_json::Error) -> Self {
        FerroError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FerroError {
    fn from(err: toml::de::Error) -> Self {
        FerroError::Config {
            msg: err.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for FerroError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        FerroError::InvalidEncoding {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::SizeLimitExceeded.as_str(), "E1001");
        assert_eq!(ErrorCode::InvalidEncoding.as_str(), "E1002");
        assert_eq!(ErrorCode::NoSupportedDrugs.as_str(), "E2001");
        assert_eq!(ErrorCode::InvalidConfig.as_str(), "E8001");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::SizeLimitExceeded.description(),
            "VCF exceeds size limit"
        );
        assert_eq!(
            ErrorCode::NoSupportedDrugs.description(),
            "no supported drugs provided"
        );
        assert_eq!(ErrorCode::JsonError.description(), "JSON serialization error");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::SizeLimitExceeded), "E1001");
        assert_eq!(format!("{}", ErrorCode::IoError), "E9001");
    }

    #[test]
    fn test_ferro_error_code() {
        let err = FerroError::SizeLimit {
            size: 10,
            limit: 5,
        };
        assert_eq!(err.code(), ErrorCode::SizeLimitExceeded);

        let err = FerroError::NoSupportedDrugs {
            input: "aspirin".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::NoSupportedDrugs);

        let err = FerroError::Config {
            msg: "bad".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_size_limit_display() {
        let err = FerroError::SizeLimit {
            size: 5_000_001,
            limit: 5_000_000,
        };
        let display = err.to_string();
        assert!(display.contains("5000001"));
        assert!(display.contains("5000000"));
    }

    #[test]
    fn test_detailed_message() {
        let err = FerroError::NoSupportedDrugs {
            input: "aspirin".to_string(),
        };
        let msg = err.detailed_message();
        assert!(msg.starts_with("[E2001]"));
        assert!(msg.contains("aspirin"));
    }

    #[test]
    fn test_is_input_error() {
        assert!(FerroError::SizeLimit { size: 2, limit: 1 }.is_input_error());
        assert!(!FerroError::Io {
            msg: "x".to_string()
        }
        .is_input_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ferro_err: FerroError = io_err.into();
        assert!(matches!(ferro_err, FerroError::Io { .. }));
        assert!(ferro_err.to_string().contains("not found"));
    }

    #[test]
    fn test_from_utf8_error() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let ferro_err: FerroError = bad.into();
        assert_eq!(ferro_err.code(), ErrorCode::InvalidEncoding);
    }

    #[test]
    fn test_error_code_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorCode::SizeLimitExceeded);
        set.insert(ErrorCode::IoError);
        assert!(set.contains(&ErrorCode::SizeLimitExceeded));
        assert!(!set.contains(&ErrorCode::JsonError));
    }
}
