//! Error types for the overlay pipeline.

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors raised while turning landmarks into a model pose.
#[derive(Debug, Clone, PartialEq)]
pub enum PoseError {
    /// Flat landmark buffer had the wrong number of values.
    InvalidLength { expected: usize, actual: usize },
    /// A landmark coordinate was NaN or infinite.
    NonFinite { index: usize },
    /// Two basis directions coincide or are parallel; no orientation exists.
    DegenerateBasis,
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => write!(
                f,
                "invalid landmark data length: {actual} (expected {expected})"
            ),
            Self::NonFinite { index } => write!(f, "landmark {index} has a non-finite coordinate"),
            Self::DegenerateBasis => write!(f, "hand basis is degenerate (zero-length axis)"),
        }
    }
}

impl std::error::Error for PoseError {}

/// Configuration could not be parsed or is out of range.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    OutOfRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "config parse error: {err}"),
            Self::OutOfRange(msg) => write!(f, "config value out of range: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Why the landmark source failed to start. Fatal to the overlay only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingInitError {
    PermissionDenied,
    NoCamera,
    Other,
}

impl TrackingInitError {
    /// Classify the host's raw error text.
    pub fn classify(message: &str) -> Self {
        if message.contains("Permission denied") || message.contains("NotAllowedError") {
            Self::PermissionDenied
        } else if message.contains("NotFoundError") {
            Self::NoCamera
        } else {
            Self::Other
        }
    }

    /// Message shown next to the retry action.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Camera access denied. Please allow camera access and reload.",
            Self::NoCamera => "No camera found. Please connect a camera.",
            Self::Other => "Failed to initialize camera or hand tracking",
        }
    }
}

impl fmt::Display for TrackingInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for TrackingInitError {}

/// Top-level error for the crate's public operations.
#[derive(Debug)]
pub enum OverlayError {
    Config(ConfigError),
    UnknownSpecies(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::UnknownSpecies(id) => write!(f, "unknown species: {id}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::UnknownSpecies(_) => None,
        }
    }
}

impl From<ConfigError> for OverlayError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<OverlayError> for wasm_bindgen::JsValue {
    fn from(err: OverlayError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
