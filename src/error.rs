//! Error types for KonaPointer

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// KonaPointer error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Register bus transfer failed
    #[error("Bus error: {0}")]
    Bus(String),

    /// Register read-back did not match the value written during bring-up
    #[error(
        "Register {register:#04x} verification failed: wrote {expected:#010b}, read back {actual:#010b}"
    )]
    Configuration {
        /// Register address
        register: u8,
        /// Value written
        expected: u8,
        /// Value read back
        actual: u8,
    },

    /// Averaged calibration vector is too far from 1g
    #[error("Calibration magnitude {magnitude:.0} out of range (expected ~{expected:.0})")]
    CalibrationOutOfRange {
        /// Magnitude of the averaged raw vector
        magnitude: f64,
        /// Raw units per g for the configured range
        expected: f64,
    },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Worker thread panicked
    #[error("Thread panicked")]
    ThreadPanic,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
