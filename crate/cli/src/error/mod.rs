use std::path::PathBuf;

use seatrace_jwks::JwksError;
use thiserror::Error;

pub mod result;

/// Each variant maps to one process exit code (see [`CliError::exit_code`]).
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Private key file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("SECURITY ERROR: Private key components found in JWK: {}", .0.join(", "))]
    SecurityCheck(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Jwks(JwksError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error("{0}")]
    Default(String),
}

impl CliError {
    /// Process exit code of this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 1,
            Self::InputNotFound(_) => 2,
            Self::UnsupportedKeyType(_) => 3,
            Self::SecurityCheck(_) => 4,
            Self::Io(_) | Self::Jwks(_) | Self::SerdeJson(_) | Self::Default(_) => 5,
        }
    }

    /// Extra lines printed after the error message.
    #[must_use]
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::UnsupportedKeyType(_) => &["Supported types: RSA, EC"],
            Self::SecurityCheck(_) => &["This should never happen. Aborting."],
            Self::Io(_) | Self::Jwks(_) | Self::SerdeJson(_) | Self::Default(_) => &[
                "Troubleshooting:",
                "  - Verify private key is in PEM format",
                "  - Check file permissions",
                "  - Check that the output directory is writable",
            ],
            Self::Usage(_) | Self::InputNotFound(_) => &[],
        }
    }
}

impl From<JwksError> for CliError {
    fn from(e: JwksError) -> Self {
        match e {
            JwksError::UnsupportedKeyType(key_type) => Self::UnsupportedKeyType(key_type),
            JwksError::PrivateKeyLeak(components) => Self::SecurityCheck(components),
            JwksError::Io(e) => Self::Io(e),
            other => Self::Jwks(other),
        }
    }
}

impl From<tempfile::PersistError> for CliError {
    fn from(e: tempfile::PersistError) -> Self {
        Self::Io(e.error)
    }
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! cli_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::cli_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::cli_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a cli error from a string.
#[macro_export]
macro_rules! cli_error {
    ($msg:literal) => {
        $crate::error::CliError::Default(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::error::CliError::Default($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::CliError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}
