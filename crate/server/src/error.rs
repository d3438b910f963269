use seatrace_jwks::JwksError;
use thiserror::Error;

// Each error type must have a corresponding HTTP status code (see `routes/mod.rs`)
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    // When a conversion from/to bytes fails
    #[error("Conversion Error: {0}")]
    ConversionError(String),

    // When the configuration cannot be turned into server parameters
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    // Failures while building the published key set
    #[error("JWKS error: {0}")]
    Jwks(String),

    // Any errors related to a bad behavior of the server but not related to the user input
    #[error("Unexpected server error: {0}")]
    ServerError(String),
}

impl From<JwksError> for ServerError {
    fn from(e: JwksError) -> Self {
        Self::Jwks(e.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(e: std::io::Error) -> Self {
        Self::ServerError(e.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        Self::ConversionError(e.to_string())
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::ConfigurationError(e.to_string())
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! server_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::server_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::server_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a server error from a string.
#[macro_export]
macro_rules! server_error {
    ($msg:literal) => {
        $crate::error::ServerError::ServerError(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::error::ServerError::ServerError($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ServerError::ServerError(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error.
#[macro_export]
macro_rules! server_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::server_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::server_error!($fmt, $($arg)*))
    };
}

#[allow(clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::ServerError;

    #[test]
    fn test_server_error_interpolation() {
        let var = 42;
        let err = server_error!("interpolate {var}");
        assert_eq!("Unexpected server error: interpolate 42", err.to_string());

        let err = bail().expect_err("bail should fail");
        assert_eq!("Unexpected server error: interpolate 43", err.to_string());

        let err = ensure().expect_err("ensure should fail");
        assert_eq!("Unexpected server error: interpolate 44", err.to_string());
    }

    #[test]
    fn test_jwks_error_conversion() {
        let err: ServerError =
            seatrace_jwks::JwksError::InvalidKeyMaterial("empty key value".to_owned()).into();
        assert_eq!(
            "JWKS error: Invalid key material: empty key value",
            err.to_string()
        );
    }

    fn bail() -> Result<(), ServerError> {
        let var = 43;
        if true {
            server_bail!("interpolate {var}");
        }
        Ok(())
    }

    fn ensure() -> Result<(), ServerError> {
        let var = 44;
        server_ensure!(false, "interpolate {var}");
        Ok(())
    }
}
