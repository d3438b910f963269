use thiserror::Error;

pub type JwksResult<R> = Result<R, JwksError>;

#[derive(Error, Debug)]
pub enum JwksError {
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("{0}")]
    Default(String),

    #[error("Encrypted private key: decrypt it first (openssl pkey -in <key> -out <plain key>)")]
    EncryptedPrivateKey,

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OpenSSL error: {0}")]
    OpenSsl(String),

    #[error("PEM error: {0}")]
    Pem(#[from] pem::PemError),

    // Private key components found in a JWK that is about to be published
    #[error("private key components found in JWK: {}", .0.join(", "))]
    PrivateKeyLeak(Vec<String>),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),
}

impl From<openssl::error::ErrorStack> for JwksError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Self::OpenSsl(format!("{e}. Details: {e:?}"))
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! jwks_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::jwks_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::jwks_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a generic error from a string.
#[macro_export]
macro_rules! jwks_error {
    ($msg:literal) => {
        $crate::error::JwksError::Default(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::error::JwksError::Default($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::JwksError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}
