use crate::error::ServerError;

pub type SResult<R> = Result<R, ServerError>;

/// A helper trait for `SResult` that provides additional methods for error handling.
pub trait SResultHelper<T> {
    /// Sets the context for the error.
    ///
    /// # Errors
    ///
    /// Returns a `SResult` with the specified context if the original result is an error.
    fn context(self, context: &str) -> SResult<T>;

    /// Sets the context for the error using a closure.
    ///
    /// # Errors
    ///
    /// Returns a `SResult` with the context returned by the closure if the original result is an error.
    fn with_context<O>(self, op: O) -> SResult<T>
    where
        O: FnOnce() -> String;
}

impl<T, E> SResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> SResult<T> {
        self.map_err(|e| ServerError::ServerError(format!("{context}: {e}")))
    }

    fn with_context<O>(self, op: O) -> SResult<T>
    where
        O: FnOnce() -> String,
    {
        self.map_err(|e| ServerError::ServerError(format!("{}: {e}", op())))
    }
}

impl<T> SResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> SResult<T> {
        self.ok_or_else(|| ServerError::ServerError(context.to_owned()))
    }

    fn with_context<O>(self, op: O) -> SResult<T>
    where
        O: FnOnce() -> String,
    {
        self.ok_or_else(|| ServerError::ServerError(op()))
    }
}
