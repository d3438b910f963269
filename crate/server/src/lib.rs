pub mod config;
pub mod core;
pub mod error;
pub mod result;
pub mod routes;
pub mod start_server;

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
#[cfg(test)]
mod tests;
