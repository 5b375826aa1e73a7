//! HTTP-facing pieces for the web controller layer

pub mod error;

pub use error::ApiError;
