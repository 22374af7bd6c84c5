pub mod config;
pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "lease")]
pub mod lease;

pub use error::LeasePricerError;

pub type LeasePricerResult<T> = Result<T, LeasePricerError>;
