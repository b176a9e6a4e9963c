pub mod clear;
pub mod cli;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod keys;
pub mod progress;
pub mod s3;
pub mod store;
pub mod upload;

pub use error::SyncError;

pub type Result<T> = std::result::Result<T, SyncError>;
