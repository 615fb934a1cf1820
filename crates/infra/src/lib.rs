//! Infrastructure layer: configuration and storage.

pub mod config;
pub mod postgres;
pub mod store;

pub use config::{AppConfig, AppKind, ConfigError, DatabaseConfig, JwtConfig};
pub use store::{StoreError, StoreResult};
