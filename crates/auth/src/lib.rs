//! `triad-auth` — bearer-token authentication and scope checks.
//!
//! This crate is intentionally decoupled from HTTP and storage: callers hand
//! it the raw `Authorization` header value and the permission an endpoint
//! requires.

pub mod authorize;
pub mod claims;
pub mod header;
pub mod jwt;
pub mod permissions;

pub use authorize::{AuthError, check_permission};
pub use claims::JwtClaims;
pub use header::bearer_token;
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use permissions::Permission;
