//! HTTP inbound adapter exposing the `/user` REST endpoints.

pub mod error;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
