//! Domain primitives, ports, and services.
//!
//! Purpose: Define the user aggregate, its identifiers, and the business
//! rules that govern creation, partial updates, and deletion. Nothing in this
//! module knows about HTTP or SQL; adapters reach it through the traits in
//! [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): persisted user record.
//! - UserService: implementation of the user driving ports.

pub mod error;
pub mod ports;
mod slug;
mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::slug::slugify;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{FieldUpdate, NewUser, Slug, User, UserChanges, UserDraft, UserId};
pub use self::user_service::{USER_NOT_FOUND_MESSAGE, USERNAME_TAKEN_MESSAGE, UserService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use user_service::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("User was not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
