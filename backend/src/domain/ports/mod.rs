//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`UsersQuery`, `UsersCommand`) are what inbound adapters
//! call. The driven port (`UserRepository`) is what persistence adapters
//! implement. Port errors are typed so adapters map failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
