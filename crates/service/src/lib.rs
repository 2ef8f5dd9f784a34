//! Service layer for the registry: framework-independent operations on top of
//! the `models` entities.
//! - Generic pagination, lookup, get-or-create and delete over every entity.
//! - One [`resource::RegistryResource`] per collection for bodies and views.
//! - Registration, login and token checks in [`auth`].

pub mod auth;
pub mod coerce;
pub mod errors;
pub mod pagination;
pub mod repository;
pub mod resource;
pub mod resources;
pub mod users;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use resource::RegistryResource;
