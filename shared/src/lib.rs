//! Types and controller logic shared between the admin client and its tests.
//!
//! Everything in here is plain Rust with no browser dependency: the data
//! model, the list query reducer, the generic list controller and the form
//! controller are pure state machines, so the client crate only has to
//! execute the commands they emit.

pub mod form;
pub mod list;
pub mod models;
pub mod notify;
pub mod query;
