//! API endpoint handlers.
//!
//! Handlers open a connection per request and delegate to `crate::patients`.

pub mod health;
pub mod medications;
pub mod patients;
