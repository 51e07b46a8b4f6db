//! HTTP API.
//!
//! JSON endpoints over the patient operations, mounted at `/` and `/api/`.
//! `api_router()` returns a composable `Router`; `start_api_server()` binds
//! and serves it with graceful shutdown.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
