//! Patient records: aggregation of the NHANES tables into list and detail
//! views, plus the list/get/create/update/delete operations over them.
//!
//! Every operation takes a borrowed `Connection`. Writes run in a single
//! transaction and are rolled back on any error.

mod aggregate;
mod fetch;
mod types;
mod validation;
mod write;

pub use aggregate::*;
pub use fetch::*;
pub use types::*;
pub use validation::*;
pub use write::*;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum PatientError {
    #[error("Patient {0} not found")]
    NotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for PatientError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(DatabaseError::from(err))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
