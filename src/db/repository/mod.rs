//! Repository layer: table-scoped database operations keyed by seqn.
//!
//! One sub-module per NHANES table. Every function takes the connection
//! explicitly; callers own transaction boundaries.

mod demographic;
mod diet;
mod examination;
mod labs;
mod medication;
mod questionnaire;

pub use demographic::*;
pub use diet::*;
pub use examination::*;
pub use labs::*;
pub use medication::*;
pub use questionnaire::*;

/// `?1, ?2, ... ?n` for an IN (...) list.
pub(crate) fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
