//! NHANES table rows and the enumerations shared across layers.
//!
//! Row structs mirror the SQLite columns one-to-one (NHANES variable codes).
//! Every column other than the key is nullable: a missing survey value is
//! stored as NULL, never as zero.

pub mod demographic;
pub mod diet;
pub mod enums;
pub mod examination;
pub mod filters;
pub mod labs;
pub mod medication;
pub mod questionnaire;

pub use demographic::*;
pub use diet::*;
pub use enums::*;
pub use examination::*;
pub use filters::*;
pub use labs::*;
pub use medication::*;
pub use questionnaire::*;
