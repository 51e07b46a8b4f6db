use serde::{Deserialize, Serialize};

/// Drug values NHANES uses for "no medication reported" and "refused".
pub const SENTINEL_DRUG_CODES: [&str; 2] = ["99999", "55555"];

/// Prescription medication row (NHANES medications file). One-to-many on seqn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub seqn: i64,
    pub rxduse: Option<i64>,
    pub rxddrug: Option<String>,
    pub rxddrgid: Option<String>,
    pub rxqseen: Option<i64>,
    pub rxddays: Option<i64>,
    pub rxdrsc1: Option<String>, // ICD-10 code 1
    pub rxdrsc2: Option<String>,
    pub rxdrsc3: Option<String>,
    pub rxdrsd1: Option<String>, // condition description 1
    pub rxdrsd2: Option<String>,
    pub rxdrsd3: Option<String>,
    pub rxdcount: Option<i64>,
}

impl Medication {
    /// True when the row names a real drug (not empty, not a sentinel code).
    pub fn is_reported_drug(&self) -> bool {
        match self.rxddrug.as_deref() {
            Some(drug) => !drug.is_empty() && !SENTINEL_DRUG_CODES.contains(&drug),
            None => false,
        }
    }
}
