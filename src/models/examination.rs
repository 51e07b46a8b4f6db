use serde::{Deserialize, Serialize};

/// Physical examination row (NHANES examination file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Examination {
    pub seqn: i64,
    pub bpxsy1: Option<i64>,
    pub bpxdi1: Option<i64>,
    pub bpxsy2: Option<i64>,
    pub bpxdi2: Option<i64>,
    pub bpxsy3: Option<i64>,
    pub bpxdi3: Option<i64>,
    pub bpxsy4: Option<i64>,
    pub bpxdi4: Option<i64>,
    pub bpxpls: Option<i64>, // pulse (bpm)
    pub bmxwt: Option<f64>,  // weight (kg)
    pub bmxht: Option<f64>,  // height (cm)
    pub bmxbmi: Option<f64>,
    pub bmxwaist: Option<f64>,
    pub bmxarmc: Option<f64>,
    pub bmxleg: Option<f64>,
    pub bmxarml: Option<f64>,
    pub mgxh1t1: Option<f64>, // grip strength, hand 1 trial 1
    pub mgxh2t1: Option<f64>,
}

impl Examination {
    pub fn empty(seqn: i64) -> Self {
        Self {
            seqn,
            ..Default::default()
        }
    }
}
