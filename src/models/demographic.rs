use serde::{Deserialize, Serialize};

/// Demographics row (NHANES demographic file). Root of every patient record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographic {
    pub seqn: i64,
    pub riagendr: Option<i64>, // gender: 1 male, 2 female
    pub ridageyr: Option<i64>, // age in years
    pub ridreth1: Option<i64>, // race/Hispanic origin
    pub ridreth3: Option<i64>, // race/Hispanic origin incl. NH Asian
    pub dmdeduc2: Option<i64>, // education, adults 20+
    pub dmdeduc3: Option<i64>, // education, youth 6-19
    pub dmdmartl: Option<i64>, // marital status
    pub indhhin2: Option<i64>, // annual household income
    pub wtint2yr: Option<f64>, // interview weight
    pub wtmec2yr: Option<f64>, // MEC exam weight
}
