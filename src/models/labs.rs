use serde::{Deserialize, Serialize};

/// Laboratory results row (NHANES labs file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labs {
    pub seqn: i64,
    // Kidney
    pub urxuma: Option<f64>, // urine albumin (mg/L)
    pub urxucr: Option<f64>, // urine creatinine (mg/dL)
    pub lbxscr: Option<f64>, // serum creatinine (mg/dL)
    // Glucose / diabetes
    pub lbxsgl: Option<f64>,
    pub lbxgh: Option<f64>, // HbA1c (%)
    pub lbxglt: Option<f64>,
    pub lbxin: Option<f64>,
    // Lipids
    pub lbxtc: Option<f64>,
    pub lbdldl: Option<f64>,
    pub lbdhdd: Option<f64>,
    pub lbxtr: Option<f64>,
    // CBC
    pub lbxwbcsi: Option<f64>,
    pub lbxrbcsi: Option<f64>,
    pub lbxhgb: Option<f64>,
    pub lbxhct: Option<f64>,
    pub lbxmcvsi: Option<f64>,
    pub lbxpltsi: Option<f64>,
    // Liver
    pub lbxsatsi: Option<f64>,
    pub lbxsassi: Option<f64>,
    // Chemistry
    pub lbxsca: Option<f64>,
    pub lbxsph: Option<f64>,
    pub lbxsua: Option<f64>,
    pub lbxstp: Option<f64>,
    pub lbxsal: Option<f64>, // albumin (g/dL)
    pub lbxstb: Option<f64>,
    pub lbxsbu: Option<f64>,
    // Metals
    pub lbxbpb: Option<f64>,
    pub lbxbcd: Option<f64>,
    pub lbxthg: Option<f64>,
}

impl Labs {
    pub fn empty(seqn: i64) -> Self {
        Self {
            seqn,
            ..Default::default()
        }
    }
}
