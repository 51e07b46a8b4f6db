use serde::{Deserialize, Serialize};

/// Day-1 dietary recall totals (NHANES diet file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diet {
    pub seqn: i64,
    pub dr1tkcal: Option<f64>, // energy (kcal)
    pub dr1tprot: Option<f64>,
    pub dr1tcarb: Option<f64>,
    pub dr1ttfat: Option<f64>,
    pub dr1tsfat: Option<f64>,
    pub dr1tmfat: Option<f64>,
    pub dr1tpfat: Option<f64>,
    pub dr1tchol: Option<f64>,
    pub dr1tfibe: Option<f64>,
    pub dr1tsugr: Option<f64>,
    pub dr1tsodi: Option<f64>, // sodium (mg)
    pub dr1tpota: Option<f64>,
    pub dr1tcalc: Option<f64>,
    pub dr1tiron: Option<f64>,
    pub dr1tzinc: Option<f64>,
    pub dr1tmagn: Option<f64>,
    pub dr1tvb12: Option<f64>,
    pub dr1tvb6: Option<f64>,
    pub dr1tvc: Option<f64>,
    pub dr1tvd: Option<f64>,
    pub dr1tfola: Option<f64>,
    pub dr1_300: Option<i64>,
    pub dr1_330: Option<i64>,
    pub drabf: Option<i64>,
}

impl Diet {
    pub fn empty(seqn: i64) -> Self {
        Self {
            seqn,
            ..Default::default()
        }
    }
}
