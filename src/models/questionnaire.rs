use serde::{Deserialize, Serialize};

use super::enums::ANSWER_YES;

/// Health questionnaire row (NHANES questionnaire file).
/// Yes/no items use 1 = yes, 2 = no, 7/9 = refused/don't know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub seqn: i64,
    pub bpq020: Option<i64>,  // ever told high blood pressure
    pub bpq030: Option<i64>,
    pub bpq040a: Option<i64>,
    pub diq010: Option<i64>,  // doctor told you have diabetes
    pub diq050: Option<i64>,
    pub diq070: Option<i64>,
    pub mcq160b: Option<i64>, // heart failure
    pub mcq160c: Option<i64>, // coronary heart disease
    pub mcq160d: Option<i64>, // angina
    pub mcq160e: Option<i64>, // heart attack
    pub mcq160f: Option<i64>, // stroke
    pub kiq022: Option<i64>,  // weak/failing kidneys
    pub smq020: Option<i64>,  // smoked 100+ cigarettes
    pub smq040: Option<i64>,
    pub alq101: Option<i64>,
    pub alq120q: Option<i64>,
    pub paq605: Option<i64>,
    pub paq620: Option<i64>,
    pub paq650: Option<i64>,
    pub paq665: Option<i64>,
    pub dpq010: Option<i64>,
    pub dpq020: Option<i64>,
    pub dpq030: Option<i64>,
    pub dpq040: Option<i64>,
    pub dpq050: Option<i64>,
    pub dpq060: Option<i64>,
    pub dpq070: Option<i64>,
    pub dpq080: Option<i64>,
    pub dpq090: Option<i64>,
    pub whd010: Option<f64>,
    pub whd020: Option<f64>,
}

fn is_yes(code: Option<i64>) -> bool {
    code == Some(ANSWER_YES)
}

impl Questionnaire {
    pub fn empty(seqn: i64) -> Self {
        Self {
            seqn,
            ..Default::default()
        }
    }

    pub fn smoker(&self) -> bool {
        is_yes(self.smq020)
    }

    pub fn diabetes(&self) -> bool {
        is_yes(self.diq010)
    }

    pub fn hypertension(&self) -> bool {
        is_yes(self.bpq020)
    }

    /// Coronary heart disease or a past heart attack.
    pub fn heart_disease(&self) -> bool {
        is_yes(self.mcq160c) || is_yes(self.mcq160e)
    }

    pub fn kidney_disease(&self) -> bool {
        is_yes(self.kiq022)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_code_one_counts_as_yes() {
        let mut q = Questionnaire::empty(1);
        q.diq010 = Some(2);
        q.bpq020 = Some(9);
        q.smq020 = Some(1);
        assert!(!q.diabetes());
        assert!(!q.hypertension());
        assert!(q.smoker());
    }

    #[test]
    fn heart_disease_from_either_code() {
        let mut q = Questionnaire::empty(1);
        assert!(!q.heart_disease());
        q.mcq160e = Some(1);
        assert!(q.heart_disease());
        q.mcq160e = Some(2);
        q.mcq160c = Some(1);
        assert!(q.heart_disease());
    }
}
