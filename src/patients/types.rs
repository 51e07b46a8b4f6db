use serde::{Deserialize, Serialize};

use crate::models::{
    Demographic, Diet, Examination, Gender, Labs, Medication, PatientStatus, Questionnaire,
    RiskLevel,
};

// ═══════════════════════════════════════════
// Aggregate input: one patient's rows
// ═══════════════════════════════════════════

/// Every row sharing one seqn. Sub-records are independently optional.
#[derive(Debug, Clone, Default)]
pub struct PatientRecord {
    pub demographic: Demographic,
    pub examination: Option<Examination>,
    pub labs: Option<Labs>,
    pub diet: Option<Diet>,
    pub questionnaire: Option<Questionnaire>,
    pub medications: Vec<Medication>,
}

// ═══════════════════════════════════════════
// Read models: serialised to clients
// ═══════════════════════════════════════════

/// Patient row in the list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: String,
    pub seqn: i64,
    pub gender: Gender,
    pub age: i64,
    pub blood_pressure_systolic: Option<i64>,
    pub blood_pressure_diastolic: Option<i64>,
    pub bmi: Option<f64>,
    pub hba1c: Option<f64>,
    pub risk_level: RiskLevel,
    pub status: PatientStatus,
}

/// Medication as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationView {
    pub id: i64,
    pub seqn: i64,
    pub rxduse: Option<i64>,
    pub rxddrug: Option<String>,
    pub rxddrgid: Option<String>,
    pub rxddays: Option<i64>,
    pub rxdrsc1: Option<String>,
    pub rxdrsd1: Option<String>,
}

impl From<&Medication> for MedicationView {
    fn from(med: &Medication) -> Self {
        Self {
            id: med.id,
            seqn: med.seqn,
            rxduse: med.rxduse,
            rxddrug: med.rxddrug.clone(),
            rxddrgid: med.rxddrgid.clone(),
            rxddays: med.rxddays,
            rxdrsc1: med.rxdrsc1.clone(),
            rxdrsd1: med.rxdrsd1.clone(),
        }
    }
}

/// Full patient detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDetail {
    pub id: String,
    pub seqn: i64,

    // Demographics
    pub gender: Gender,
    pub age: i64,
    pub race_ethnicity: Option<String>,
    pub education: Option<String>,
    pub marital_status: Option<String>,

    // Vital signs
    pub blood_pressure_systolic: Option<i64>,
    pub blood_pressure_diastolic: Option<i64>,
    pub heart_rate: Option<i64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub bmi: Option<f64>,
    pub waist_circumference: Option<f64>,

    // Labs
    pub hba1c: Option<f64>,
    pub fasting_glucose: Option<f64>,
    pub total_cholesterol: Option<f64>,
    pub ldl_cholesterol: Option<f64>,
    pub hdl_cholesterol: Option<f64>,
    pub triglycerides: Option<f64>,
    pub creatinine: Option<f64>,
    pub egfr: Option<f64>,
    pub albumin: Option<f64>,

    // History
    pub smoker: bool,
    pub diabetes_history: bool,
    pub hypertension_history: bool,
    pub heart_disease_history: bool,
    pub kidney_disease_history: bool,

    // Diet
    pub daily_calories: Option<f64>,
    pub daily_sodium: Option<f64>,

    pub medications: Vec<MedicationView>,

    pub risk_level: RiskLevel,
    pub status: PatientStatus,
}

/// One page of the patient list.
///
/// `total` and `pages` count the storage-filtered rows only. The risk and
/// status filters narrow `items` after aggregation, so a page may hold fewer
/// than `page_size` items even when more pages follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPage {
    pub items: Vec<PatientSummary>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub pages: i64,
}

// ═══════════════════════════════════════════
// Inputs
// ═══════════════════════════════════════════

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// List query as received, before validation. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientQueryParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub gender: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub risk_level: Option<String>,
    pub status: Option<String>,
}

/// Validated list query.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientQuery {
    pub page: u32,
    pub page_size: u32,
    pub gender: Option<Gender>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub risk_level: Option<RiskLevel>,
    pub status: Option<PatientStatus>,
}

impl Default for PatientQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            gender: None,
            min_age: None,
            max_age: None,
            risk_level: None,
            status: None,
        }
    }
}

/// New patient. Weight in kg, height in cm.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatientCreate {
    pub gender: Gender,
    pub age: i64,

    #[serde(default)]
    pub blood_pressure_systolic: Option<i64>,
    #[serde(default)]
    pub blood_pressure_diastolic: Option<i64>,
    #[serde(default)]
    pub heart_rate: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,

    #[serde(default)]
    pub hba1c: Option<f64>,
    #[serde(default)]
    pub fasting_glucose: Option<f64>,
    #[serde(default)]
    pub total_cholesterol: Option<f64>,
    #[serde(default)]
    pub ldl_cholesterol: Option<f64>,
    #[serde(default)]
    pub hdl_cholesterol: Option<f64>,
    #[serde(default)]
    pub triglycerides: Option<f64>,
    #[serde(default)]
    pub creatinine: Option<f64>,
    #[serde(default)]
    pub albumin: Option<f64>,

    #[serde(default)]
    pub smoker: bool,
    #[serde(default)]
    pub diabetes_history: bool,
    #[serde(default)]
    pub hypertension_history: bool,
}

impl PatientCreate {
    pub fn new(gender: Gender, age: i64) -> Self {
        Self {
            gender,
            age,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            heart_rate: None,
            weight: None,
            height: None,
            hba1c: None,
            fasting_glucose: None,
            total_cholesterol: None,
            ldl_cholesterol: None,
            hdl_cholesterol: None,
            triglycerides: None,
            creatinine: None,
            albumin: None,
            smoker: false,
            diabetes_history: false,
            hypertension_history: false,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatientUpdate {
    pub blood_pressure_systolic: Option<i64>,
    pub blood_pressure_diastolic: Option<i64>,
    pub heart_rate: Option<i64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,

    pub hba1c: Option<f64>,
    pub fasting_glucose: Option<f64>,
    pub total_cholesterol: Option<f64>,
    pub ldl_cholesterol: Option<f64>,
    pub hdl_cholesterol: Option<f64>,
    pub triglycerides: Option<f64>,
    pub creatinine: Option<f64>,
    pub albumin: Option<f64>,

    pub smoker: Option<bool>,
    pub diabetes_history: Option<bool>,
    pub hypertension_history: Option<bool>,
}

impl PatientUpdate {
    pub(super) fn touches_examination(&self) -> bool {
        self.blood_pressure_systolic.is_some()
            || self.blood_pressure_diastolic.is_some()
            || self.heart_rate.is_some()
            || self.weight.is_some()
            || self.height.is_some()
    }

    pub(super) fn touches_labs(&self) -> bool {
        self.hba1c.is_some()
            || self.fasting_glucose.is_some()
            || self.total_cholesterol.is_some()
            || self.ldl_cholesterol.is_some()
            || self.hdl_cholesterol.is_some()
            || self.triglycerides.is_some()
            || self.creatinine.is_some()
            || self.albumin.is_some()
    }

    pub(super) fn touches_questionnaire(&self) -> bool {
        self.smoker.is_some() || self.diabetes_history.is_some() || self.hypertension_history.is_some()
    }
}
