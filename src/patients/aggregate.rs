//! Assembles the client views from raw rows. Never fails: a missing
//! sub-record yields absent fields and false history flags.

use super::types::{MedicationView, PatientDetail, PatientRecord, PatientSummary};
use crate::clinical::{
    average_bp_readings, calculate_egfr, calculate_risk_level, decode_education, decode_gender,
    decode_marital_status, decode_race_ethnicity, derive_status, RiskFactors,
};
use crate::models::{
    Demographic, Examination, Gender, Labs, PatientStatus, Questionnaire, RiskLevel,
};

/// Values both views derive the same way.
struct Derived {
    gender: Gender,
    age: i64,
    systolic: Option<i64>,
    diastolic: Option<i64>,
    egfr: Option<f64>,
    risk_level: RiskLevel,
    status: PatientStatus,
}

fn derive(
    demo: &Demographic,
    exam: Option<&Examination>,
    labs: Option<&Labs>,
    quest: Option<&Questionnaire>,
) -> Derived {
    let gender = decode_gender(demo.riagendr);
    let age = demo.ridageyr.unwrap_or(0);

    let systolic = exam.and_then(|e| average_bp_readings(&[e.bpxsy1, e.bpxsy2, e.bpxsy3]));
    let diastolic = exam.and_then(|e| average_bp_readings(&[e.bpxdi1, e.bpxdi2, e.bpxdi3]));

    let creatinine = labs.and_then(|l| l.lbxscr);
    let egfr = calculate_egfr(creatinine, age, gender);

    let risk_level = calculate_risk_level(&RiskFactors {
        hba1c: labs.and_then(|l| l.lbxgh),
        systolic_bp: systolic,
        egfr,
        diabetes: quest.is_some_and(Questionnaire::diabetes),
        hypertension: quest.is_some_and(Questionnaire::hypertension),
    });

    Derived {
        gender,
        age,
        systolic,
        diastolic,
        egfr,
        risk_level,
        status: derive_status(risk_level),
    }
}

pub fn build_summary(
    demo: &Demographic,
    exam: Option<&Examination>,
    labs: Option<&Labs>,
    quest: Option<&Questionnaire>,
) -> PatientSummary {
    let derived = derive(demo, exam, labs, quest);

    PatientSummary {
        id: demo.seqn.to_string(),
        seqn: demo.seqn,
        gender: derived.gender,
        age: derived.age,
        blood_pressure_systolic: derived.systolic,
        blood_pressure_diastolic: derived.diastolic,
        bmi: exam.and_then(|e| e.bmxbmi),
        hba1c: labs.and_then(|l| l.lbxgh),
        risk_level: derived.risk_level,
        status: derived.status,
    }
}

pub fn build_detail(record: &PatientRecord) -> PatientDetail {
    let demo = &record.demographic;
    let exam = record.examination.as_ref();
    let labs = record.labs.as_ref();
    let diet = record.diet.as_ref();
    let quest = record.questionnaire.as_ref();

    let derived = derive(demo, exam, labs, quest);

    let medications = record
        .medications
        .iter()
        .filter(|m| m.is_reported_drug())
        .map(MedicationView::from)
        .collect();

    PatientDetail {
        id: demo.seqn.to_string(),
        seqn: demo.seqn,

        gender: derived.gender,
        age: derived.age,
        race_ethnicity: decode_race_ethnicity(demo.ridreth3.or(demo.ridreth1)).map(String::from),
        education: decode_education(demo.dmdeduc2).map(String::from),
        marital_status: decode_marital_status(demo.dmdmartl).map(String::from),

        blood_pressure_systolic: derived.systolic,
        blood_pressure_diastolic: derived.diastolic,
        heart_rate: exam.and_then(|e| e.bpxpls),
        weight: exam.and_then(|e| e.bmxwt),
        height: exam.and_then(|e| e.bmxht),
        bmi: exam.and_then(|e| e.bmxbmi),
        waist_circumference: exam.and_then(|e| e.bmxwaist),

        hba1c: labs.and_then(|l| l.lbxgh),
        fasting_glucose: labs.and_then(|l| l.lbxsgl),
        total_cholesterol: labs.and_then(|l| l.lbxtc),
        ldl_cholesterol: labs.and_then(|l| l.lbdldl),
        hdl_cholesterol: labs.and_then(|l| l.lbdhdd),
        triglycerides: labs.and_then(|l| l.lbxtr),
        creatinine: labs.and_then(|l| l.lbxscr),
        egfr: derived.egfr,
        albumin: labs.and_then(|l| l.lbxsal),

        smoker: quest.is_some_and(Questionnaire::smoker),
        diabetes_history: quest.is_some_and(Questionnaire::diabetes),
        hypertension_history: quest.is_some_and(Questionnaire::hypertension),
        heart_disease_history: quest.is_some_and(Questionnaire::heart_disease),
        kidney_disease_history: quest.is_some_and(Questionnaire::kidney_disease),

        daily_calories: diet.and_then(|d| d.dr1tkcal),
        daily_sodium: diet.and_then(|d| d.dr1tsodi),

        medications,

        risk_level: derived.risk_level,
        status: derived.status,
    }
}
