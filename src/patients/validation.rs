//! Input validation. Runs before any derivation or write; the first
//! violation found is reported.

use std::fmt::Display;
use std::str::FromStr;

use super::types::{
    PatientCreate, PatientQuery, PatientQueryParams, PatientUpdate, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use super::PatientError;

pub const AGE_RANGE: (i64, i64) = (0, 120);
pub const SYSTOLIC_RANGE: (i64, i64) = (60, 250);
pub const DIASTOLIC_RANGE: (i64, i64) = (30, 150);
pub const HEART_RATE_RANGE: (i64, i64) = (30, 220);
pub const WEIGHT_RANGE: (f64, f64) = (1.0, 500.0);
pub const HEIGHT_RANGE: (f64, f64) = (30.0, 280.0);
pub const HBA1C_RANGE: (f64, f64) = (3.0, 20.0);
pub const GLUCOSE_RANGE: (f64, f64) = (20.0, 600.0);
pub const TOTAL_CHOLESTEROL_RANGE: (f64, f64) = (50.0, 500.0);
pub const LDL_RANGE: (f64, f64) = (20.0, 400.0);
pub const HDL_RANGE: (f64, f64) = (10.0, 150.0);
pub const TRIGLYCERIDES_RANGE: (f64, f64) = (20.0, 2000.0);
pub const CREATININE_RANGE: (f64, f64) = (0.1, 20.0);
pub const ALBUMIN_RANGE: (f64, f64) = (0.1, 10.0);

fn check_range<T>(field: &str, value: Option<T>, (min, max): (T, T)) -> Result<(), PatientError>
where
    T: PartialOrd + Display + Copy,
{
    match value {
        Some(v) if !(v >= min && v <= max) => Err(PatientError::Validation(format!(
            "{field} must be between {min} and {max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Range checks shared by create and update.
#[allow(clippy::too_many_arguments)]
fn check_measurements(
    systolic: Option<i64>,
    diastolic: Option<i64>,
    heart_rate: Option<i64>,
    weight: Option<f64>,
    height: Option<f64>,
    hba1c: Option<f64>,
    glucose: Option<f64>,
    total_cholesterol: Option<f64>,
    ldl: Option<f64>,
    hdl: Option<f64>,
    triglycerides: Option<f64>,
    creatinine: Option<f64>,
    albumin: Option<f64>,
) -> Result<(), PatientError> {
    check_range("blood_pressure_systolic", systolic, SYSTOLIC_RANGE)?;
    check_range("blood_pressure_diastolic", diastolic, DIASTOLIC_RANGE)?;
    check_range("heart_rate", heart_rate, HEART_RATE_RANGE)?;
    check_range("weight", weight, WEIGHT_RANGE)?;
    check_range("height", height, HEIGHT_RANGE)?;
    check_range("hba1c", hba1c, HBA1C_RANGE)?;
    check_range("fasting_glucose", glucose, GLUCOSE_RANGE)?;
    check_range("total_cholesterol", total_cholesterol, TOTAL_CHOLESTEROL_RANGE)?;
    check_range("ldl_cholesterol", ldl, LDL_RANGE)?;
    check_range("hdl_cholesterol", hdl, HDL_RANGE)?;
    check_range("triglycerides", triglycerides, TRIGLYCERIDES_RANGE)?;
    check_range("creatinine", creatinine, CREATININE_RANGE)?;
    check_range("albumin", albumin, ALBUMIN_RANGE)?;
    Ok(())
}

pub fn validate_create(input: &PatientCreate) -> Result<(), PatientError> {
    check_range("age", Some(input.age), AGE_RANGE)?;
    check_measurements(
        input.blood_pressure_systolic,
        input.blood_pressure_diastolic,
        input.heart_rate,
        input.weight,
        input.height,
        input.hba1c,
        input.fasting_glucose,
        input.total_cholesterol,
        input.ldl_cholesterol,
        input.hdl_cholesterol,
        input.triglycerides,
        input.creatinine,
        input.albumin,
    )
}

pub fn validate_update(input: &PatientUpdate) -> Result<(), PatientError> {
    check_measurements(
        input.blood_pressure_systolic,
        input.blood_pressure_diastolic,
        input.heart_rate,
        input.weight,
        input.height,
        input.hba1c,
        input.fasting_glucose,
        input.total_cholesterol,
        input.ldl_cholesterol,
        input.hdl_cholesterol,
        input.triglycerides,
        input.creatinine,
        input.albumin,
    )
}

fn parse_choice<T: FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>, PatientError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| PatientError::Validation(format!("invalid {field}: {s}"))),
    }
}

pub fn validate_query(params: &PatientQueryParams) -> Result<PatientQuery, PatientError> {
    let page = params.page.unwrap_or(1);
    if page < 1 {
        return Err(PatientError::Validation("page must be at least 1".into()));
    }

    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(PatientError::Validation(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
        )));
    }

    Ok(PatientQuery {
        page,
        page_size,
        gender: parse_choice("gender", params.gender.as_deref())?,
        min_age: params.min_age,
        max_age: params.max_age,
        risk_level: parse_choice("risk_level", params.risk_level.as_deref())?,
        status: parse_choice("status", params.status.as_deref())?,
    })
}
