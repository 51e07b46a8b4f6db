//! Clinical derivations over raw NHANES codes.
//!
//! Pure functions only: label decoding, blood-pressure averaging, BMI,
//! simplified CKD-EPI eGFR and the aggregate risk score. Absent inputs are
//! never errors; they decode to absent outputs or contribute nothing to the
//! score.
//!
//! Rounding is half-away-from-zero everywhere (`f64::round`), so a mean of
//! 120.5 mmHg reports as 121.

use crate::models::{Gender, PatientStatus, RiskLevel};

// ═══════════════════════════════════════════════════════════
// Label decoding
// ═══════════════════════════════════════════════════════════

/// RIAGENDR: 1 male, 2 female, everything else other.
pub fn decode_gender(code: Option<i64>) -> Gender {
    match code {
        Some(1) => Gender::Male,
        Some(2) => Gender::Female,
        _ => Gender::Other,
    }
}

/// RIDRETH1 / RIDRETH3 race and Hispanic origin.
pub fn decode_race_ethnicity(code: Option<i64>) -> Option<&'static str> {
    match code? {
        1 => Some("Mexican American"),
        2 => Some("Other Hispanic"),
        3 => Some("Non-Hispanic White"),
        4 => Some("Non-Hispanic Black"),
        5 => Some("Other Race"),
        6 => Some("Non-Hispanic Asian"),
        7 => Some("Other Race - Including Multi-Racial"),
        _ => None,
    }
}

/// DMDEDUC2, adults 20+.
pub fn decode_education(code: Option<i64>) -> Option<&'static str> {
    match code? {
        1 => Some("Less than 9th grade"),
        2 => Some("9-11th grade"),
        3 => Some("High school graduate/GED"),
        4 => Some("Some college or AA degree"),
        5 => Some("College graduate or above"),
        _ => None,
    }
}

/// DMDMARTL.
pub fn decode_marital_status(code: Option<i64>) -> Option<&'static str> {
    match code? {
        1 => Some("Married"),
        2 => Some("Widowed"),
        3 => Some("Divorced"),
        4 => Some("Separated"),
        5 => Some("Never married"),
        6 => Some("Living with partner"),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════
// Measurements
// ═══════════════════════════════════════════════════════════

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the present readings, rounded to the nearest integer.
pub fn average_bp_readings(readings: &[Option<i64>]) -> Option<i64> {
    let present: Vec<i64> = readings.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    let mean = present.iter().sum::<i64>() as f64 / present.len() as f64;
    Some(mean.round() as i64)
}

/// BMI from weight (kg) and height (cm), one decimal.
pub fn calculate_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    match (weight_kg, height_cm) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => {
            let height_m = h / 100.0;
            Some(round1(w / (height_m * height_m)))
        }
        _ => None,
    }
}

/// Simplified CKD-EPI eGFR (mL/min/1.73m²), one decimal.
///
/// Non-female patients use the male coefficients.
pub fn calculate_egfr(creatinine: Option<f64>, age: i64, gender: Gender) -> Option<f64> {
    let cr = creatinine.filter(|cr| *cr > 0.0)?;
    let age_factor = 0.993_f64.powf(age as f64);

    let egfr = match gender {
        Gender::Female => {
            let ratio = cr / 0.7;
            let exponent = if cr <= 0.7 { -0.329 } else { -1.209 };
            144.0 * ratio.powf(exponent) * age_factor
        }
        Gender::Male | Gender::Other => {
            let ratio = cr / 0.9;
            let exponent = if cr <= 0.9 { -0.411 } else { -1.209 };
            141.0 * ratio.powf(exponent) * age_factor
        }
    };

    Some(round1(egfr))
}

// ═══════════════════════════════════════════════════════════
// Risk
// ═══════════════════════════════════════════════════════════

/// Inputs to the aggregate risk score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskFactors {
    pub hba1c: Option<f64>,
    pub systolic_bp: Option<i64>,
    pub egfr: Option<f64>,
    pub diabetes: bool,
    pub hypertension: bool,
}

fn hba1c_points(hba1c: f64) -> u32 {
    if hba1c >= 9.0 {
        3
    } else if hba1c >= 7.0 {
        2
    } else if hba1c >= 6.5 {
        1
    } else {
        0
    }
}

fn systolic_points(systolic: i64) -> u32 {
    if systolic >= 180 {
        3
    } else if systolic >= 140 {
        2
    } else if systolic >= 130 {
        1
    } else {
        0
    }
}

fn egfr_points(egfr: f64) -> u32 {
    if egfr < 30.0 {
        3
    } else if egfr < 60.0 {
        2
    } else if egfr < 90.0 {
        1
    } else {
        0
    }
}

pub fn risk_score(factors: &RiskFactors) -> u32 {
    factors.hba1c.map_or(0, hba1c_points)
        + factors.systolic_bp.map_or(0, systolic_points)
        + factors.egfr.map_or(0, egfr_points)
        + u32::from(factors.diabetes)
        + u32::from(factors.hypertension)
}

pub fn risk_level_for_score(score: u32) -> RiskLevel {
    match score {
        s if s >= 5 => RiskLevel::High,
        s if s >= 2 => RiskLevel::Moderate,
        _ => RiskLevel::Low,
    }
}

pub fn calculate_risk_level(factors: &RiskFactors) -> RiskLevel {
    risk_level_for_score(risk_score(factors))
}

pub fn derive_status(risk: RiskLevel) -> PatientStatus {
    match risk {
        RiskLevel::High => PatientStatus::Critical,
        RiskLevel::Moderate | RiskLevel::Low => PatientStatus::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_decoding() {
        assert_eq!(decode_gender(Some(1)), Gender::Male);
        assert_eq!(decode_gender(Some(2)), Gender::Female);
        for code in [Some(0), Some(3), Some(7), Some(-1), None] {
            assert_eq!(decode_gender(code), Gender::Other);
        }
    }

    #[test]
    fn category_decoders_map_known_codes() {
        assert_eq!(decode_race_ethnicity(Some(6)), Some("Non-Hispanic Asian"));
        assert_eq!(decode_education(Some(5)), Some("College graduate or above"));
        assert_eq!(decode_marital_status(Some(6)), Some("Living with partner"));
    }

    #[test]
    fn category_decoders_absent_for_unknown() {
        assert_eq!(decode_race_ethnicity(Some(8)), None);
        assert_eq!(decode_education(Some(9)), None);
        assert_eq!(decode_marital_status(Some(77)), None);
        assert_eq!(decode_marital_status(None), None);
    }

    #[test]
    fn bp_average_of_present_readings() {
        assert_eq!(average_bp_readings(&[Some(120), Some(130), Some(125)]), Some(125));
        assert_eq!(average_bp_readings(&[Some(120), None, Some(126)]), Some(123));
        assert_eq!(average_bp_readings(&[None, None, Some(141)]), Some(141));
        assert_eq!(average_bp_readings(&[None, None, None]), None);
        assert_eq!(average_bp_readings(&[]), None);
    }

    #[test]
    fn bp_average_rounds_half_away_from_zero() {
        assert_eq!(average_bp_readings(&[Some(120), Some(121)]), Some(121));
        assert_eq!(average_bp_readings(&[Some(70), Some(71), Some(71)]), Some(71));
        assert_eq!(average_bp_readings(&[Some(70), Some(70), Some(71)]), Some(70));
    }

    #[test]
    fn bmi_from_weight_and_height() {
        assert_eq!(calculate_bmi(Some(70.0), Some(175.0)), Some(22.9));
        assert_eq!(calculate_bmi(Some(80.0), Some(175.0)), Some(26.1));
        assert_eq!(calculate_bmi(Some(95.0), Some(160.0)), Some(37.1));
        assert_eq!(calculate_bmi(None, Some(175.0)), None);
        assert_eq!(calculate_bmi(Some(70.0), None), None);
        assert_eq!(calculate_bmi(Some(70.0), Some(0.0)), None);
    }

    #[test]
    fn egfr_absent_without_positive_creatinine() {
        assert_eq!(calculate_egfr(None, 50, Gender::Female), None);
        assert_eq!(calculate_egfr(Some(0.0), 50, Gender::Male), None);
        assert_eq!(calculate_egfr(Some(-1.0), 50, Gender::Male), None);
    }

    #[test]
    fn egfr_female_branches() {
        // 144 * (0.6/0.7)^-0.329 * 0.993^50
        assert_eq!(calculate_egfr(Some(0.6), 50, Gender::Female), Some(106.6));
        // 144 * (1.0/0.7)^-1.209 * 0.993^40
        assert_eq!(calculate_egfr(Some(1.0), 40, Gender::Female), Some(70.6));
    }

    #[test]
    fn egfr_male_branches() {
        // 141 * (0.8/0.9)^-0.411 * 0.993^30
        assert_eq!(calculate_egfr(Some(0.8), 30, Gender::Male), Some(119.9));
        // 141 * (1.2/0.9)^-1.209 * 0.993^60
        assert_eq!(calculate_egfr(Some(1.2), 60, Gender::Male), Some(65.3));
        assert_eq!(calculate_egfr(Some(2.5), 70, Gender::Male), Some(25.1));
    }

    #[test]
    fn egfr_other_uses_male_coefficients() {
        assert_eq!(
            calculate_egfr(Some(1.0), 0, Gender::Other),
            calculate_egfr(Some(1.0), 0, Gender::Male)
        );
        assert_eq!(calculate_egfr(Some(1.0), 0, Gender::Other), Some(124.1));
    }

    #[test]
    fn egfr_threshold_is_inclusive_below() {
        // At exactly the threshold the ratio is 1 so both exponents agree.
        assert_eq!(calculate_egfr(Some(0.7), 0, Gender::Female), Some(144.0));
        assert_eq!(calculate_egfr(Some(0.9), 0, Gender::Male), Some(141.0));
    }

    #[test]
    fn egfr_age_factor_uses_full_age() {
        assert_eq!(calculate_egfr(Some(1.0), 120, Gender::Male), Some(53.4));
        assert_eq!(calculate_egfr(Some(0.8), 85, Gender::Female), Some(67.4));
        // 2^32 + 30 must not wrap around to age 30
        assert_eq!(calculate_egfr(Some(0.8), 4_294_967_326, Gender::Male), Some(0.0));
    }

    #[test]
    fn empty_factors_are_low_risk() {
        let factors = RiskFactors::default();
        assert_eq!(risk_score(&factors), 0);
        assert_eq!(calculate_risk_level(&factors), RiskLevel::Low);
    }

    #[test]
    fn hba1c_thresholds() {
        let score = |h| risk_score(&RiskFactors { hba1c: Some(h), ..Default::default() });
        assert_eq!(score(6.4), 0);
        assert_eq!(score(6.5), 1);
        assert_eq!(score(7.0), 2);
        assert_eq!(score(8.9), 2);
        assert_eq!(score(9.0), 3);
    }

    #[test]
    fn systolic_thresholds() {
        let score = |s| risk_score(&RiskFactors { systolic_bp: Some(s), ..Default::default() });
        assert_eq!(score(129), 0);
        assert_eq!(score(130), 1);
        assert_eq!(score(140), 2);
        assert_eq!(score(180), 3);
    }

    #[test]
    fn egfr_thresholds() {
        let score = |e| risk_score(&RiskFactors { egfr: Some(e), ..Default::default() });
        assert_eq!(score(90.0), 0);
        assert_eq!(score(89.9), 1);
        assert_eq!(score(59.9), 2);
        assert_eq!(score(29.9), 3);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(risk_level_for_score(0), RiskLevel::Low);
        assert_eq!(risk_level_for_score(1), RiskLevel::Low);
        assert_eq!(risk_level_for_score(2), RiskLevel::Moderate);
        assert_eq!(risk_level_for_score(4), RiskLevel::Moderate);
        assert_eq!(risk_level_for_score(5), RiskLevel::High);
        assert_eq!(risk_level_for_score(11), RiskLevel::High);
    }

    #[test]
    fn history_flags_add_one_each() {
        let factors = RiskFactors {
            diabetes: true,
            hypertension: true,
            ..Default::default()
        };
        assert_eq!(risk_score(&factors), 2);
        assert_eq!(calculate_risk_level(&factors), RiskLevel::Moderate);
    }

    #[test]
    fn score_of_exactly_five_is_high() {
        let factors = RiskFactors {
            hba1c: Some(7.2),
            systolic_bp: Some(145),
            diabetes: true,
            ..Default::default()
        };
        assert_eq!(risk_score(&factors), 5);
        assert_eq!(calculate_risk_level(&factors), RiskLevel::High);
    }

    #[test]
    fn status_critical_only_when_high() {
        assert_eq!(derive_status(RiskLevel::High), PatientStatus::Critical);
        assert_eq!(derive_status(RiskLevel::Moderate), PatientStatus::Active);
        assert_eq!(derive_status(RiskLevel::Low), PatientStatus::Active);
    }
}
