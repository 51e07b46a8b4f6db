use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::fetch::get_patient;
use super::types::{PatientCreate, PatientDetail, PatientUpdate};
use super::validation::{validate_create, validate_update};
use super::PatientError;
use crate::clinical::calculate_bmi;
use crate::db::{
    delete_demographic, delete_diet, delete_examination, delete_labs, delete_medications,
    delete_questionnaire, demographic_exists, get_examination, get_labs, get_questionnaire,
    insert_demographic, insert_diet, insert_examination, insert_labs, insert_questionnaire,
    max_seqn, upsert_examination, upsert_labs, upsert_questionnaire,
};
use crate::models::{answer_code, Demographic, Diet, Examination, Labs, Questionnaire};

/// Begin an IMMEDIATE transaction. The write lock is taken before the first
/// read, so concurrent writers wait on `busy_timeout` instead of failing on
/// lock upgrade.
fn begin_write(conn: &Connection) -> Result<Transaction<'_>, rusqlite::Error> {
    Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
}

/// Create a patient with its examination, labs, questionnaire and diet rows.
///
/// The seqn is `max + 1` (1 on an empty table), allocated inside the write
/// transaction. BMI is computed when both weight and height are given.
pub fn create_patient(conn: &Connection, input: &PatientCreate) -> Result<PatientDetail, PatientError> {
    validate_create(input)?;

    let tx = begin_write(conn)?;
    let seqn = max_seqn(&tx)? + 1;

    insert_demographic(
        &tx,
        &Demographic {
            seqn,
            riagendr: Some(input.gender.code()),
            ridageyr: Some(input.age),
            ..Default::default()
        },
    )?;

    insert_examination(
        &tx,
        &Examination {
            seqn,
            bpxsy1: input.blood_pressure_systolic,
            bpxdi1: input.blood_pressure_diastolic,
            bpxpls: input.heart_rate,
            bmxwt: input.weight,
            bmxht: input.height,
            bmxbmi: calculate_bmi(input.weight, input.height),
            ..Examination::empty(seqn)
        },
    )?;

    insert_labs(
        &tx,
        &Labs {
            seqn,
            lbxgh: input.hba1c,
            lbxsgl: input.fasting_glucose,
            lbxtc: input.total_cholesterol,
            lbdldl: input.ldl_cholesterol,
            lbdhdd: input.hdl_cholesterol,
            lbxtr: input.triglycerides,
            lbxscr: input.creatinine,
            lbxsal: input.albumin,
            ..Labs::empty(seqn)
        },
    )?;

    insert_questionnaire(
        &tx,
        &Questionnaire {
            seqn,
            smq020: Some(answer_code(input.smoker)),
            diq010: Some(answer_code(input.diabetes_history)),
            bpq020: Some(answer_code(input.hypertension_history)),
            ..Questionnaire::empty(seqn)
        },
    )?;

    insert_diet(&tx, &Diet::empty(seqn))?;

    tx.commit()?;
    tracing::info!(seqn, "Patient created");

    get_patient(conn, seqn)
}

/// Apply a partial update. Only supplied fields change.
///
/// A missing examination, labs or questionnaire row is created when one of
/// its fields is supplied. BMI is recomputed when weight or height is
/// supplied, falling back to the stored counterpart; if either is still
/// absent the stored BMI is kept.
pub fn update_patient(
    conn: &Connection,
    seqn: i64,
    input: &PatientUpdate,
) -> Result<PatientDetail, PatientError> {
    validate_update(input)?;

    let tx = begin_write(conn)?;
    if !demographic_exists(&tx, seqn)? {
        return Err(PatientError::NotFound(seqn));
    }

    if input.touches_examination() {
        let mut exam = get_examination(&tx, seqn)?.unwrap_or_else(|| Examination::empty(seqn));

        if let Some(v) = input.blood_pressure_systolic {
            exam.bpxsy1 = Some(v);
        }
        if let Some(v) = input.blood_pressure_diastolic {
            exam.bpxdi1 = Some(v);
        }
        if let Some(v) = input.heart_rate {
            exam.bpxpls = Some(v);
        }
        if input.weight.is_some() || input.height.is_some() {
            let weight = input.weight.or(exam.bmxwt);
            let height = input.height.or(exam.bmxht);
            exam.bmxwt = weight;
            exam.bmxht = height;
            if let Some(bmi) = calculate_bmi(weight, height) {
                exam.bmxbmi = Some(bmi);
            }
        }

        upsert_examination(&tx, &exam)?;
    }

    if input.touches_labs() {
        let mut labs = get_labs(&tx, seqn)?.unwrap_or_else(|| Labs::empty(seqn));

        let fields = [
            (input.hba1c, &mut labs.lbxgh),
            (input.fasting_glucose, &mut labs.lbxsgl),
            (input.total_cholesterol, &mut labs.lbxtc),
            (input.ldl_cholesterol, &mut labs.lbdldl),
            (input.hdl_cholesterol, &mut labs.lbdhdd),
            (input.triglycerides, &mut labs.lbxtr),
            (input.creatinine, &mut labs.lbxscr),
            (input.albumin, &mut labs.lbxsal),
        ];
        for (value, slot) in fields {
            if value.is_some() {
                *slot = value;
            }
        }

        upsert_labs(&tx, &labs)?;
    }

    if input.touches_questionnaire() {
        let mut quest =
            get_questionnaire(&tx, seqn)?.unwrap_or_else(|| Questionnaire::empty(seqn));

        if let Some(v) = input.smoker {
            quest.smq020 = Some(answer_code(v));
        }
        if let Some(v) = input.diabetes_history {
            quest.diq010 = Some(answer_code(v));
        }
        if let Some(v) = input.hypertension_history {
            quest.bpq020 = Some(answer_code(v));
        }

        upsert_questionnaire(&tx, &quest)?;
    }

    tx.commit()?;
    tracing::info!(seqn, "Patient updated");

    get_patient(conn, seqn)
}

/// Delete a patient and every dependent row in one transaction.
pub fn delete_patient(conn: &Connection, seqn: i64) -> Result<(), PatientError> {
    let tx = begin_write(conn)?;
    if !demographic_exists(&tx, seqn)? {
        return Err(PatientError::NotFound(seqn));
    }

    let medications = delete_medications(&tx, seqn)?;
    delete_questionnaire(&tx, seqn)?;
    delete_diet(&tx, seqn)?;
    delete_labs(&tx, seqn)?;
    delete_examination(&tx, seqn)?;
    delete_demographic(&tx, seqn)?;

    tx.commit()?;
    tracing::info!(seqn, medications, "Patient deleted");
    Ok(())
}
