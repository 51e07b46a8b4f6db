use rusqlite::Connection;

use super::aggregate::{build_detail, build_summary};
use super::types::{MedicationView, PatientDetail, PatientPage, PatientQuery, PatientRecord};
use super::PatientError;
use crate::db::{
    count_demographics, demographic_exists, get_demographic, get_diet, get_examination,
    get_examination_by_seqns, get_labs, get_labs_by_seqns, get_questionnaire,
    get_questionnaire_by_seqns, get_reported_medications, list_demographics, DatabaseError,
};
use crate::models::DemographicFilter;

/// Load every row for one patient, or `None` when the root row is absent.
pub fn load_record(conn: &Connection, seqn: i64) -> Result<Option<PatientRecord>, DatabaseError> {
    let Some(demographic) = get_demographic(conn, seqn)? else {
        return Ok(None);
    };

    Ok(Some(PatientRecord {
        demographic,
        examination: get_examination(conn, seqn)?,
        labs: get_labs(conn, seqn)?,
        diet: get_diet(conn, seqn)?,
        questionnaire: get_questionnaire(conn, seqn)?,
        medications: get_reported_medications(conn, seqn)?,
    }))
}

fn page_count(total: i64, page_size: u32) -> i64 {
    let size = i64::from(page_size);
    (total + size - 1) / size
}

/// One page of summaries in seqn order.
///
/// Gender and age narrow the SQL query. Risk level and status are derived
/// values, so they filter the page's summaries after aggregation and do not
/// change `total` or `pages`.
pub fn list_patients(conn: &Connection, query: &PatientQuery) -> Result<PatientPage, PatientError> {
    let filter = DemographicFilter {
        gender: query.gender,
        min_age: query.min_age,
        max_age: query.max_age,
    };

    let total = count_demographics(conn, &filter)?;
    let limit = i64::from(query.page_size);
    let offset = i64::from(query.page.saturating_sub(1)) * limit;
    let demographics = list_demographics(conn, &filter, limit, offset)?;

    let seqns: Vec<i64> = demographics.iter().map(|d| d.seqn).collect();
    let exams = get_examination_by_seqns(conn, &seqns)?;
    let labs = get_labs_by_seqns(conn, &seqns)?;
    let quests = get_questionnaire_by_seqns(conn, &seqns)?;

    let items = demographics
        .iter()
        .map(|demo| {
            build_summary(
                demo,
                exams.get(&demo.seqn),
                labs.get(&demo.seqn),
                quests.get(&demo.seqn),
            )
        })
        .filter(|s| query.risk_level.map_or(true, |r| s.risk_level == r))
        .filter(|s| query.status.map_or(true, |st| s.status == st))
        .collect::<Vec<_>>();

    tracing::debug!(
        page = query.page,
        page_size = query.page_size,
        total,
        returned = items.len(),
        "Listed patients"
    );

    Ok(PatientPage {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
        pages: page_count(total, query.page_size),
    })
}

pub fn get_patient(conn: &Connection, seqn: i64) -> Result<PatientDetail, PatientError> {
    let record = load_record(conn, seqn)?.ok_or(PatientError::NotFound(seqn))?;
    Ok(build_detail(&record))
}

/// Reported medications in row-id order. Sentinel and empty drug values are
/// excluded.
pub fn list_medications(conn: &Connection, seqn: i64) -> Result<Vec<MedicationView>, PatientError> {
    if !demographic_exists(conn, seqn)? {
        return Err(PatientError::NotFound(seqn));
    }
    let meds = get_reported_medications(conn, seqn)?;
    Ok(meds.iter().map(MedicationView::from).collect())
}
