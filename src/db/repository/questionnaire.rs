use std::collections::HashMap;

use rusqlite::{named_params, params, params_from_iter, Connection, OptionalExtension};

use super::placeholders;
use crate::db::DatabaseError;
use crate::models::Questionnaire;

const QUESTIONNAIRE_COLUMNS: &str = "seqn, bpq020, bpq030, bpq040a, diq010, diq050, diq070, mcq160b, \
    mcq160c, mcq160d, mcq160e, mcq160f, kiq022, smq020, smq040, alq101, \
    alq120q, paq605, paq620, paq650, paq665, dpq010, dpq020, dpq030, \
    dpq040, dpq050, dpq060, dpq070, dpq080, dpq090, whd010, whd020";

fn write_questionnaire(conn: &Connection, verb: &str, row: &Questionnaire) -> Result<(), DatabaseError> {
    let sql = format!(
        "{verb} INTO questionnaires ({QUESTIONNAIRE_COLUMNS})
         VALUES (:seqn, :bpq020, :bpq030, :bpq040a, :diq010, :diq050, :diq070, :mcq160b,
                 :mcq160c, :mcq160d, :mcq160e, :mcq160f, :kiq022, :smq020, :smq040, :alq101,
                 :alq120q, :paq605, :paq620, :paq650, :paq665, :dpq010, :dpq020, :dpq030,
                 :dpq040, :dpq050, :dpq060, :dpq070, :dpq080, :dpq090, :whd010, :whd020)"
    );
    conn.execute(
        &sql,
        named_params! {
            ":seqn": row.seqn,
            ":bpq020": row.bpq020,
            ":bpq030": row.bpq030,
            ":bpq040a": row.bpq040a,
            ":diq010": row.diq010,
            ":diq050": row.diq050,
            ":diq070": row.diq070,
            ":mcq160b": row.mcq160b,
            ":mcq160c": row.mcq160c,
            ":mcq160d": row.mcq160d,
            ":mcq160e": row.mcq160e,
            ":mcq160f": row.mcq160f,
            ":kiq022": row.kiq022,
            ":smq020": row.smq020,
            ":smq040": row.smq040,
            ":alq101": row.alq101,
            ":alq120q": row.alq120q,
            ":paq605": row.paq605,
            ":paq620": row.paq620,
            ":paq650": row.paq650,
            ":paq665": row.paq665,
            ":dpq010": row.dpq010,
            ":dpq020": row.dpq020,
            ":dpq030": row.dpq030,
            ":dpq040": row.dpq040,
            ":dpq050": row.dpq050,
            ":dpq060": row.dpq060,
            ":dpq070": row.dpq070,
            ":dpq080": row.dpq080,
            ":dpq090": row.dpq090,
            ":whd010": row.whd010,
            ":whd020": row.whd020,
        },
    )?;
    Ok(())
}

/// Insert a questionnaire row. Fails if one already exists for the seqn.
pub fn insert_questionnaire(conn: &Connection, row: &Questionnaire) -> Result<(), DatabaseError> {
    write_questionnaire(conn, "INSERT", row)
}

/// Insert or fully replace the questionnaire row for `row.seqn`.
pub fn upsert_questionnaire(conn: &Connection, row: &Questionnaire) -> Result<(), DatabaseError> {
    write_questionnaire(conn, "INSERT OR REPLACE", row)
}

pub fn get_questionnaire(conn: &Connection, seqn: i64) -> Result<Option<Questionnaire>, DatabaseError> {
    let sql = format!("SELECT {QUESTIONNAIRE_COLUMNS} FROM questionnaires WHERE seqn = ?1");
    conn.query_row(&sql, params![seqn], row_to_questionnaire)
        .optional()
        .map_err(DatabaseError::from)
}

/// Batch lookup keyed by seqn. Patients without a row are simply absent from the map.
pub fn get_questionnaire_by_seqns(
    conn: &Connection,
    seqns: &[i64],
) -> Result<HashMap<i64, Questionnaire>, DatabaseError> {
    if seqns.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT {QUESTIONNAIRE_COLUMNS} FROM questionnaires WHERE seqn IN ({})",
        placeholders(seqns.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(seqns.iter()), row_to_questionnaire)?;
    let mut by_seqn = HashMap::new();
    for row in rows {
        let row = row?;
        by_seqn.insert(row.seqn, row);
    }
    Ok(by_seqn)
}

/// Delete the questionnaire row for a patient. Returns the number of rows removed.
pub fn delete_questionnaire(conn: &Connection, seqn: i64) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM questionnaires WHERE seqn = ?1", params![seqn])?)
}

fn row_to_questionnaire(row: &rusqlite::Row) -> Result<Questionnaire, rusqlite::Error> {
    Ok(Questionnaire {
        seqn: row.get("seqn")?,
        bpq020: row.get("bpq020")?,
        bpq030: row.get("bpq030")?,
        bpq040a: row.get("bpq040a")?,
        diq010: row.get("diq010")?,
        diq050: row.get("diq050")?,
        diq070: row.get("diq070")?,
        mcq160b: row.get("mcq160b")?,
        mcq160c: row.get("mcq160c")?,
        mcq160d: row.get("mcq160d")?,
        mcq160e: row.get("mcq160e")?,
        mcq160f: row.get("mcq160f")?,
        kiq022: row.get("kiq022")?,
        smq020: row.get("smq020")?,
        smq040: row.get("smq040")?,
        alq101: row.get("alq101")?,
        alq120q: row.get("alq120q")?,
        paq605: row.get("paq605")?,
        paq620: row.get("paq620")?,
        paq650: row.get("paq650")?,
        paq665: row.get("paq665")?,
        dpq010: row.get("dpq010")?,
        dpq020: row.get("dpq020")?,
        dpq030: row.get("dpq030")?,
        dpq040: row.get("dpq040")?,
        dpq050: row.get("dpq050")?,
        dpq060: row.get("dpq060")?,
        dpq070: row.get("dpq070")?,
        dpq080: row.get("dpq080")?,
        dpq090: row.get("dpq090")?,
        whd010: row.get("whd010")?,
        whd020: row.get("whd020")?,
    })
}
