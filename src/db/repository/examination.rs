use std::collections::HashMap;

use rusqlite::{named_params, params, params_from_iter, Connection, OptionalExtension};

use super::placeholders;
use crate::db::DatabaseError;
use crate::models::Examination;

const EXAMINATION_COLUMNS: &str = "seqn, bpxsy1, bpxdi1, bpxsy2, bpxdi2, bpxsy3, bpxdi3, bpxsy4, \
    bpxdi4, bpxpls, bmxwt, bmxht, bmxbmi, bmxwaist, bmxarmc, bmxleg, \
    bmxarml, mgxh1t1, mgxh2t1";

fn write_examination(conn: &Connection, verb: &str, row: &Examination) -> Result<(), DatabaseError> {
    let sql = format!(
        "{verb} INTO examinations ({EXAMINATION_COLUMNS})
         VALUES (:seqn, :bpxsy1, :bpxdi1, :bpxsy2, :bpxdi2, :bpxsy3, :bpxdi3, :bpxsy4,
                 :bpxdi4, :bpxpls, :bmxwt, :bmxht, :bmxbmi, :bmxwaist, :bmxarmc, :bmxleg,
                 :bmxarml, :mgxh1t1, :mgxh2t1)"
    );
    conn.execute(
        &sql,
        named_params! {
            ":seqn": row.seqn,
            ":bpxsy1": row.bpxsy1,
            ":bpxdi1": row.bpxdi1,
            ":bpxsy2": row.bpxsy2,
            ":bpxdi2": row.bpxdi2,
            ":bpxsy3": row.bpxsy3,
            ":bpxdi3": row.bpxdi3,
            ":bpxsy4": row.bpxsy4,
            ":bpxdi4": row.bpxdi4,
            ":bpxpls": row.bpxpls,
            ":bmxwt": row.bmxwt,
            ":bmxht": row.bmxht,
            ":bmxbmi": row.bmxbmi,
            ":bmxwaist": row.bmxwaist,
            ":bmxarmc": row.bmxarmc,
            ":bmxleg": row.bmxleg,
            ":bmxarml": row.bmxarml,
            ":mgxh1t1": row.mgxh1t1,
            ":mgxh2t1": row.mgxh2t1,
        },
    )?;
    Ok(())
}

/// Insert a physical examination row. Fails if one already exists for the seqn.
pub fn insert_examination(conn: &Connection, row: &Examination) -> Result<(), DatabaseError> {
    write_examination(conn, "INSERT", row)
}

/// Insert or fully replace the physical examination row for `row.seqn`.
pub fn upsert_examination(conn: &Connection, row: &Examination) -> Result<(), DatabaseError> {
    write_examination(conn, "INSERT OR REPLACE", row)
}

pub fn get_examination(conn: &Connection, seqn: i64) -> Result<Option<Examination>, DatabaseError> {
    let sql = format!("SELECT {EXAMINATION_COLUMNS} FROM examinations WHERE seqn = ?1");
    conn.query_row(&sql, params![seqn], row_to_examination)
        .optional()
        .map_err(DatabaseError::from)
}

/// Batch lookup keyed by seqn. Patients without a row are simply absent from the map.
pub fn get_examination_by_seqns(
    conn: &Connection,
    seqns: &[i64],
) -> Result<HashMap<i64, Examination>, DatabaseError> {
    if seqns.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT {EXAMINATION_COLUMNS} FROM examinations WHERE seqn IN ({})",
        placeholders(seqns.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(seqns.iter()), row_to_examination)?;
    let mut by_seqn = HashMap::new();
    for row in rows {
        let row = row?;
        by_seqn.insert(row.seqn, row);
    }
    Ok(by_seqn)
}

/// Delete the physical examination row for a patient. Returns the number of rows removed.
pub fn delete_examination(conn: &Connection, seqn: i64) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM examinations WHERE seqn = ?1", params![seqn])?)
}

fn row_to_examination(row: &rusqlite::Row) -> Result<Examination, rusqlite::Error> {
    Ok(Examination {
        seqn: row.get("seqn")?,
        bpxsy1: row.get("bpxsy1")?,
        bpxdi1: row.get("bpxdi1")?,
        bpxsy2: row.get("bpxsy2")?,
        bpxdi2: row.get("bpxdi2")?,
        bpxsy3: row.get("bpxsy3")?,
        bpxdi3: row.get("bpxdi3")?,
        bpxsy4: row.get("bpxsy4")?,
        bpxdi4: row.get("bpxdi4")?,
        bpxpls: row.get("bpxpls")?,
        bmxwt: row.get("bmxwt")?,
        bmxht: row.get("bmxht")?,
        bmxbmi: row.get("bmxbmi")?,
        bmxwaist: row.get("bmxwaist")?,
        bmxarmc: row.get("bmxarmc")?,
        bmxleg: row.get("bmxleg")?,
        bmxarml: row.get("bmxarml")?,
        mgxh1t1: row.get("mgxh1t1")?,
        mgxh2t1: row.get("mgxh2t1")?,
    })
}
