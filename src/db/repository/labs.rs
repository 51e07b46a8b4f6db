use std::collections::HashMap;

use rusqlite::{named_params, params, params_from_iter, Connection, OptionalExtension};

use super::placeholders;
use crate::db::DatabaseError;
use crate::models::Labs;

const LABS_COLUMNS: &str = "seqn, urxuma, urxucr, lbxscr, lbxsgl, lbxgh, lbxglt, lbxin, \
    lbxtc, lbdldl, lbdhdd, lbxtr, lbxwbcsi, lbxrbcsi, lbxhgb, lbxhct, \
    lbxmcvsi, lbxpltsi, lbxsatsi, lbxsassi, lbxsca, lbxsph, lbxsua, lbxstp, \
    lbxsal, lbxstb, lbxsbu, lbxbpb, lbxbcd, lbxthg";

fn write_labs(conn: &Connection, verb: &str, row: &Labs) -> Result<(), DatabaseError> {
    let sql = format!(
        "{verb} INTO labs ({LABS_COLUMNS})
         VALUES (:seqn, :urxuma, :urxucr, :lbxscr, :lbxsgl, :lbxgh, :lbxglt, :lbxin,
                 :lbxtc, :lbdldl, :lbdhdd, :lbxtr, :lbxwbcsi, :lbxrbcsi, :lbxhgb, :lbxhct,
                 :lbxmcvsi, :lbxpltsi, :lbxsatsi, :lbxsassi, :lbxsca, :lbxsph, :lbxsua, :lbxstp,
                 :lbxsal, :lbxstb, :lbxsbu, :lbxbpb, :lbxbcd, :lbxthg)"
    );
    conn.execute(
        &sql,
        named_params! {
            ":seqn": row.seqn,
            ":urxuma": row.urxuma,
            ":urxucr": row.urxucr,
            ":lbxscr": row.lbxscr,
            ":lbxsgl": row.lbxsgl,
            ":lbxgh": row.lbxgh,
            ":lbxglt": row.lbxglt,
            ":lbxin": row.lbxin,
            ":lbxtc": row.lbxtc,
            ":lbdldl": row.lbdldl,
            ":lbdhdd": row.lbdhdd,
            ":lbxtr": row.lbxtr,
            ":lbxwbcsi": row.lbxwbcsi,
            ":lbxrbcsi": row.lbxrbcsi,
            ":lbxhgb": row.lbxhgb,
            ":lbxhct": row.lbxhct,
            ":lbxmcvsi": row.lbxmcvsi,
            ":lbxpltsi": row.lbxpltsi,
            ":lbxsatsi": row.lbxsatsi,
            ":lbxsassi": row.lbxsassi,
            ":lbxsca": row.lbxsca,
            ":lbxsph": row.lbxsph,
            ":lbxsua": row.lbxsua,
            ":lbxstp": row.lbxstp,
            ":lbxsal": row.lbxsal,
            ":lbxstb": row.lbxstb,
            ":lbxsbu": row.lbxsbu,
            ":lbxbpb": row.lbxbpb,
            ":lbxbcd": row.lbxbcd,
            ":lbxthg": row.lbxthg,
        },
    )?;
    Ok(())
}

/// Insert a lab panel row. Fails if one already exists for the seqn.
pub fn insert_labs(conn: &Connection, row: &Labs) -> Result<(), DatabaseError> {
    write_labs(conn, "INSERT", row)
}

/// Insert or fully replace the lab panel row for `row.seqn`.
pub fn upsert_labs(conn: &Connection, row: &Labs) -> Result<(), DatabaseError> {
    write_labs(conn, "INSERT OR REPLACE", row)
}

pub fn get_labs(conn: &Connection, seqn: i64) -> Result<Option<Labs>, DatabaseError> {
    let sql = format!("SELECT {LABS_COLUMNS} FROM labs WHERE seqn = ?1");
    conn.query_row(&sql, params![seqn], row_to_labs)
        .optional()
        .map_err(DatabaseError::from)
}

/// Batch lookup keyed by seqn. Patients without a row are simply absent from the map.
pub fn get_labs_by_seqns(
    conn: &Connection,
    seqns: &[i64],
) -> Result<HashMap<i64, Labs>, DatabaseError> {
    if seqns.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT {LABS_COLUMNS} FROM labs WHERE seqn IN ({})",
        placeholders(seqns.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(seqns.iter()), row_to_labs)?;
    let mut by_seqn = HashMap::new();
    for row in rows {
        let row = row?;
        by_seqn.insert(row.seqn, row);
    }
    Ok(by_seqn)
}

/// Delete the lab panel row for a patient. Returns the number of rows removed.
pub fn delete_labs(conn: &Connection, seqn: i64) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM labs WHERE seqn = ?1", params![seqn])?)
}

fn row_to_labs(row: &rusqlite::Row) -> Result<Labs, rusqlite::Error> {
    Ok(Labs {
        seqn: row.get("seqn")?,
        urxuma: row.get("urxuma")?,
        urxucr: row.get("urxucr")?,
        lbxscr: row.get("lbxscr")?,
        lbxsgl: row.get("lbxsgl")?,
        lbxgh: row.get("lbxgh")?,
        lbxglt: row.get("lbxglt")?,
        lbxin: row.get("lbxin")?,
        lbxtc: row.get("lbxtc")?,
        lbdldl: row.get("lbdldl")?,
        lbdhdd: row.get("lbdhdd")?,
        lbxtr: row.get("lbxtr")?,
        lbxwbcsi: row.get("lbxwbcsi")?,
        lbxrbcsi: row.get("lbxrbcsi")?,
        lbxhgb: row.get("lbxhgb")?,
        lbxhct: row.get("lbxhct")?,
        lbxmcvsi: row.get("lbxmcvsi")?,
        lbxpltsi: row.get("lbxpltsi")?,
        lbxsatsi: row.get("lbxsatsi")?,
        lbxsassi: row.get("lbxsassi")?,
        lbxsca: row.get("lbxsca")?,
        lbxsph: row.get("lbxsph")?,
        lbxsua: row.get("lbxsua")?,
        lbxstp: row.get("lbxstp")?,
        lbxsal: row.get("lbxsal")?,
        lbxstb: row.get("lbxstb")?,
        lbxsbu: row.get("lbxsbu")?,
        lbxbpb: row.get("lbxbpb")?,
        lbxbcd: row.get("lbxbcd")?,
        lbxthg: row.get("lbxthg")?,
    })
}
