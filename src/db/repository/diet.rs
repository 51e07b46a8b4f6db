use std::collections::HashMap;

use rusqlite::{named_params, params, params_from_iter, Connection, OptionalExtension};

use super::placeholders;
use crate::db::DatabaseError;
use crate::models::Diet;

const DIET_COLUMNS: &str = "seqn, dr1tkcal, dr1tprot, dr1tcarb, dr1ttfat, dr1tsfat, dr1tmfat, dr1tpfat, \
    dr1tchol, dr1tfibe, dr1tsugr, dr1tsodi, dr1tpota, dr1tcalc, dr1tiron, dr1tzinc, \
    dr1tmagn, dr1tvb12, dr1tvb6, dr1tvc, dr1tvd, dr1tfola, dr1_300, dr1_330, \
    drabf";

fn write_diet(conn: &Connection, verb: &str, row: &Diet) -> Result<(), DatabaseError> {
    let sql = format!(
        "{verb} INTO diet ({DIET_COLUMNS})
         VALUES (:seqn, :dr1tkcal, :dr1tprot, :dr1tcarb, :dr1ttfat, :dr1tsfat, :dr1tmfat, :dr1tpfat,
                 :dr1tchol, :dr1tfibe, :dr1tsugr, :dr1tsodi, :dr1tpota, :dr1tcalc, :dr1tiron, :dr1tzinc,
                 :dr1tmagn, :dr1tvb12, :dr1tvb6, :dr1tvc, :dr1tvd, :dr1tfola, :dr1_300, :dr1_330,
                 :drabf)"
    );
    conn.execute(
        &sql,
        named_params! {
            ":seqn": row.seqn,
            ":dr1tkcal": row.dr1tkcal,
            ":dr1tprot": row.dr1tprot,
            ":dr1tcarb": row.dr1tcarb,
            ":dr1ttfat": row.dr1ttfat,
            ":dr1tsfat": row.dr1tsfat,
            ":dr1tmfat": row.dr1tmfat,
            ":dr1tpfat": row.dr1tpfat,
            ":dr1tchol": row.dr1tchol,
            ":dr1tfibe": row.dr1tfibe,
            ":dr1tsugr": row.dr1tsugr,
            ":dr1tsodi": row.dr1tsodi,
            ":dr1tpota": row.dr1tpota,
            ":dr1tcalc": row.dr1tcalc,
            ":dr1tiron": row.dr1tiron,
            ":dr1tzinc": row.dr1tzinc,
            ":dr1tmagn": row.dr1tmagn,
            ":dr1tvb12": row.dr1tvb12,
            ":dr1tvb6": row.dr1tvb6,
            ":dr1tvc": row.dr1tvc,
            ":dr1tvd": row.dr1tvd,
            ":dr1tfola": row.dr1tfola,
            ":dr1_300": row.dr1_300,
            ":dr1_330": row.dr1_330,
            ":drabf": row.drabf,
        },
    )?;
    Ok(())
}

/// Insert a dietary recall row. Fails if one already exists for the seqn.
pub fn insert_diet(conn: &Connection, row: &Diet) -> Result<(), DatabaseError> {
    write_diet(conn, "INSERT", row)
}

/// Insert or fully replace the dietary recall row for `row.seqn`.
pub fn upsert_diet(conn: &Connection, row: &Diet) -> Result<(), DatabaseError> {
    write_diet(conn, "INSERT OR REPLACE", row)
}

pub fn get_diet(conn: &Connection, seqn: i64) -> Result<Option<Diet>, DatabaseError> {
    let sql = format!("SELECT {DIET_COLUMNS} FROM diet WHERE seqn = ?1");
    conn.query_row(&sql, params![seqn], row_to_diet)
        .optional()
        .map_err(DatabaseError::from)
}

/// Batch lookup keyed by seqn. Patients without a row are simply absent from the map.
pub fn get_diet_by_seqns(
    conn: &Connection,
    seqns: &[i64],
) -> Result<HashMap<i64, Diet>, DatabaseError> {
    if seqns.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT {DIET_COLUMNS} FROM diet WHERE seqn IN ({})",
        placeholders(seqns.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(seqns.iter()), row_to_diet)?;
    let mut by_seqn = HashMap::new();
    for row in rows {
        let row = row?;
        by_seqn.insert(row.seqn, row);
    }
    Ok(by_seqn)
}

/// Delete the dietary recall row for a patient. Returns the number of rows removed.
pub fn delete_diet(conn: &Connection, seqn: i64) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM diet WHERE seqn = ?1", params![seqn])?)
}

fn row_to_diet(row: &rusqlite::Row) -> Result<Diet, rusqlite::Error> {
    Ok(Diet {
        seqn: row.get("seqn")?,
        dr1tkcal: row.get("dr1tkcal")?,
        dr1tprot: row.get("dr1tprot")?,
        dr1tcarb: row.get("dr1tcarb")?,
        dr1ttfat: row.get("dr1ttfat")?,
        dr1tsfat: row.get("dr1tsfat")?,
        dr1tmfat: row.get("dr1tmfat")?,
        dr1tpfat: row.get("dr1tpfat")?,
        dr1tchol: row.get("dr1tchol")?,
        dr1tfibe: row.get("dr1tfibe")?,
        dr1tsugr: row.get("dr1tsugr")?,
        dr1tsodi: row.get("dr1tsodi")?,
        dr1tpota: row.get("dr1tpota")?,
        dr1tcalc: row.get("dr1tcalc")?,
        dr1tiron: row.get("dr1tiron")?,
        dr1tzinc: row.get("dr1tzinc")?,
        dr1tmagn: row.get("dr1tmagn")?,
        dr1tvb12: row.get("dr1tvb12")?,
        dr1tvb6: row.get("dr1tvb6")?,
        dr1tvc: row.get("dr1tvc")?,
        dr1tvd: row.get("dr1tvd")?,
        dr1tfola: row.get("dr1tfola")?,
        dr1_300: row.get("dr1_300")?,
        dr1_330: row.get("dr1_330")?,
        drabf: row.get("drabf")?,
    })
}
