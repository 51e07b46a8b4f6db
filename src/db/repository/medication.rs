use rusqlite::{named_params, params, Connection};

use crate::db::DatabaseError;
use crate::models::{Medication, SENTINEL_DRUG_CODES};

const MEDICATION_COLUMNS: &str = "id, seqn, rxduse, rxddrug, rxddrgid, rxqseen, rxddays, \
    rxdrsc1, rxdrsc2, rxdrsc3, rxdrsd1, rxdrsd2, rxdrsd3, rxdcount";

/// Insert a medication row. `med.id` is ignored; the assigned row id is returned.
pub fn insert_medication(conn: &Connection, med: &Medication) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medications (seqn, rxduse, rxddrug, rxddrgid, rxqseen, rxddays,
         rxdrsc1, rxdrsc2, rxdrsc3, rxdrsd1, rxdrsd2, rxdrsd3, rxdcount)
         VALUES (:seqn, :rxduse, :rxddrug, :rxddrgid, :rxqseen, :rxddays,
                 :rxdrsc1, :rxdrsc2, :rxdrsc3, :rxdrsd1, :rxdrsd2, :rxdrsd3, :rxdcount)",
        named_params! {
            ":seqn": med.seqn,
            ":rxduse": med.rxduse,
            ":rxddrug": med.rxddrug,
            ":rxddrgid": med.rxddrgid,
            ":rxqseen": med.rxqseen,
            ":rxddays": med.rxddays,
            ":rxdrsc1": med.rxdrsc1,
            ":rxdrsc2": med.rxdrsc2,
            ":rxdrsc3": med.rxdrsc3,
            ":rxdrsd1": med.rxdrsd1,
            ":rxdrsd2": med.rxdrsd2,
            ":rxdrsd3": med.rxdrsd3,
            ":rxdcount": med.rxdcount,
        },
    )?;
    Ok(conn.last_insert_rowid())
}

/// All medication rows for a patient, sentinels included, in row order.
pub fn get_all_medications(conn: &Connection, seqn: i64) -> Result<Vec<Medication>, DatabaseError> {
    let sql = format!("SELECT {MEDICATION_COLUMNS} FROM medications WHERE seqn = ?1 ORDER BY id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![seqn], row_to_medication)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Medications that name a real drug: no NULL/empty drug, no sentinel codes.
pub fn get_reported_medications(
    conn: &Connection,
    seqn: i64,
) -> Result<Vec<Medication>, DatabaseError> {
    let sql = format!(
        "SELECT {MEDICATION_COLUMNS} FROM medications
         WHERE seqn = ?1
           AND rxddrug IS NOT NULL
           AND rxddrug <> ''
           AND rxddrug NOT IN (?2, ?3)
         ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![seqn, SENTINEL_DRUG_CODES[0], SENTINEL_DRUG_CODES[1]],
        row_to_medication,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

pub fn delete_medications(conn: &Connection, seqn: i64) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM medications WHERE seqn = ?1", params![seqn])?)
}

fn row_to_medication(row: &rusqlite::Row) -> Result<Medication, rusqlite::Error> {
    Ok(Medication {
        id: row.get("id")?,
        seqn: row.get("seqn")?,
        rxduse: row.get("rxduse")?,
        rxddrug: row.get("rxddrug")?,
        rxddrgid: row.get("rxddrgid")?,
        rxqseen: row.get("rxqseen")?,
        rxddays: row.get("rxddays")?,
        rxdrsc1: row.get("rxdrsc1")?,
        rxdrsc2: row.get("rxdrsc2")?,
        rxdrsc3: row.get("rxdrsc3")?,
        rxdrsd1: row.get("rxdrsd1")?,
        rxdrsd2: row.get("rxdrsd2")?,
        rxdrsd3: row.get("rxdrsd3")?,
        rxdcount: row.get("rxdcount")?,
    })
}
