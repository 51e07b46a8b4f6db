use rusqlite::{named_params, params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Demographic, DemographicFilter, Gender};

const DEMOGRAPHIC_COLUMNS: &str = "seqn, riagendr, ridageyr, ridreth1, ridreth3, dmdeduc2, \
    dmdeduc3, dmdmartl, indhhin2, wtint2yr, wtmec2yr";

/// Insert a demographics row. The seqn must not already exist.
pub fn insert_demographic(conn: &Connection, demo: &Demographic) -> Result<(), DatabaseError> {
    let sql = format!(
        "INSERT INTO demographics ({DEMOGRAPHIC_COLUMNS})
         VALUES (:seqn, :riagendr, :ridageyr, :ridreth1, :ridreth3, :dmdeduc2,
                 :dmdeduc3, :dmdmartl, :indhhin2, :wtint2yr, :wtmec2yr)"
    );
    conn.execute(
        &sql,
        named_params! {
            ":seqn": demo.seqn,
            ":riagendr": demo.riagendr,
            ":ridageyr": demo.ridageyr,
            ":ridreth1": demo.ridreth1,
            ":ridreth3": demo.ridreth3,
            ":dmdeduc2": demo.dmdeduc2,
            ":dmdeduc3": demo.dmdeduc3,
            ":dmdmartl": demo.dmdmartl,
            ":indhhin2": demo.indhhin2,
            ":wtint2yr": demo.wtint2yr,
            ":wtmec2yr": demo.wtmec2yr,
        },
    )?;
    Ok(())
}

pub fn get_demographic(conn: &Connection, seqn: i64) -> Result<Option<Demographic>, DatabaseError> {
    let sql = format!("SELECT {DEMOGRAPHIC_COLUMNS} FROM demographics WHERE seqn = ?1");
    conn.query_row(&sql, params![seqn], row_to_demographic)
        .optional()
        .map_err(DatabaseError::from)
}

pub fn demographic_exists(conn: &Connection, seqn: i64) -> Result<bool, DatabaseError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM demographics WHERE seqn = ?1",
            params![seqn],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Highest seqn in use, 0 for an empty table.
pub fn max_seqn(conn: &Connection) -> Result<i64, DatabaseError> {
    let max: Option<i64> =
        conn.query_row("SELECT MAX(seqn) FROM demographics", [], |row| row.get(0))?;
    Ok(max.unwrap_or(0))
}

/// Delete the demographics row itself. Dependent rows must already be gone.
pub fn delete_demographic(conn: &Connection, seqn: i64) -> Result<(), DatabaseError> {
    let affected = conn.execute("DELETE FROM demographics WHERE seqn = ?1", params![seqn])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "demographic".into(),
            seqn,
        });
    }
    Ok(())
}

/// Builds the WHERE clause for the storage-level filters.
struct FilterQuery {
    sql: String,
    params: Vec<Box<dyn rusqlite::types::ToSql>>,
}

impl FilterQuery {
    fn new(filter: &DemographicFilter) -> Self {
        let mut sql = String::from(" WHERE 1=1");
        let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        match filter.gender {
            Some(Gender::Other) => {
                sql.push_str(" AND (riagendr IS NULL OR riagendr NOT IN (1, 2))");
            }
            Some(gender) => {
                params.push(Box::new(gender.code()));
                sql.push_str(&format!(" AND riagendr = ?{}", params.len()));
            }
            None => {}
        }
        if let Some(min_age) = filter.min_age {
            params.push(Box::new(min_age));
            sql.push_str(&format!(" AND ridageyr >= ?{}", params.len()));
        }
        if let Some(max_age) = filter.max_age {
            params.push(Box::new(max_age));
            sql.push_str(&format!(" AND ridageyr <= ?{}", params.len()));
        }

        Self { sql, params }
    }

    fn param_refs(&self) -> Vec<&dyn rusqlite::types::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

pub fn count_demographics(
    conn: &Connection,
    filter: &DemographicFilter,
) -> Result<i64, DatabaseError> {
    let query = FilterQuery::new(filter);
    let sql = format!("SELECT COUNT(*) FROM demographics{}", query.sql);
    let count = conn.query_row(&sql, query.param_refs().as_slice(), |row| row.get(0))?;
    Ok(count)
}

/// One page of demographics rows in seqn order.
pub fn list_demographics(
    conn: &Connection,
    filter: &DemographicFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Demographic>, DatabaseError> {
    let mut query = FilterQuery::new(filter);
    query.params.push(Box::new(limit));
    let limit_idx = query.params.len();
    query.params.push(Box::new(offset));
    let offset_idx = query.params.len();

    let sql = format!(
        "SELECT {DEMOGRAPHIC_COLUMNS} FROM demographics{}
         ORDER BY seqn ASC
         LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
        query.sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(query.param_refs().as_slice(), row_to_demographic)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn row_to_demographic(row: &rusqlite::Row) -> Result<Demographic, rusqlite::Error> {
    Ok(Demographic {
        seqn: row.get("seqn")?,
        riagendr: row.get("riagendr")?,
        ridageyr: row.get("ridageyr")?,
        ridreth1: row.get("ridreth1")?,
        ridreth3: row.get("ridreth3")?,
        dmdeduc2: row.get("dmdeduc2")?,
        dmdeduc3: row.get("dmdeduc3")?,
        dmdmartl: row.get("dmdmartl")?,
        indhhin2: row.get("indhhin2")?,
        wtint2yr: row.get("wtint2yr")?,
        wtmec2yr: row.get("wtmec2yr")?,
    })
}
