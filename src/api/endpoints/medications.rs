//! `GET /api/patients/:id/medications`

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::endpoints::patients::extract;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::patients::{self, MedicationView};

/// `GET /api/patients/:id/medications`: reported medications in row order.
pub async fn list(
    State(ctx): State<ApiContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<MedicationView>>, ApiError> {
    let Path(seqn) = extract(id)?;

    let conn = ctx.open_db()?;
    let meds = patients::list_medications(&conn, seqn)?;
    Ok(Json(meds))
}
