//! Patient endpoints.
//!
//! - `GET /api/patients`: paginated summaries with filters
//! - `POST /api/patients`: create
//! - `GET /api/patients/:id`: full detail
//! - `PUT /api/patients/:id`: partial update
//! - `DELETE /api/patients/:id`: remove with all sub-records

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::patients::{
    self, PatientCreate, PatientDetail, PatientPage, PatientQueryParams, PatientUpdate,
};

/// Unwrap an extractor result, mapping its rejection to an `ApiError`.
pub(crate) fn extract<T, R>(result: Result<T, R>) -> Result<T, ApiError>
where
    ApiError: From<R>,
{
    result.map_err(ApiError::from)
}

/// `GET /api/patients`: one page of patient summaries.
pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<PatientQueryParams>, QueryRejection>,
) -> Result<Json<PatientPage>, ApiError> {
    let Query(params) = extract(query)?;
    let query = patients::validate_query(&params)?;

    let conn = ctx.open_db()?;
    let page = patients::list_patients(&conn, &query)?;
    Ok(Json(page))
}

/// `GET /api/patients/:id`: full patient detail.
pub async fn detail(
    State(ctx): State<ApiContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatientDetail>, ApiError> {
    let Path(seqn) = extract(id)?;

    let conn = ctx.open_db()?;
    let detail = patients::get_patient(&conn, seqn)?;
    Ok(Json(detail))
}

/// `POST /api/patients`: create a patient, 201 with the new detail.
pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<PatientCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientDetail>), ApiError> {
    let Json(input) = extract(body)?;

    let conn = ctx.open_db()?;
    let detail = patients::create_patient(&conn, &input)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// `PUT /api/patients/:id`: apply a partial update.
pub async fn update(
    State(ctx): State<ApiContext>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PatientUpdate>, JsonRejection>,
) -> Result<Json<PatientDetail>, ApiError> {
    let Path(seqn) = extract(id)?;
    let Json(input) = extract(body)?;

    let conn = ctx.open_db()?;
    let detail = patients::update_patient(&conn, seqn, &input)?;
    Ok(Json(detail))
}

/// `DELETE /api/patients/:id`: 204 on success.
pub async fn remove(
    State(ctx): State<ApiContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(seqn) = extract(id)?;

    let conn = ctx.open_db()?;
    patients::delete_patient(&conn, seqn)?;
    Ok(StatusCode::NO_CONTENT)
}
