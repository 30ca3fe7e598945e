use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::movement::{BackfillResponse, DivisionBands, StageProcessingReport},
    models::DivisionMovement,
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stages/{stage_id}/divisions/{division_id}/bands",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id"),
        ("division_id" = Uuid, Path, description = "Division id")
    ),
    responses(
        (status = 200, description = "Promotion, relegation and playoff bands of the division", body = DivisionBands),
        (status = 404, description = "Division not found in stage")
    ),
    tag = "movements"
)]
pub async fn get_division_bands(
    State(db): State<Database>,
    Path((stage_id, division_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let bands = services::get_division_bands(&db, stage_id, division_id).await?;

    Ok(Json(bands).into_response())
}

#[utoipa::path(
    post,
    path = "/api/stages/{stage_id}/movements/process",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id")
    ),
    responses(
        (status = 200, description = "Stage processed and movements recorded", body = StageProcessingReport),
        (status = 404, description = "Stage not found"),
        (status = 409, description = "Stage is already being processed")
    ),
    tag = "movements"
)]
pub async fn process_stage(
    State(db): State<Database>,
    Path(stage_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let report = services::process_stage(&db, stage_id).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stages/{stage_id}/movements",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id")
    ),
    responses(
        (status = 200, description = "Division movements recorded for the stage", body = Vec<DivisionMovement>),
        (status = 404, description = "Stage not found")
    ),
    tag = "movements"
)]
pub async fn list_movements(
    State(db): State<Database>,
    Path(stage_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let movements = services::list_movements(&db, stage_id).await?;

    Ok(Json(movements).into_response())
}

#[utoipa::path(
    post,
    path = "/api/stages/{stage_id}/movements/backfill",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id")
    ),
    responses(
        (status = 200, description = "Pending movement scores filled", body = BackfillResponse),
        (status = 404, description = "Stage not found")
    ),
    tag = "movements"
)]
pub async fn backfill_scores(
    State(db): State<Database>,
    Path(stage_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let response = services::backfill_scores(&db, stage_id).await?;

    Ok(Json(response).into_response())
}
