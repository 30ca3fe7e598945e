use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::playoff::{AppliedMovementsResponse, CreatePlayoffsRequest, RecordPlayoffResultRequest},
    models::Playoff,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/stages/{stage_id}/divisions/{division_id}/playoffs",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id"),
        ("division_id" = Uuid, Path, description = "Division id")
    ),
    request_body = CreatePlayoffsRequest,
    responses(
        (status = 201, description = "Playoff ties and their matches created", body = Vec<Playoff>),
        (status = 404, description = "Division not found in stage"),
        (status = 422, description = "Playoff band is too small")
    ),
    tag = "playoffs"
)]
pub async fn create_playoffs(
    State(db): State<Database>,
    Path((stage_id, division_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<CreatePlayoffsRequest>,
) -> Result<Response, WebError> {
    let playoffs = services::create_playoffs(&db, stage_id, division_id, &req).await?;

    Ok((StatusCode::CREATED, Json(playoffs)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stages/{stage_id}/playoffs",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id")
    ),
    responses(
        (status = 200, description = "Playoff ties of the stage", body = Vec<Playoff>),
        (status = 404, description = "Stage not found")
    ),
    tag = "playoffs"
)]
pub async fn list_playoffs(
    State(db): State<Database>,
    Path(stage_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let playoffs = services::list_playoffs(&db, stage_id).await?;

    Ok(Json(playoffs).into_response())
}

#[utoipa::path(
    put,
    path = "/api/playoffs/{playoff_id}/result",
    params(
        ("playoff_id" = Uuid, Path, description = "Playoff id")
    ),
    request_body = RecordPlayoffResultRequest,
    responses(
        (status = 200, description = "Result recorded on the tie and its match", body = Playoff),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Playoff not found"),
        (status = 422, description = "Winner does not match the set count")
    ),
    tag = "playoffs"
)]
pub async fn record_result(
    State(db): State<Database>,
    Path(playoff_id): Path<Uuid>,
    Json(req): Json<RecordPlayoffResultRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let playoff = services::record_result(&db, playoff_id, &req).await?;

    Ok(Json(playoff).into_response())
}

#[utoipa::path(
    post,
    path = "/api/playoffs/{playoff_id}/movements",
    params(
        ("playoff_id" = Uuid, Path, description = "Playoff id")
    ),
    responses(
        (status = 201, description = "Playoff movements recorded", body = AppliedMovementsResponse),
        (status = 404, description = "Playoff not found"),
        (status = 422, description = "Playoff not played or already applied")
    ),
    tag = "playoffs"
)]
pub async fn apply_movements(
    State(db): State<Database>,
    Path(playoff_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let response = services::apply_movements(&db, playoff_id).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}
