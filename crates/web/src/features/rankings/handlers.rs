use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        ranking::{DivisionRankingFilter, RankingEntry},
    },
    models::LeagueSettings,
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stages/{stage_id}/divisions/{division_id}/ranking",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id"),
        ("division_id" = Uuid, Path, description = "Division id"),
        DivisionRankingFilter
    ),
    responses(
        (status = 200, description = "Division ranking retrieved successfully", body = PaginatedResponse<RankingEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "rankings"
)]
pub async fn get_division_ranking(
    State(db): State<Database>,
    Path((stage_id, division_id)): Path<(Uuid, Uuid)>,
    Query(filter): Query<DivisionRankingFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) =
        services::get_division_ranking(&db, stage_id, division_id, &filter).await?;

    let response = PaginatedResponse::new(entries, filter.pagination(), total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/stages/{stage_id}/divisions/{division_id}/ranking/recompute",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id"),
        ("division_id" = Uuid, Path, description = "Division id")
    ),
    responses(
        (status = 200, description = "Ranking recomputed from played matches", body = Vec<RankingEntry>),
        (status = 404, description = "Division not found")
    ),
    tag = "rankings"
)]
pub async fn recompute_division_ranking(
    State(db): State<Database>,
    Path((stage_id, division_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let entries = services::recompute_division_ranking(&db, stage_id, division_id).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stages/{stage_id}/divisions/{division_id}/settings",
    params(
        ("stage_id" = Uuid, Path, description = "Stage id"),
        ("division_id" = Uuid, Path, description = "Division id")
    ),
    responses(
        (status = 200, description = "Resolved promotion and playoff settings", body = LeagueSettings),
        (status = 404, description = "Division not found")
    ),
    tag = "rankings"
)]
pub async fn get_division_settings(
    State(db): State<Database>,
    Path((stage_id, division_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let settings = services::get_division_settings(&db, stage_id, division_id).await?;

    Ok(Json(settings).into_response())
}
