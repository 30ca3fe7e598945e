use storage::{
    Database,
    dto::playoff::{AppliedMovementsResponse, CreatePlayoffsRequest, RecordPlayoffResultRequest},
    error::LeagueResult,
    models::{MatchResult, Playoff},
    repository::LeagueStore,
    services::playoffs,
};
use uuid::Uuid;

/// Pair a division's playoff band and create its ties
pub async fn create_playoffs(
    db: &Database,
    stage_id: Uuid,
    division_id: Uuid,
    request: &CreatePlayoffsRequest,
) -> LeagueResult<Vec<Playoff>> {
    playoffs::create_division_playoffs(&db.league(), stage_id, division_id, request.zone).await
}

/// List the playoff ties of a stage
pub async fn list_playoffs(db: &Database, stage_id: Uuid) -> LeagueResult<Vec<Playoff>> {
    let store = db.league();
    store.get_stage(stage_id).await?;

    Ok(store.list_playoffs(stage_id).await?)
}

/// Record the result of a tie
pub async fn record_result(
    db: &Database,
    playoff_id: Uuid,
    request: &RecordPlayoffResultRequest,
) -> LeagueResult<Playoff> {
    playoffs::record_playoff_result(&db.league(), playoff_id, &MatchResult::from(request)).await
}

/// Apply the promotion and relegation decided by a played tie
pub async fn apply_movements(
    db: &Database,
    playoff_id: Uuid,
) -> LeagueResult<AppliedMovementsResponse> {
    let movements = playoffs::apply_playoff_movements(&db.league(), playoff_id).await?;

    Ok(AppliedMovementsResponse {
        playoff_id,
        movements,
    })
}
