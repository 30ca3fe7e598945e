use storage::{
    Database,
    dto::movement::{BackfillResponse, DivisionBands, StageProcessingReport},
    error::LeagueResult,
    models::DivisionMovement,
    repository::LeagueStore,
    services::movements,
};
use uuid::Uuid;

/// Band preview of one division from its stored ranking
pub async fn get_division_bands(
    db: &Database,
    stage_id: Uuid,
    division_id: Uuid,
) -> LeagueResult<DivisionBands> {
    movements::division_bands(&db.league(), stage_id, division_id).await
}

/// Run the promotion/relegation pass of a stage
pub async fn process_stage(db: &Database, stage_id: Uuid) -> LeagueResult<StageProcessingReport> {
    movements::process_stage_movements(&db.league(), stage_id).await
}

/// Movement audit list of a stage
pub async fn list_movements(db: &Database, stage_id: Uuid) -> LeagueResult<Vec<DivisionMovement>> {
    let store = db.league();
    store.get_stage(stage_id).await?;

    Ok(store.list_movements(stage_id).await?)
}

/// Fill pending movement scores from the current rankings
pub async fn backfill_scores(db: &Database, stage_id: Uuid) -> LeagueResult<BackfillResponse> {
    let store = db.league();
    store.get_stage(stage_id).await?;

    let updated = movements::backfill_pending_scores(&store, stage_id).await?;
    Ok(BackfillResponse { stage_id, updated })
}
