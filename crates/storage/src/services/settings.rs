use uuid::Uuid;

use crate::error::LeagueResult;
use crate::models::LeagueSettings;
use crate::repository::LeagueStore;

/// Effective promotion/relegation tuning of a division.
pub async fn resolve_settings(
    store: &dyn LeagueStore,
    stage_id: Uuid,
    division_id: Uuid,
) -> LeagueResult<LeagueSettings> {
    let rows = store.list_settings(stage_id).await?;
    let settings = LeagueSettings::resolve(&rows, division_id);

    tracing::debug!(
        %stage_id,
        %division_id,
        rows = rows.len(),
        ?settings,
        "Resolved league settings"
    );

    Ok(settings)
}
