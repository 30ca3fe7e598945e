use storage::{
    Database,
    dto::ranking::{DivisionRankingFilter, RankingEntry},
    error::LeagueResult,
    models::LeagueSettings,
    repository::{LeagueStore, RankingQuery},
    services::{averages, settings},
};
use uuid::Uuid;

/// One page of a division ranking in canonical order, with the total row count
pub async fn get_division_ranking(
    db: &Database,
    stage_id: Uuid,
    division_id: Uuid,
    filter: &DivisionRankingFilter,
) -> LeagueResult<(Vec<RankingEntry>, i64)> {
    let store = db.league();
    let pagination = filter.pagination();

    let mut query = RankingQuery::division(stage_id, division_id);
    if filter.only_eligible {
        query = query.eligible_only();
    }

    let total = store.count_rankings(&query).await?;
    let rows = store
        .list_rankings(&query.range(
            i64::from(pagination.offset()),
            i64::from(pagination.limit()),
        ))
        .await?;

    Ok((RankingEntry::numbered(rows, pagination.offset()), total))
}

/// Recompute and store the ranking of a division
pub async fn recompute_division_ranking(
    db: &Database,
    stage_id: Uuid,
    division_id: Uuid,
) -> LeagueResult<Vec<RankingEntry>> {
    let store = db.league();
    store.get_division(division_id).await?;

    let rows = averages::recompute_division_rankings(&store, stage_id, division_id).await?;
    Ok(RankingEntry::numbered(rows, 0))
}

/// Effective settings of a division
pub async fn get_division_settings(
    db: &Database,
    stage_id: Uuid,
    division_id: Uuid,
) -> LeagueResult<LeagueSettings> {
    let store = db.league();
    store.get_division(division_id).await?;

    settings::resolve_settings(&store, stage_id, division_id).await
}
