use std::collections::{HashMap, HashSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::dto::movement::{
    BandPartition, DivisionBands, DivisionTransition, StageProcessingReport,
};
use crate::error::{LeagueError, LeagueResult, StorageError};
use crate::models::{
    Division, LeagueSettings, MovementKind, MovementTrigger, NewDivisionMovement, PlayerRanking,
};
use crate::repository::{LeagueStore, RankingQuery};

use super::averages::{count_to_u32, recompute_division_rankings};
use super::settings::resolve_settings;

/// `clamp(round(registered * percentage / 100), minimum, maximum)`.
///
/// The same quota is used for promotions out of and relegations out of a
/// division. A maximum below the minimum is raised to the minimum.
pub fn compute_quota(registered: u32, settings: &LeagueSettings) -> u32 {
    let raw = (Decimal::from(registered) * settings.promotion_percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);

    let maximum = settings.maximum_quota.max(settings.minimum_quota);
    raw.clamp(settings.minimum_quota, maximum)
}

pub fn sort_canonical(rows: &mut [PlayerRanking]) {
    rows.sort_by(PlayerRanking::canonical_cmp);
}

fn player_ids(rows: &[PlayerRanking]) -> HashSet<Uuid> {
    rows.iter().map(|r| r.player_id).collect()
}

/// First `quota` players of the ranking who reached the required minimum.
pub fn promotion_band(ranked: &[PlayerRanking], quota: usize) -> Vec<PlayerRanking> {
    ranked
        .iter()
        .filter(|r| r.meets_minimum)
        .take(quota)
        .cloned()
        .collect()
}

/// Last `quota` players of the full ranking once the promoted players are
/// taken out. Eligibility plays no part here.
pub fn relegation_band(
    ranked: &[PlayerRanking],
    promoted: &[PlayerRanking],
    quota: usize,
) -> Vec<PlayerRanking> {
    let promoted = player_ids(promoted);
    let remaining: Vec<&PlayerRanking> = ranked
        .iter()
        .filter(|r| !promoted.contains(&r.player_id))
        .collect();

    let start = remaining.len().saturating_sub(quota);
    remaining[start..].iter().map(|r| (*r).clone()).collect()
}

/// The `size` players right below the promotion cut line. The cut sits after
/// the last promoted player, or at `quota` when nobody was promoted. Empty
/// when fewer than `size` candidates remain past the cut.
pub fn playoff_promotion_band(
    ranked: &[PlayerRanking],
    promoted: &[PlayerRanking],
    relegated: &[PlayerRanking],
    quota: usize,
    size: usize,
) -> Vec<PlayerRanking> {
    let cut = promoted
        .last()
        .and_then(|last| ranked.iter().position(|r| r.player_id == last.player_id))
        .map(|index| index + 1)
        .unwrap_or(quota)
        .min(ranked.len());

    let excluded: HashSet<Uuid> = player_ids(promoted)
        .union(&player_ids(relegated))
        .copied()
        .collect();

    let candidates: Vec<&PlayerRanking> = ranked[cut..]
        .iter()
        .filter(|r| !excluded.contains(&r.player_id))
        .collect();

    if candidates.len() < size {
        return Vec::new();
    }

    candidates.into_iter().take(size).cloned().collect()
}

/// The `size` players right above the relegation cut line, taken from the
/// ranking without its promoted players.
pub fn playoff_relegation_band(
    ranked: &[PlayerRanking],
    promoted: &[PlayerRanking],
    excluded: &[PlayerRanking],
    quota: usize,
    size: usize,
) -> Vec<PlayerRanking> {
    let promoted = player_ids(promoted);
    let excluded = player_ids(excluded);
    let remaining: Vec<&PlayerRanking> = ranked
        .iter()
        .filter(|r| !promoted.contains(&r.player_id))
        .collect();

    let end = remaining.len().saturating_sub(quota);
    let start = remaining.len().saturating_sub(quota + size);

    remaining[start..end]
        .iter()
        .filter(|r| !excluded.contains(&r.player_id))
        .map(|r| (*r).clone())
        .collect()
}

/// Splits a canonically ordered ranking into its four bands.
///
/// The top division (`has_superior == false`) promotes nobody and the bottom
/// one (`has_inferior == false`) relegates nobody.
pub fn partition_division(
    ranked: &[PlayerRanking],
    quota: u32,
    playoff_players: u32,
    has_superior: bool,
    has_inferior: bool,
) -> BandPartition {
    let quota = quota as usize;
    let size = playoff_players as usize;

    let promotion = if has_superior {
        promotion_band(ranked, quota)
    } else {
        Vec::new()
    };

    let relegation = if has_inferior {
        relegation_band(ranked, &promotion, quota)
    } else {
        Vec::new()
    };

    let playoff_promotion = if has_superior {
        playoff_promotion_band(ranked, &promotion, &relegation, quota, size)
    } else {
        Vec::new()
    };

    let playoff_relegation = if has_inferior {
        playoff_relegation_band(ranked, &promotion, &relegation, quota, size)
    } else {
        Vec::new()
    };

    BandPartition {
        promotion,
        relegation,
        playoff_promotion,
        playoff_relegation,
    }
}

async fn compute_bands(
    store: &dyn LeagueStore,
    stage_id: Uuid,
    division: Division,
    has_superior: bool,
    has_inferior: bool,
) -> LeagueResult<DivisionBands> {
    let registered = count_to_u32(
        store
            .count_active_registrations(stage_id, division.division_id)
            .await?,
    );
    let settings = resolve_settings(store, stage_id, division.division_id).await?;
    let quota = compute_quota(registered, &settings);

    let mut ranking = store
        .list_rankings(&RankingQuery::division(stage_id, division.division_id))
        .await?;
    sort_canonical(&mut ranking);

    let bands = partition_division(
        &ranking,
        quota,
        settings.playoff_players,
        has_superior,
        has_inferior,
    );

    Ok(DivisionBands {
        division,
        registered_players: registered,
        quota,
        settings,
        ranking,
        bands,
    })
}

/// Band preview for a single division, from its stored ranking.
pub async fn division_bands(
    store: &dyn LeagueStore,
    stage_id: Uuid,
    division_id: Uuid,
) -> LeagueResult<DivisionBands> {
    let divisions = store.list_divisions(stage_id).await?;
    let index = divisions
        .iter()
        .position(|d| d.division_id == division_id)
        .ok_or(StorageError::NotFound)?;

    let has_superior = index > 0;
    let has_inferior = index + 1 < divisions.len();
    let division = divisions[index].clone();

    compute_bands(store, stage_id, division, has_superior, has_inferior).await
}

/// Runs the promotion/relegation pass of a whole stage.
///
/// Every division ranking is recomputed from its played matches first.
/// Holds the stage lease for the duration of the pass. Any store failure
/// aborts the pass; movements written before the failure are kept.
pub async fn process_stage_movements(
    store: &dyn LeagueStore,
    stage_id: Uuid,
) -> LeagueResult<StageProcessingReport> {
    let stage = store.get_stage(stage_id).await?;

    if !store.acquire_stage_lease(stage_id).await? {
        tracing::warn!(%stage_id, "Stage is already being processed");
        return Err(LeagueError::StageBusy(stage_id));
    }

    tracing::info!(%stage_id, stage = %stage.name, "Processing stage movements");

    let outcome = run_stage_pass(store, stage_id).await;
    let released = store.release_stage_lease(stage_id).await;

    match (outcome, released) {
        (Err(e), _) => {
            tracing::error!(%stage_id, error = %e, "Stage processing aborted");
            Err(e)
        }
        (Ok(_), Err(e)) => {
            tracing::error!(%stage_id, error = %e, "Failed to release stage lease");
            Err(e.into())
        }
        (Ok(report), Ok(())) => {
            tracing::info!(
                %stage_id,
                movements = report.movements_recorded,
                "Stage movements processed"
            );
            Ok(report)
        }
    }
}

async fn run_stage_pass(
    store: &dyn LeagueStore,
    stage_id: Uuid,
) -> LeagueResult<StageProcessingReport> {
    let divisions = store.list_divisions(stage_id).await?;
    let count = divisions.len();

    let mut computed = Vec::with_capacity(count);
    for (index, division) in divisions.into_iter().enumerate() {
        recompute_division_rankings(store, stage_id, division.division_id).await?;
        computed.push(compute_bands(store, stage_id, division, index > 0, index + 1 < count).await?);
    }

    let mut report = StageProcessingReport {
        stage_id,
        movements_recorded: 0,
        transitions: Vec::new(),
    };

    for pair in computed.windows(2) {
        let (superior, inferior) = (&pair[0], &pair[1]);

        for ranking in &inferior.bands.promotion {
            store
                .insert_movement(&automatic_movement(
                    stage_id,
                    ranking,
                    inferior,
                    superior,
                    MovementKind::Promotion,
                ))
                .await?;
            report.movements_recorded += 1;
        }

        for ranking in &superior.bands.relegation {
            store
                .insert_movement(&automatic_movement(
                    stage_id,
                    ranking,
                    superior,
                    inferior,
                    MovementKind::Relegation,
                ))
                .await?;
            report.movements_recorded += 1;
        }

        let transition = DivisionTransition {
            superior_division_id: superior.division.division_id,
            inferior_division_id: inferior.division.division_id,
            quota: inferior.quota,
            promoted: ids(&inferior.bands.promotion),
            relegated: ids(&superior.bands.relegation),
            playoff_promotion: ids(&inferior.bands.playoff_promotion),
            playoff_relegation: ids(&superior.bands.playoff_relegation),
        };

        tracing::info!(
            superior = superior.division.division_number,
            inferior = inferior.division.division_number,
            promoted = transition.promoted.len(),
            relegated = transition.relegated.len(),
            playoff_promotion = ?transition.playoff_promotion,
            playoff_relegation = ?transition.playoff_relegation,
            "Division boundary resolved"
        );

        report.transitions.push(transition);
    }

    Ok(report)
}

fn automatic_movement(
    stage_id: Uuid,
    ranking: &PlayerRanking,
    origin: &DivisionBands,
    destination: &DivisionBands,
    kind: MovementKind,
) -> NewDivisionMovement {
    NewDivisionMovement {
        stage_id,
        player_id: ranking.player_id,
        origin_division_id: origin.division.division_id,
        destination_division_id: destination.division.division_id,
        kind,
        trigger: MovementTrigger::Automatic,
        final_average: Some(ranking.final_average),
        position: origin.position_of(ranking.player_id),
        playoff_id: None,
    }
}

fn ids(rows: &[PlayerRanking]) -> Vec<Uuid> {
    rows.iter().map(|r| r.player_id).collect()
}

/// Fills the score of pending movements from the player's ranking row in the
/// origin division. Returns how many movements were updated.
pub async fn backfill_pending_scores(store: &dyn LeagueStore, stage_id: Uuid) -> LeagueResult<u32> {
    let movements = store.list_movements(stage_id).await?;
    let mut rankings_by_division: HashMap<Uuid, Vec<PlayerRanking>> = HashMap::new();
    let mut updated = 0;

    for movement in movements.iter().filter(|m| m.is_pending()) {
        if !rankings_by_division.contains_key(&movement.origin_division_id) {
            let mut rows = store
                .list_rankings(&RankingQuery::division(stage_id, movement.origin_division_id))
                .await?;
            sort_canonical(&mut rows);
            rankings_by_division.insert(movement.origin_division_id, rows);
        }

        let rows = &rankings_by_division[&movement.origin_division_id];
        let Some(index) = rows.iter().position(|r| r.player_id == movement.player_id) else {
            tracing::debug!(
                movement_id = %movement.movement_id,
                player_id = %movement.player_id,
                "No ranking row yet for pending movement"
            );
            continue;
        };

        store
            .update_movement_score(
                movement.movement_id,
                rows[index].final_average,
                Some(index as i32 + 1),
            )
            .await?;
        updated += 1;
    }

    tracing::info!(%stage_id, updated, "Backfilled pending movement scores");

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeagueSettingsRow, MatchResult, Team};
    use crate::repository::MemoryStore;
    use crate::services::testing::seed_league;

    fn ranking(seed: u128, final_average: &str, meets_minimum: bool) -> PlayerRanking {
        PlayerRanking {
            ranking_id: Uuid::new_v4(),
            stage_id: Uuid::nil(),
            division_id: Uuid::nil(),
            player_id: Uuid::from_u128(seed),
            matches_played: 5,
            matches_won: 2,
            individual_average: Decimal::ZERO,
            general_average: Decimal::ZERO,
            play_bonus: Decimal::ZERO,
            final_average: final_average.parse().unwrap(),
            required_minimum: 4,
            meets_minimum,
            set_difference: 0,
            game_difference: 0,
            quality_wins: 0,
            computed_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Twenty players with strictly decreasing scores, player 1 first.
    fn ladder(count: u128) -> Vec<PlayerRanking> {
        (1..=count)
            .map(|seed| {
                let score = Decimal::ONE - Decimal::new(seed as i64, 2);
                ranking(seed, &score.to_string(), true)
            })
            .collect()
    }

    fn seeds(rows: &[PlayerRanking]) -> Vec<u128> {
        rows.iter().map(|r| r.player_id.as_u128()).collect()
    }

    #[test]
    fn test_quota_examples() {
        let defaults = LeagueSettings::default();
        assert_eq!(compute_quota(20, &defaults), 4);
        assert_eq!(compute_quota(5, &defaults), 2);
        assert_eq!(compute_quota(0, &defaults), 2);
        assert_eq!(compute_quota(200, &defaults), 10);
        // 13 * 20% = 2.6
        assert_eq!(compute_quota(13, &defaults), 3);
        // 28 * 20% = 5.6, 27 * 20% = 5.4, 25 * 20% = 5.0
        assert_eq!(compute_quota(28, &defaults), 6);
        assert_eq!(compute_quota(27, &defaults), 5);
    }

    #[test]
    fn test_quota_rounds_half_up_and_tolerates_inverted_bounds() {
        let settings = LeagueSettings {
            promotion_percentage: Decimal::from(10),
            minimum_quota: 0,
            maximum_quota: 10,
            playoff_players: 4,
        };
        // 25 * 10% = 2.5
        assert_eq!(compute_quota(25, &settings), 3);

        let inverted = LeagueSettings {
            minimum_quota: 5,
            maximum_quota: 3,
            ..settings
        };
        assert_eq!(compute_quota(100, &inverted), 5);
    }

    #[test]
    fn test_canonical_order_tie_breaks() {
        let mut a = ranking(1, "0.50", true);
        let mut b = ranking(2, "0.50", true);
        let mut c = ranking(3, "0.50", true);
        let d = ranking(4, "0.70", true);
        a.set_difference = 1;
        b.set_difference = 3;
        c.set_difference = 3;
        c.game_difference = 5;
        b.game_difference = 5;
        b.quality_wins = 2;

        let mut rows = vec![a, b, c, d];
        sort_canonical(&mut rows);
        assert_eq!(seeds(&rows), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_promotion_skips_ineligible_players() {
        let mut rows = ladder(10);
        rows[0].meets_minimum = false;
        rows[2].meets_minimum = false;

        let promoted = promotion_band(&rows, 3);
        assert_eq!(seeds(&promoted), vec![2, 4, 5]);
        assert!(promoted.iter().all(|r| r.meets_minimum));
    }

    #[test]
    fn test_relegation_ignores_eligibility_and_excludes_promoted() {
        let mut rows = ladder(6);
        rows[5].meets_minimum = false;
        let promoted = promotion_band(&rows, 4);

        let relegated = relegation_band(&rows, &promoted, 4);
        // only players 5 and 6 are left once the top four moved up
        assert_eq!(seeds(&relegated), vec![5, 6]);
    }

    #[test]
    fn test_reference_division_of_twenty() {
        let rows = ladder(20);
        let quota = compute_quota(20, &LeagueSettings::default());
        let bands = partition_division(&rows, quota, 4, true, true);

        assert_eq!(seeds(&bands.promotion), vec![1, 2, 3, 4]);
        assert_eq!(seeds(&bands.relegation), vec![17, 18, 19, 20]);
        assert_eq!(seeds(&bands.playoff_promotion), vec![5, 6, 7, 8]);
        assert_eq!(seeds(&bands.playoff_relegation), vec![13, 14, 15, 16]);

        let promoted = player_ids(&bands.promotion);
        assert!(bands
            .relegation
            .iter()
            .chain(bands.playoff_promotion.iter())
            .chain(bands.playoff_relegation.iter())
            .all(|r| !promoted.contains(&r.player_id)));
    }

    #[test]
    fn test_playoff_promotion_cut_follows_last_promoted_player() {
        let mut rows = ladder(12);
        rows[1].meets_minimum = false;

        let bands = partition_division(&rows, 2, 3, true, false);
        assert_eq!(seeds(&bands.promotion), vec![1, 3]);
        // player 2 sits above the cut and is not a playoff candidate
        assert_eq!(seeds(&bands.playoff_promotion), vec![4, 5, 6]);
        assert!(bands.relegation.is_empty());
        assert!(bands.playoff_relegation.is_empty());
    }

    #[test]
    fn test_small_division_has_no_playoff_promotion_band() {
        let rows = ladder(5);
        let bands = partition_division(&rows, 2, 4, true, true);

        assert_eq!(seeds(&bands.promotion), vec![1, 2]);
        assert_eq!(seeds(&bands.relegation), vec![4, 5]);
        assert!(bands.playoff_promotion.is_empty());
        assert_eq!(seeds(&bands.playoff_relegation), vec![3]);
    }

    #[test]
    fn test_playoff_bands_may_share_players() {
        let rows = ladder(10);
        let bands = partition_division(&rows, 2, 4, true, true);

        assert_eq!(seeds(&bands.promotion), vec![1, 2]);
        assert_eq!(seeds(&bands.relegation), vec![9, 10]);
        assert_eq!(seeds(&bands.playoff_promotion), vec![3, 4, 5, 6]);
        // only the relegated players are kept out of the relegation playoff
        assert_eq!(seeds(&bands.playoff_relegation), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_full_ties_order_by_player_id() {
        let mut rows = vec![
            ranking(7, "0.50", true),
            ranking(3, "0.50", true),
            ranking(5, "0.50", true),
        ];
        sort_canonical(&mut rows);
        assert_eq!(seeds(&rows), vec![3, 5, 7]);

        rows.reverse();
        sort_canonical(&mut rows);
        assert_eq!(seeds(&rows), vec![3, 5, 7]);
    }

    #[test]
    fn test_top_and_bottom_divisions() {
        let rows = ladder(8);
        let top = partition_division(&rows, 2, 2, false, true);
        assert!(top.promotion.is_empty());
        assert!(top.playoff_promotion.is_empty());
        assert_eq!(seeds(&top.relegation), vec![7, 8]);
        assert_eq!(seeds(&top.playoff_relegation), vec![5, 6]);

        let bottom = partition_division(&rows, 2, 2, true, false);
        assert_eq!(seeds(&bottom.promotion), vec![1, 2]);
        assert!(bottom.relegation.is_empty());
        assert!(bottom.playoff_relegation.is_empty());
    }

    #[tokio::test]
    async fn test_stage_pass_records_movements_for_each_boundary() {
        let league = seed_league(3, 10).await;

        let report = process_stage_movements(&league.store, league.stage_id)
            .await
            .unwrap();

        assert_eq!(report.transitions.len(), 2);
        // quota is clamped to 2 for ten players; two boundaries, both ways
        assert_eq!(report.movements_recorded, 8);

        let movements = league.store.list_movements(league.stage_id).await.unwrap();
        assert_eq!(movements.len(), 8);
        assert!(movements.iter().all(|m| m.trigger == MovementTrigger::Automatic));
        assert!(movements.iter().all(|m| !m.is_pending()));

        let promoted_from_second: Vec<_> = movements
            .iter()
            .filter(|m| {
                m.kind == MovementKind::Promotion
                    && m.origin_division_id == league.divisions[1].division_id
            })
            .collect();
        assert_eq!(promoted_from_second.len(), 2);
        assert!(promoted_from_second
            .iter()
            .all(|m| m.destination_division_id == league.divisions[0].division_id));
        assert!(promoted_from_second
            .iter()
            .all(|m| league.players[1].contains(&m.player_id)));

        let relegated_from_top = movements
            .iter()
            .filter(|m| {
                m.kind == MovementKind::Relegation
                    && m.origin_division_id == league.divisions[0].division_id
            })
            .count();
        assert_eq!(relegated_from_top, 2);

        let nothing_leaves_bottom_downwards = movements.iter().all(|m| {
            !(m.kind == MovementKind::Relegation
                && m.origin_division_id == league.divisions[2].division_id)
        });
        assert!(nothing_leaves_bottom_downwards);

        for transition in &report.transitions {
            let promoted: HashSet<Uuid> = transition.promoted.iter().copied().collect();
            assert!(transition.relegated.iter().all(|p| !promoted.contains(p)));
        }

        assert!(!league.store.is_stage_leased(league.stage_id));
    }

    #[tokio::test]
    async fn test_stage_pass_uses_matches_recorded_after_last_recompute() {
        let league = seed_league(2, 10).await;
        let division = &league.divisions[1];
        let members = &league.players[1];

        for _ in 0..20 {
            league.store.add_played_match(
                division,
                [members[8], members[9]],
                [members[0], members[1]],
                MatchResult {
                    winner: Team::A,
                    sets_team_a: 2,
                    sets_team_b: 0,
                    games_team_a: 12,
                    games_team_b: 6,
                },
            );
        }

        let report = process_stage_movements(&league.store, league.stage_id)
            .await
            .unwrap();

        let promoted = &report.transitions[0].promoted;
        assert!(promoted.contains(&members[8]));
        assert!(!promoted.contains(&members[0]));

        let preview = division_bands(&league.store, league.stage_id, division.division_id)
            .await
            .unwrap();
        let previewed: Vec<Uuid> = preview.bands.promotion.iter().map(|r| r.player_id).collect();
        assert_eq!(&previewed, promoted);
    }

    #[tokio::test]
    async fn test_stage_pass_respects_division_settings() {
        let league = seed_league(2, 10).await;
        league.store.add_settings(LeagueSettingsRow {
            settings_id: Uuid::new_v4(),
            stage_id: league.stage_id,
            division_id: Some(league.divisions[1].division_id),
            promotion_percentage: Some(Decimal::from(30)),
            minimum_quota: None,
            maximum_quota: None,
            playoff_players: None,
        });

        let report = process_stage_movements(&league.store, league.stage_id)
            .await
            .unwrap();

        assert_eq!(report.transitions[0].quota, 3);
        assert_eq!(report.transitions[0].promoted.len(), 3);
        // the top division keeps the stage default of two
        assert_eq!(report.transitions[0].relegated.len(), 2);
    }

    #[tokio::test]
    async fn test_busy_stage_is_rejected() {
        let league = seed_league(2, 6).await;
        assert!(league
            .store
            .acquire_stage_lease(league.stage_id)
            .await
            .unwrap());

        let result = process_stage_movements(&league.store, league.stage_id).await;
        assert!(matches!(result, Err(LeagueError::StageBusy(id)) if id == league.stage_id));

        let movements = league.store.list_movements(league.stage_id).await.unwrap();
        assert!(movements.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_aborts_and_keeps_written_movements() {
        let league = seed_league(2, 10).await;
        league.store.reject_movements_after(1);

        let result = process_stage_movements(&league.store, league.stage_id).await;
        assert!(matches!(result, Err(LeagueError::Storage(_))));

        let movements = league.store.list_movements(league.stage_id).await.unwrap();
        assert_eq!(movements.len(), 1);
        assert!(!league.store.is_stage_leased(league.stage_id));
    }

    #[tokio::test]
    async fn test_unknown_stage_is_not_found() {
        let store = MemoryStore::new();
        let result = process_stage_movements(&store, Uuid::new_v4()).await;
        assert!(matches!(
            result,
            Err(LeagueError::Storage(crate::error::StorageError::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_division_bands_preview() {
        let league = seed_league(2, 10).await;

        let top = division_bands(&league.store, league.stage_id, league.divisions[0].division_id)
            .await
            .unwrap();
        assert_eq!(top.registered_players, 10);
        assert_eq!(top.quota, 2);
        assert!(top.bands.promotion.is_empty());
        assert_eq!(top.bands.relegation.len(), 2);
        assert_eq!(top.position_of(top.ranking[0].player_id), Some(1));

        let bottom =
            division_bands(&league.store, league.stage_id, league.divisions[1].division_id)
                .await
                .unwrap();
        assert_eq!(bottom.bands.promotion.len(), 2);
        assert!(bottom.bands.relegation.is_empty());
        assert_eq!(bottom.bands.playoff_promotion.len(), 4);
    }
}
