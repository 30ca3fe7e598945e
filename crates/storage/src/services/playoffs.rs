use uuid::Uuid;

use crate::error::{LeagueError, LeagueResult};
use crate::models::{
    DivisionMovement, MatchResult, MatchStatus, MovementKind, MovementTrigger,
    NewDivisionMovement, NewMatch, NewPlayoff, PlayerRanking, Playoff, PlayoffStatus,
};
use crate::repository::LeagueStore;

use super::movements::{division_bands, sort_canonical};

pub const MIN_PLAYOFF_PLAYERS: usize = 4;

/// Two player positions of one side of a playoff tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPair {
    pub player1: Uuid,
    pub player2: Uuid,
}

impl SlotPair {
    /// Pair for a player without an assigned partner. The second slot repeats
    /// the anchor player.
    pub fn solo(anchor: Uuid) -> Self {
        Self {
            player1: anchor,
            player2: anchor,
        }
    }

    /// Slot values with repeated players collapsed.
    pub fn distinct_players(&self) -> Vec<Uuid> {
        if self.player1 == self.player2 {
            vec![self.player1]
        } else {
            vec![self.player1, self.player2]
        }
    }
}

/// One best-versus-worst tie of a playoff band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoffPairing {
    pub superior: SlotPair,
    pub inferior: SlotPair,
    /// 1-based band positions of the superior and inferior anchors.
    pub positions: (usize, usize),
}

/// Pairs rank `i` with rank `M - 1 - i` of the band in canonical order.
/// With an odd band the middle player is left out.
pub fn pair_playoff_band(band: &[PlayerRanking]) -> LeagueResult<Vec<PlayoffPairing>> {
    if band.len() < MIN_PLAYOFF_PLAYERS {
        return Err(LeagueError::NotEnoughPlayoffPlayers {
            found: band.len(),
            required: MIN_PLAYOFF_PLAYERS,
        });
    }

    let mut ranked = band.to_vec();
    sort_canonical(&mut ranked);

    let size = ranked.len();
    Ok((0..size / 2)
        .map(|i| PlayoffPairing {
            superior: SlotPair::solo(ranked[i].player_id),
            inferior: SlotPair::solo(ranked[size - 1 - i].player_id),
            positions: (i + 1, size - i),
        })
        .collect())
}

/// Pairs the promotion (`zone = ascenso`) or relegation (`zone = descenso`)
/// playoff band of a division and stores one pending match and tie per pair.
pub async fn create_division_playoffs(
    store: &dyn LeagueStore,
    stage_id: Uuid,
    division_id: Uuid,
    zone: MovementKind,
) -> LeagueResult<Vec<Playoff>> {
    let computed = division_bands(store, stage_id, division_id).await?;
    let band = match zone {
        MovementKind::Promotion => &computed.bands.playoff_promotion,
        MovementKind::Relegation => &computed.bands.playoff_relegation,
    };

    let pairings = pair_playoff_band(band)?;
    let mut playoffs = Vec::with_capacity(pairings.len());

    for pairing in &pairings {
        let created_match = store
            .insert_match(&NewMatch {
                stage_id,
                division_id,
                player_a1: pairing.superior.player1,
                player_a2: pairing.superior.player2,
                player_b1: pairing.inferior.player1,
                player_b2: pairing.inferior.player2,
                status: MatchStatus::Pending,
            })
            .await?;

        let playoff = store
            .insert_playoff(&NewPlayoff {
                stage_id,
                division_id,
                zone,
                superior_player1: pairing.superior.player1,
                superior_player2: pairing.superior.player2,
                inferior_player1: pairing.inferior.player1,
                inferior_player2: pairing.inferior.player2,
                match_id: Some(created_match.match_id),
            })
            .await?;

        tracing::debug!(
            playoff_id = %playoff.playoff_id,
            match_id = %created_match.match_id,
            superior = pairing.positions.0,
            inferior = pairing.positions.1,
            "Created playoff tie"
        );
        playoffs.push(playoff);
    }

    tracing::info!(
        %stage_id,
        %division_id,
        ?zone,
        ties = playoffs.len(),
        "Created division playoffs"
    );

    Ok(playoffs)
}

/// Stores the result of a tie and mirrors it on the linked match. Recording
/// again overwrites the previous result.
pub async fn record_playoff_result(
    store: &dyn LeagueStore,
    playoff_id: Uuid,
    result: &MatchResult,
) -> LeagueResult<Playoff> {
    result.validate().map_err(LeagueError::InvalidResult)?;

    let playoff = store.update_playoff_result(playoff_id, result).await?;
    if let Some(match_id) = playoff.match_id {
        store.update_match_result(match_id, result).await?;
    }

    tracing::info!(
        %playoff_id,
        winner = ?result.winner,
        "Recorded playoff result"
    );

    Ok(playoff)
}

/// Records a promotion for the winning side and a relegation for the losing
/// side of a played tie. Scores stay pending until backfilled.
pub async fn apply_playoff_movements(
    store: &dyn LeagueStore,
    playoff_id: Uuid,
) -> LeagueResult<Vec<DivisionMovement>> {
    let playoff = store.get_playoff(playoff_id).await?;

    let winner = match (playoff.status, playoff.winner) {
        (PlayoffStatus::Played, Some(winner)) => winner,
        _ => return Err(LeagueError::PlayoffNotPlayed(playoff_id)),
    };

    let existing = store.list_movements(playoff.stage_id).await?;
    if existing.iter().any(|m| m.playoff_id == Some(playoff_id)) {
        return Err(LeagueError::PlayoffAlreadyApplied(playoff_id));
    }

    let division = store.get_division(playoff.division_id).await?;
    let divisions = store.list_divisions(playoff.stage_id).await?;
    let target = |number: i32| divisions.iter().find(|d| d.division_number == number);

    let sides = [
        (winner, MovementKind::Promotion, division.division_number - 1),
        (winner.opponent(), MovementKind::Relegation, division.division_number + 1),
    ];

    let mut movements = Vec::new();
    for (team, kind, number) in sides {
        let Some(destination) = target(number) else {
            tracing::warn!(
                %playoff_id,
                ?team,
                ?kind,
                division_number = number,
                "No target division for playoff movement, skipping"
            );
            continue;
        };

        let [first, second] = playoff.side(team);
        let pair = SlotPair {
            player1: first,
            player2: second,
        };

        for player_id in pair.distinct_players() {
            let movement = store
                .insert_movement(&NewDivisionMovement {
                    stage_id: playoff.stage_id,
                    player_id,
                    origin_division_id: division.division_id,
                    destination_division_id: destination.division_id,
                    kind,
                    trigger: MovementTrigger::Playoff,
                    final_average: None,
                    position: None,
                    playoff_id: Some(playoff_id),
                })
                .await?;
            movements.push(movement);
        }
    }

    tracing::info!(
        %playoff_id,
        winner = ?winner,
        movements = movements.len(),
        "Applied playoff movements"
    );

    Ok(movements)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::error::StorageError;
    use crate::models::Team;
    use crate::services::movements::backfill_pending_scores;
    use crate::services::testing::seed_league;

    fn band(count: u128) -> Vec<PlayerRanking> {
        (1..=count)
            .map(|seed| PlayerRanking {
                ranking_id: Uuid::new_v4(),
                stage_id: Uuid::nil(),
                division_id: Uuid::nil(),
                player_id: Uuid::from_u128(seed),
                matches_played: 6,
                matches_won: 3,
                individual_average: Decimal::ZERO,
                general_average: Decimal::ZERO,
                play_bonus: Decimal::ZERO,
                final_average: Decimal::new(100 - seed as i64, 2),
                required_minimum: 4,
                meets_minimum: true,
                set_difference: 0,
                game_difference: 0,
                quality_wins: 0,
                computed_at: chrono::Utc::now().naive_utc(),
            })
            .collect()
    }

    fn result(winner: Team) -> MatchResult {
        let (sets_team_a, sets_team_b) = match winner {
            Team::A => (2, 1),
            Team::B => (0, 2),
        };
        MatchResult {
            winner,
            sets_team_a,
            sets_team_b,
            games_team_a: 9,
            games_team_b: 12,
        }
    }

    #[test]
    fn test_eight_player_band_pairs_best_against_worst() {
        let mut players = band(8);
        players.reverse();

        let pairings = pair_playoff_band(&players).unwrap();
        assert_eq!(pairings.len(), 4);

        let anchors: Vec<(u128, u128)> = pairings
            .iter()
            .map(|p| (p.superior.player1.as_u128(), p.inferior.player1.as_u128()))
            .collect();
        assert_eq!(anchors, vec![(1, 8), (2, 7), (3, 6), (4, 5)]);
        assert_eq!(pairings[0].positions, (1, 8));
        assert_eq!(pairings[3].positions, (4, 5));
    }

    #[test]
    fn test_missing_partner_repeats_anchor() {
        let pairings = pair_playoff_band(&band(4)).unwrap();
        let first = &pairings[0];

        assert_eq!(first.superior.player1, first.superior.player2);
        assert_eq!(first.inferior.player1, first.inferior.player2);
        assert_eq!(first.superior.distinct_players().len(), 1);
    }

    #[test]
    fn test_odd_band_leaves_middle_player_out() {
        let pairings = pair_playoff_band(&band(5)).unwrap();
        assert_eq!(pairings.len(), 2);
        assert!(pairings
            .iter()
            .all(|p| p.superior.player1 != Uuid::from_u128(3)
                && p.inferior.player1 != Uuid::from_u128(3)));
    }

    #[test]
    fn test_small_band_is_rejected() {
        let error = pair_playoff_band(&band(3)).unwrap_err();
        assert!(matches!(
            error,
            LeagueError::NotEnoughPlayoffPlayers {
                found: 3,
                required: 4
            }
        ));
    }

    #[tokio::test]
    async fn test_create_playoffs_for_promotion_zone() {
        let league = seed_league(3, 10).await;
        let middle = &league.divisions[1];

        let playoffs = create_division_playoffs(
            &league.store,
            league.stage_id,
            middle.division_id,
            MovementKind::Promotion,
        )
        .await
        .unwrap();
        assert_eq!(playoffs.len(), 2);

        let bands = division_bands(&league.store, league.stage_id, middle.division_id)
            .await
            .unwrap();
        let band = &bands.bands.playoff_promotion;
        assert_eq!(playoffs[0].superior_player1, band[0].player_id);
        assert_eq!(playoffs[0].inferior_player1, band[3].player_id);

        let matches = league.store.matches();
        for playoff in &playoffs {
            assert_eq!(playoff.status, PlayoffStatus::Pending);
            assert_eq!(playoff.zone, MovementKind::Promotion);
            let linked = matches
                .iter()
                .find(|m| Some(m.match_id) == playoff.match_id)
                .unwrap();
            assert_eq!(linked.status, MatchStatus::Pending);
            assert_eq!(linked.player_a1, playoff.superior_player1);
            assert_eq!(linked.player_b1, playoff.inferior_player1);
        }
    }

    #[tokio::test]
    async fn test_create_playoffs_without_band_fails() {
        let league = seed_league(2, 10).await;

        let error = create_division_playoffs(
            &league.store,
            league.stage_id,
            league.divisions[0].division_id,
            MovementKind::Promotion,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            error,
            LeagueError::NotEnoughPlayoffPlayers { found: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_inferior_win_promotes_inferior_side() {
        let league = seed_league(3, 10).await;
        let playoffs = create_division_playoffs(
            &league.store,
            league.stage_id,
            league.divisions[1].division_id,
            MovementKind::Promotion,
        )
        .await
        .unwrap();
        let playoff = &playoffs[0];

        let recorded = record_playoff_result(&league.store, playoff.playoff_id, &result(Team::B))
            .await
            .unwrap();
        assert_eq!(recorded.status, PlayoffStatus::Played);
        assert_eq!(recorded.winner, Some(Team::B));

        let linked = league
            .store
            .matches()
            .into_iter()
            .find(|m| Some(m.match_id) == playoff.match_id)
            .unwrap();
        assert_eq!(linked.status, MatchStatus::Played);
        assert_eq!(linked.winner, Some(Team::B));

        let movements = apply_playoff_movements(&league.store, playoff.playoff_id)
            .await
            .unwrap();
        assert_eq!(movements.len(), 2);

        let promoted = &movements[0];
        assert_eq!(promoted.kind, MovementKind::Promotion);
        assert_eq!(promoted.player_id, playoff.inferior_player1);
        assert_eq!(
            promoted.destination_division_id,
            league.divisions[0].division_id
        );

        let relegated = &movements[1];
        assert_eq!(relegated.kind, MovementKind::Relegation);
        assert_eq!(relegated.player_id, playoff.superior_player1);
        assert_eq!(
            relegated.destination_division_id,
            league.divisions[2].division_id
        );

        assert!(movements.iter().all(|m| m.trigger == MovementTrigger::Playoff
            && m.is_pending()
            && m.playoff_id == Some(playoff.playoff_id)));

        let again = apply_playoff_movements(&league.store, playoff.playoff_id).await;
        assert!(matches!(again, Err(LeagueError::PlayoffAlreadyApplied(_))));

        let updated = backfill_pending_scores(&league.store, league.stage_id)
            .await
            .unwrap();
        assert_eq!(updated, 2);
        let stored = league.store.list_movements(league.stage_id).await.unwrap();
        assert!(stored.iter().all(|m| !m.is_pending() && m.position.is_some()));
    }

    #[tokio::test]
    async fn test_top_division_winner_has_no_target() {
        let league = seed_league(2, 10).await;
        let playoffs = create_division_playoffs(
            &league.store,
            league.stage_id,
            league.divisions[0].division_id,
            MovementKind::Relegation,
        )
        .await
        .unwrap();
        let playoff = &playoffs[0];

        record_playoff_result(&league.store, playoff.playoff_id, &result(Team::A))
            .await
            .unwrap();
        let movements = apply_playoff_movements(&league.store, playoff.playoff_id)
            .await
            .unwrap();

        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].kind, MovementKind::Relegation);
        assert_eq!(movements[0].player_id, playoff.inferior_player1);
        assert_eq!(
            movements[0].destination_division_id,
            league.divisions[1].division_id
        );
    }

    #[tokio::test]
    async fn test_unplayed_playoff_cannot_be_applied() {
        let league = seed_league(3, 10).await;
        let playoffs = create_division_playoffs(
            &league.store,
            league.stage_id,
            league.divisions[1].division_id,
            MovementKind::Relegation,
        )
        .await
        .unwrap();

        let error = apply_playoff_movements(&league.store, playoffs[0].playoff_id)
            .await
            .unwrap_err();
        assert!(matches!(error, LeagueError::PlayoffNotPlayed(id) if id == playoffs[0].playoff_id));
    }

    #[tokio::test]
    async fn test_inconsistent_result_is_rejected() {
        let league = seed_league(3, 10).await;
        let playoffs = create_division_playoffs(
            &league.store,
            league.stage_id,
            league.divisions[1].division_id,
            MovementKind::Promotion,
        )
        .await
        .unwrap();

        let mut bad = result(Team::A);
        bad.sets_team_a = 0;
        let error = record_playoff_result(&league.store, playoffs[0].playoff_id, &bad)
            .await
            .unwrap_err();
        assert!(matches!(error, LeagueError::InvalidResult(_)));

        let stored = league.store.get_playoff(playoffs[0].playoff_id).await.unwrap();
        assert_eq!(stored.status, PlayoffStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_playoff_is_not_found() {
        let league = seed_league(2, 6).await;
        let error = record_playoff_result(&league.store, Uuid::new_v4(), &result(Team::A))
            .await
            .unwrap_err();
        assert!(matches!(error, LeagueError::Storage(StorageError::NotFound)));
    }
}
