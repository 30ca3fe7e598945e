use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::error::LeagueResult;
use crate::models::{Match, MatchStatus, NewPlayerRanking, PlayerRanking};
use crate::repository::LeagueStore;

/// Counts feeding the score formulas for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreInputs {
    pub matches_won: u32,
    pub matches_played: u32,
    /// Played matches in the whole division for the stage.
    pub division_matches: u32,
    /// Active registrations in the division.
    pub registered_players: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerScores {
    pub individual_average: Decimal,
    pub general_average: Decimal,
    pub play_bonus: Decimal,
    pub final_average: Decimal,
    pub required_minimum: u32,
    pub meets_minimum: bool,
}

/// Raw match record of a player inside a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchTally {
    pub played: u32,
    pub won: u32,
    pub sets_for: i32,
    pub sets_against: i32,
    pub games_for: i32,
    pub games_against: i32,
    pub quality_wins: u32,
}

impl MatchTally {
    pub fn set_difference(&self) -> i32 {
        self.sets_for - self.sets_against
    }

    pub fn game_difference(&self) -> i32 {
        self.games_for - self.games_against
    }
}

/// Rounds half-up to two decimals.
pub fn round_score(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn individual_average(won: u32, played: u32) -> Decimal {
    if played == 0 {
        return Decimal::ZERO;
    }
    round_score(Decimal::from(won) / Decimal::from(played))
}

pub fn general_average(won: u32, division_matches: u32) -> Decimal {
    if division_matches == 0 {
        return Decimal::ZERO;
    }
    round_score(Decimal::from(won) / Decimal::from(division_matches))
}

/// `ceil(division_matches / (registered / 2))`, evaluated in integers.
pub fn required_minimum(division_matches: u32, registered: u32) -> u32 {
    if registered == 0 {
        return 0;
    }
    let minimum = (2 * u64::from(division_matches)).div_ceil(u64::from(registered));
    u32::try_from(minimum).unwrap_or(u32::MAX)
}

/// 0.1 for players who reached the required minimum. A player without
/// matches never earns it, even when the minimum is zero.
pub fn play_bonus(played: u32, minimum: u32) -> Decimal {
    if played > 0 && played >= minimum {
        Decimal::new(1, 1)
    } else {
        Decimal::ZERO
    }
}

pub fn final_average(individual: Decimal, general: Decimal, bonus: Decimal) -> Decimal {
    let weighted = individual * Decimal::new(7, 1) + general * Decimal::new(2, 1) + bonus;
    round_score(weighted).min(Decimal::ONE)
}

pub fn compute_scores(inputs: &ScoreInputs) -> PlayerScores {
    let individual = individual_average(inputs.matches_won, inputs.matches_played);
    let general = general_average(inputs.matches_won, inputs.division_matches);
    let minimum = required_minimum(inputs.division_matches, inputs.registered_players);
    let bonus = play_bonus(inputs.matches_played, minimum);

    PlayerScores {
        individual_average: individual,
        general_average: general,
        play_bonus: bonus,
        final_average: final_average(individual, general, bonus),
        required_minimum: minimum,
        meets_minimum: inputs.matches_played >= minimum,
    }
}

/// Played, won, sets and games of `player_id` over the played matches.
/// Quality wins are left at zero; they need the whole division.
pub fn tally_player(matches: &[Match], player_id: Uuid) -> MatchTally {
    let mut tally = MatchTally::default();

    for game in matches.iter().filter(|m| m.status == MatchStatus::Played) {
        let Some(team) = game.team_of(player_id) else {
            continue;
        };

        tally.played += 1;
        if game.winning_team() == Some(team) {
            tally.won += 1;
        }
        tally.sets_for += game.sets_for(team);
        tally.sets_against += game.sets_for(team.opponent());
        tally.games_for += game.games_for(team);
        tally.games_against += game.games_for(team.opponent());
    }

    tally
}

/// Wins of `player_id` against pairs whose mean individual average is
/// higher than the player's own.
pub fn quality_wins(
    matches: &[Match],
    player_id: Uuid,
    individual_by_player: &HashMap<Uuid, Decimal>,
) -> u32 {
    let own = individual_by_player
        .get(&player_id)
        .copied()
        .unwrap_or(Decimal::ZERO);

    let mut wins = 0;
    for game in matches.iter().filter(|m| m.status == MatchStatus::Played) {
        let Some(team) = game.team_of(player_id) else {
            continue;
        };
        if game.winning_team() != Some(team) {
            continue;
        }

        let opponents = game.players(team.opponent());
        let total: Decimal = opponents
            .iter()
            .map(|id| individual_by_player.get(id).copied().unwrap_or(Decimal::ZERO))
            .sum();
        if total / Decimal::from(opponents.len()) > own {
            wins += 1;
        }
    }

    wins
}

/// Scores of a single player, read through the store.
pub async fn compute_player_scores(
    store: &dyn LeagueStore,
    stage_id: Uuid,
    division_id: Uuid,
    player_id: Uuid,
) -> LeagueResult<PlayerScores> {
    let registered = store
        .count_active_registrations(stage_id, division_id)
        .await?;
    let division_matches = store.count_played_matches(stage_id, division_id).await?;
    let matches = store.list_played_matches(stage_id, division_id).await?;

    let tally = tally_player(&matches, player_id);

    Ok(compute_scores(&ScoreInputs {
        matches_won: tally.won,
        matches_played: tally.played,
        division_matches: count_to_u32(division_matches),
        registered_players: count_to_u32(registered),
    }))
}

/// Recomputes and stores the ranking row of every active registration of the
/// division. Rows come back in canonical order.
pub async fn recompute_division_rankings(
    store: &dyn LeagueStore,
    stage_id: Uuid,
    division_id: Uuid,
) -> LeagueResult<Vec<PlayerRanking>> {
    let registrations = store
        .list_active_registrations(stage_id, division_id)
        .await?;
    let matches = store.list_played_matches(stage_id, division_id).await?;

    let registered = registrations.len() as u32;
    let division_matches = matches.len() as u32;

    let tallies: Vec<(Uuid, MatchTally)> = registrations
        .iter()
        .map(|r| (r.player_id, tally_player(&matches, r.player_id)))
        .collect();

    let individual_by_player: HashMap<Uuid, Decimal> = tallies
        .iter()
        .map(|(player_id, tally)| (*player_id, individual_average(tally.won, tally.played)))
        .collect();

    let mut rankings = Vec::with_capacity(tallies.len());
    for (player_id, mut tally) in tallies {
        tally.quality_wins = quality_wins(&matches, player_id, &individual_by_player);

        let scores = compute_scores(&ScoreInputs {
            matches_won: tally.won,
            matches_played: tally.played,
            division_matches,
            registered_players: registered,
        });

        let row = store
            .upsert_ranking(&new_ranking(stage_id, division_id, player_id, &tally, &scores))
            .await?;
        rankings.push(row);
    }

    rankings.sort_by(PlayerRanking::canonical_cmp);

    tracing::info!(
        %stage_id,
        %division_id,
        players = rankings.len(),
        matches = division_matches,
        "Recomputed division ranking"
    );

    Ok(rankings)
}

fn new_ranking(
    stage_id: Uuid,
    division_id: Uuid,
    player_id: Uuid,
    tally: &MatchTally,
    scores: &PlayerScores,
) -> NewPlayerRanking {
    NewPlayerRanking {
        stage_id,
        division_id,
        player_id,
        matches_played: tally.played as i32,
        matches_won: tally.won as i32,
        individual_average: scores.individual_average,
        general_average: scores.general_average,
        play_bonus: scores.play_bonus,
        final_average: scores.final_average,
        required_minimum: scores.required_minimum as i32,
        meets_minimum: scores.meets_minimum,
        set_difference: tally.set_difference(),
        game_difference: tally.game_difference(),
        quality_wins: tally.quality_wins as i32,
    }
}

pub(crate) fn count_to_u32(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchResult, RegistrationStatus, Team};
    use crate::repository::MemoryStore;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_no_matches_played() {
        let scores = compute_scores(&ScoreInputs {
            matches_won: 0,
            matches_played: 0,
            division_matches: 40,
            registered_players: 20,
        });
        assert_eq!(scores.individual_average, Decimal::ZERO);
        assert_eq!(scores.play_bonus, Decimal::ZERO);
        assert!(!scores.meets_minimum);
    }

    #[test]
    fn test_empty_division() {
        let scores = compute_scores(&ScoreInputs {
            matches_won: 0,
            matches_played: 0,
            division_matches: 0,
            registered_players: 12,
        });
        assert_eq!(scores.general_average, Decimal::ZERO);
        assert_eq!(scores.required_minimum, 0);
        assert!(scores.meets_minimum);
        assert_eq!(scores.play_bonus, Decimal::ZERO);
        assert_eq!(scores.final_average, Decimal::ZERO);
    }

    #[test]
    fn test_no_registrations_means_no_minimum() {
        assert_eq!(required_minimum(40, 0), 0);
        assert_eq!(required_minimum(40, 20), 4);
        assert_eq!(required_minimum(41, 20), 5);
        // 40 / 2.5 = 16
        assert_eq!(required_minimum(40, 5), 16);
    }

    #[test]
    fn test_reference_player() {
        let scores = compute_scores(&ScoreInputs {
            matches_won: 3,
            matches_played: 5,
            division_matches: 40,
            registered_players: 20,
        });
        assert_eq!(scores.required_minimum, 4);
        assert!(scores.meets_minimum);
        assert_eq!(scores.individual_average, dec("0.60"));
        // 3 / 40 = 0.075 rounds half-up
        assert_eq!(scores.general_average, dec("0.08"));
        assert_eq!(scores.play_bonus, dec("0.1"));
        // 0.42 + 0.016 + 0.1 = 0.536
        assert_eq!(scores.final_average, dec("0.54"));
    }

    #[test]
    fn test_final_average_is_capped() {
        let capped = final_average(Decimal::ONE, Decimal::ONE, dec("0.1"));
        assert_eq!(capped, Decimal::ONE);

        for won in 0..=6 {
            for played in won..=6 {
                let scores = compute_scores(&ScoreInputs {
                    matches_won: won,
                    matches_played: played,
                    division_matches: 6,
                    registered_players: 4,
                });
                assert!(scores.final_average >= Decimal::ZERO);
                assert!(scores.final_average <= Decimal::ONE);
                assert_eq!(scores.meets_minimum, played >= scores.required_minimum);
            }
        }
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(round_score(dec("0.125")), dec("0.13"));
        assert_eq!(round_score(dec("0.135")), dec("0.14"));
        assert_eq!(individual_average(1, 3), dec("0.33"));
        assert_eq!(individual_average(2, 3), dec("0.67"));
    }

    fn played(
        team_a: [Uuid; 2],
        team_b: [Uuid; 2],
        winner: Team,
        sets: (i32, i32),
        games: (i32, i32),
    ) -> Match {
        Match {
            match_id: Uuid::new_v4(),
            stage_id: Uuid::nil(),
            division_id: Uuid::nil(),
            player_a1: team_a[0],
            player_a2: team_a[1],
            player_b1: team_b[0],
            player_b2: team_b[1],
            status: MatchStatus::Played,
            winner: Some(winner),
            sets_team_a: Some(sets.0),
            sets_team_b: Some(sets.1),
            games_team_a: Some(games.0),
            games_team_b: Some(games.1),
            played_at: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_tally_counts_sets_and_games_from_both_sides() {
        let p: Vec<Uuid> = (1..=4).map(Uuid::from_u128).collect();
        let matches = vec![
            played([p[0], p[1]], [p[2], p[3]], Team::A, (2, 0), (12, 5)),
            played([p[2], p[0]], [p[1], p[3]], Team::B, (1, 2), (14, 16)),
        ];

        let tally = tally_player(&matches, p[0]);
        assert_eq!(tally.played, 2);
        assert_eq!(tally.won, 1);
        assert_eq!(tally.set_difference(), 2 + (1 - 2));
        assert_eq!(tally.game_difference(), 7 + (14 - 16));

        let absent = tally_player(&matches, Uuid::from_u128(99));
        assert_eq!(absent, MatchTally::default());
    }

    #[test]
    fn test_quality_wins_only_count_stronger_opponents() {
        let p: Vec<Uuid> = (1..=4).map(Uuid::from_u128).collect();
        let matches = vec![played([p[0], p[1]], [p[2], p[3]], Team::A, (2, 1), (13, 11))];

        let averages: HashMap<Uuid, Decimal> = [
            (p[0], dec("0.40")),
            (p[1], dec("0.40")),
            (p[2], dec("0.80")),
            (p[3], dec("0.20")),
        ]
        .into_iter()
        .collect();

        // opponents average 0.50 > 0.40
        assert_eq!(quality_wins(&matches, p[0], &averages), 1);
        // losers never collect quality wins
        assert_eq!(quality_wins(&matches, p[2], &averages), 0);
    }

    #[tokio::test]
    async fn test_recompute_division_rankings() {
        let store = MemoryStore::new();
        let stage = store.add_stage("Apertura");
        let division = store.add_division(stage.stage_id, 1);
        let players: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        for player in &players {
            store.add_registration(&division, *player, RegistrationStatus::Active);
        }
        let dropped = Uuid::new_v4();
        store.add_registration(&division, dropped, RegistrationStatus::Withdrawn);

        let result = MatchResult {
            winner: Team::A,
            sets_team_a: 2,
            sets_team_b: 0,
            games_team_a: 12,
            games_team_b: 4,
        };
        store.add_played_match(
            &division,
            [players[0], players[1]],
            [players[2], players[3]],
            result,
        );
        store.add_played_match(
            &division,
            [players[0], players[2]],
            [players[1], players[3]],
            result,
        );

        let rankings = recompute_division_rankings(&store, stage.stage_id, division.division_id)
            .await
            .unwrap();

        assert_eq!(rankings.len(), 4);
        assert_eq!(rankings[0].player_id, players[0]);
        assert_eq!(rankings[0].matches_won, 2);
        assert_eq!(rankings[0].individual_average, Decimal::ONE);
        assert_eq!(rankings[0].required_minimum, 1);
        assert!(rankings.iter().all(|r| r.player_id != dropped));
        assert_eq!(rankings[3].player_id, players[3]);
        assert_eq!(rankings[3].matches_won, 0);

        let single = compute_player_scores(&store, stage.stage_id, division.division_id, players[0])
            .await
            .unwrap();
        assert_eq!(single.final_average, rankings[0].final_average);

        let again = recompute_division_rankings(&store, stage.stage_id, division.division_id)
            .await
            .unwrap();
        assert_eq!(again[0].ranking_id, rankings[0].ranking_id);
    }
}
