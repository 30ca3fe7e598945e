use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    Division, DivisionMovement, LeagueSettingsRow, Match, MatchResult, MatchStatus,
    NewDivisionMovement, NewMatch, NewPlayerRanking, NewPlayoff, PlayerRanking, Playoff,
    PlayoffStatus, Registration, RegistrationStatus, Stage, StageStatus,
};

use super::{LeagueStore, RankingQuery};

#[derive(Default)]
struct MemoryState {
    stages: Vec<Stage>,
    divisions: Vec<Division>,
    registrations: Vec<Registration>,
    matches: Vec<Match>,
    rankings: Vec<PlayerRanking>,
    settings: Vec<LeagueSettingsRow>,
    movements: Vec<DivisionMovement>,
    playoffs: Vec<Playoff>,
    leases: HashSet<Uuid>,
    movement_insert_limit: Option<usize>,
}

/// In-process [`LeagueStore`]. Nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_stage(&self, name: &str) -> Stage {
        let stage = Stage {
            stage_id: Uuid::new_v4(),
            name: name.to_string(),
            status: StageStatus::Active,
            start_date: None,
            end_date: None,
            created_at: now(),
        };
        self.state().stages.push(stage.clone());
        stage
    }

    pub fn add_division(&self, stage_id: Uuid, division_number: i32) -> Division {
        let division = Division {
            division_id: Uuid::new_v4(),
            stage_id,
            division_number,
            name: format!("Division {division_number}"),
        };
        self.state().divisions.push(division.clone());
        division
    }

    pub fn add_registration(
        &self,
        division: &Division,
        player_id: Uuid,
        status: RegistrationStatus,
    ) -> Registration {
        let registration = Registration {
            registration_id: Uuid::new_v4(),
            stage_id: division.stage_id,
            division_id: division.division_id,
            player_id,
            status,
            created_at: now(),
        };
        self.state().registrations.push(registration.clone());
        registration
    }

    /// Adds a played match between `team_a` and `team_b`.
    pub fn add_played_match(
        &self,
        division: &Division,
        team_a: [Uuid; 2],
        team_b: [Uuid; 2],
        result: MatchResult,
    ) -> Match {
        let played = Match {
            match_id: Uuid::new_v4(),
            stage_id: division.stage_id,
            division_id: division.division_id,
            player_a1: team_a[0],
            player_a2: team_a[1],
            player_b1: team_b[0],
            player_b2: team_b[1],
            status: MatchStatus::Played,
            winner: Some(result.winner),
            sets_team_a: Some(result.sets_team_a),
            sets_team_b: Some(result.sets_team_b),
            games_team_a: Some(result.games_team_a),
            games_team_b: Some(result.games_team_b),
            played_at: Some(now()),
            created_at: now(),
        };
        self.state().matches.push(played.clone());
        played
    }

    pub fn add_settings(&self, row: LeagueSettingsRow) {
        self.state().settings.push(row);
    }

    #[cfg(test)]
    /// Makes every movement insert after the first `limit` fail.
    pub fn reject_movements_after(&self, limit: usize) {
        self.state().movement_insert_limit = Some(limit);
    }

    #[cfg(test)]
    pub fn is_stage_leased(&self, stage_id: Uuid) -> bool {
        self.state().leases.contains(&stage_id)
    }

    #[cfg(test)]
    pub fn matches(&self) -> Vec<Match> {
        self.state().matches.clone()
    }
}

#[async_trait]
impl LeagueStore for MemoryStore {
    async fn get_stage(&self, stage_id: Uuid) -> Result<Stage> {
        self.state()
            .stages
            .iter()
            .find(|s| s.stage_id == stage_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_divisions(&self, stage_id: Uuid) -> Result<Vec<Division>> {
        let mut divisions: Vec<Division> = self
            .state()
            .divisions
            .iter()
            .filter(|d| d.stage_id == stage_id)
            .cloned()
            .collect();
        divisions.sort_by_key(|d| d.division_number);
        Ok(divisions)
    }

    async fn get_division(&self, division_id: Uuid) -> Result<Division> {
        self.state()
            .divisions
            .iter()
            .find(|d| d.division_id == division_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn count_active_registrations(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64> {
        let registrations = self.list_active_registrations(stage_id, division_id).await?;
        Ok(registrations.len() as i64)
    }

    async fn list_active_registrations(
        &self,
        stage_id: Uuid,
        division_id: Uuid,
    ) -> Result<Vec<Registration>> {
        Ok(self
            .state()
            .registrations
            .iter()
            .filter(|r| r.stage_id == stage_id && r.division_id == division_id && r.is_active())
            .cloned()
            .collect())
    }

    async fn count_played_matches(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64> {
        let matches = self.list_played_matches(stage_id, division_id).await?;
        Ok(matches.len() as i64)
    }

    async fn list_played_matches(&self, stage_id: Uuid, division_id: Uuid) -> Result<Vec<Match>> {
        Ok(self
            .state()
            .matches
            .iter()
            .filter(|m| {
                m.stage_id == stage_id
                    && m.division_id == division_id
                    && m.status == MatchStatus::Played
            })
            .cloned()
            .collect())
    }

    async fn insert_match(&self, new_match: &NewMatch) -> Result<Match> {
        let created = Match {
            match_id: Uuid::new_v4(),
            stage_id: new_match.stage_id,
            division_id: new_match.division_id,
            player_a1: new_match.player_a1,
            player_a2: new_match.player_a2,
            player_b1: new_match.player_b1,
            player_b2: new_match.player_b2,
            status: new_match.status,
            winner: None,
            sets_team_a: None,
            sets_team_b: None,
            games_team_a: None,
            games_team_b: None,
            played_at: None,
            created_at: now(),
        };
        self.state().matches.push(created.clone());
        Ok(created)
    }

    async fn update_match_result(&self, match_id: Uuid, result: &MatchResult) -> Result<Match> {
        let mut state = self.state();
        let existing = state
            .matches
            .iter_mut()
            .find(|m| m.match_id == match_id)
            .ok_or(StorageError::NotFound)?;

        existing.status = MatchStatus::Played;
        existing.winner = Some(result.winner);
        existing.sets_team_a = Some(result.sets_team_a);
        existing.sets_team_b = Some(result.sets_team_b);
        existing.games_team_a = Some(result.games_team_a);
        existing.games_team_b = Some(result.games_team_b);
        if existing.played_at.is_none() {
            existing.played_at = Some(now());
        }

        Ok(existing.clone())
    }

    async fn upsert_ranking(&self, ranking: &NewPlayerRanking) -> Result<PlayerRanking> {
        let mut state = self.state();
        let position = state.rankings.iter().position(|r| {
            r.stage_id == ranking.stage_id
                && r.division_id == ranking.division_id
                && r.player_id == ranking.player_id
        });

        let ranking_id = position
            .map(|index| state.rankings[index].ranking_id)
            .unwrap_or_else(Uuid::new_v4);

        let row = PlayerRanking {
            ranking_id,
            stage_id: ranking.stage_id,
            division_id: ranking.division_id,
            player_id: ranking.player_id,
            matches_played: ranking.matches_played,
            matches_won: ranking.matches_won,
            individual_average: ranking.individual_average,
            general_average: ranking.general_average,
            play_bonus: ranking.play_bonus,
            final_average: ranking.final_average,
            required_minimum: ranking.required_minimum,
            meets_minimum: ranking.meets_minimum,
            set_difference: ranking.set_difference,
            game_difference: ranking.game_difference,
            quality_wins: ranking.quality_wins,
            computed_at: now(),
        };

        match position {
            Some(index) => state.rankings[index] = row.clone(),
            None => state.rankings.push(row.clone()),
        }

        Ok(row)
    }

    async fn list_rankings(&self, query: &RankingQuery) -> Result<Vec<PlayerRanking>> {
        let mut rows: Vec<PlayerRanking> = self
            .state()
            .rankings
            .iter()
            .filter(|r| {
                r.stage_id == query.stage_id
                    && r.division_id == query.division_id
                    && (!query.only_eligible || r.meets_minimum)
            })
            .cloned()
            .collect();
        rows.sort_by(PlayerRanking::canonical_cmp);

        let offset = query.offset.unwrap_or(0).max(0) as usize;
        let limit = query.limit.map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_rankings(&self, query: &RankingQuery) -> Result<i64> {
        let unbounded = RankingQuery {
            offset: None,
            limit: None,
            ..*query
        };
        let rows = self.list_rankings(&unbounded).await?;
        Ok(rows.len() as i64)
    }

    async fn list_settings(&self, stage_id: Uuid) -> Result<Vec<LeagueSettingsRow>> {
        Ok(self
            .state()
            .settings
            .iter()
            .filter(|s| s.stage_id == stage_id)
            .cloned()
            .collect())
    }

    async fn insert_movement(&self, movement: &NewDivisionMovement) -> Result<DivisionMovement> {
        let mut state = self.state();

        if let Some(limit) = state.movement_insert_limit {
            if state.movements.len() >= limit {
                return Err(StorageError::ConstraintViolation(
                    "movement insert rejected".to_string(),
                ));
            }
        }

        let created = DivisionMovement {
            movement_id: Uuid::new_v4(),
            stage_id: movement.stage_id,
            player_id: movement.player_id,
            origin_division_id: movement.origin_division_id,
            destination_division_id: movement.destination_division_id,
            kind: movement.kind,
            trigger: movement.trigger,
            final_average: movement.final_average,
            position: movement.position,
            playoff_id: movement.playoff_id,
            created_at: now(),
        };
        state.movements.push(created.clone());
        Ok(created)
    }

    async fn list_movements(&self, stage_id: Uuid) -> Result<Vec<DivisionMovement>> {
        Ok(self
            .state()
            .movements
            .iter()
            .filter(|m| m.stage_id == stage_id)
            .cloned()
            .collect())
    }

    async fn update_movement_score(
        &self,
        movement_id: Uuid,
        final_average: Decimal,
        position: Option<i32>,
    ) -> Result<()> {
        let mut state = self.state();
        let movement = state
            .movements
            .iter_mut()
            .find(|m| m.movement_id == movement_id)
            .ok_or(StorageError::NotFound)?;

        movement.final_average = Some(final_average);
        movement.position = position;
        Ok(())
    }

    async fn insert_playoff(&self, playoff: &NewPlayoff) -> Result<Playoff> {
        let created = Playoff {
            playoff_id: Uuid::new_v4(),
            stage_id: playoff.stage_id,
            division_id: playoff.division_id,
            zone: playoff.zone,
            superior_player1: playoff.superior_player1,
            superior_player2: playoff.superior_player2,
            inferior_player1: playoff.inferior_player1,
            inferior_player2: playoff.inferior_player2,
            match_id: playoff.match_id,
            status: PlayoffStatus::Pending,
            winner: None,
            sets_team_a: None,
            sets_team_b: None,
            games_team_a: None,
            games_team_b: None,
            created_at: now(),
        };
        self.state().playoffs.push(created.clone());
        Ok(created)
    }

    async fn get_playoff(&self, playoff_id: Uuid) -> Result<Playoff> {
        self.state()
            .playoffs
            .iter()
            .find(|p| p.playoff_id == playoff_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_playoffs(&self, stage_id: Uuid) -> Result<Vec<Playoff>> {
        Ok(self
            .state()
            .playoffs
            .iter()
            .filter(|p| p.stage_id == stage_id)
            .cloned()
            .collect())
    }

    async fn update_playoff_result(
        &self,
        playoff_id: Uuid,
        result: &MatchResult,
    ) -> Result<Playoff> {
        let mut state = self.state();
        let playoff = state
            .playoffs
            .iter_mut()
            .find(|p| p.playoff_id == playoff_id)
            .ok_or(StorageError::NotFound)?;

        playoff.status = PlayoffStatus::Played;
        playoff.winner = Some(result.winner);
        playoff.sets_team_a = Some(result.sets_team_a);
        playoff.sets_team_b = Some(result.sets_team_b);
        playoff.games_team_a = Some(result.games_team_a);
        playoff.games_team_b = Some(result.games_team_b);

        Ok(playoff.clone())
    }

    async fn acquire_stage_lease(&self, stage_id: Uuid) -> Result<bool> {
        Ok(self.state().leases.insert(stage_id))
    }

    async fn release_stage_lease(&self, stage_id: Uuid) -> Result<()> {
        self.state().leases.remove(&stage_id);
        Ok(())
    }
}
