use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Division, DivisionMovement, LeagueSettingsRow, Match, MatchResult, NewDivisionMovement,
    NewMatch, NewPlayerRanking, NewPlayoff, PlayerRanking, Playoff, Registration, Stage,
};

use super::movement::MovementRepository;
use super::padel_match::MatchRepository;
use super::playoff::PlayoffRepository;
use super::ranking::RankingRepository;
use super::stage::StageRepository;
use super::{LeagueStore, RankingQuery};

/// PostgreSQL-backed [`LeagueStore`].
pub struct LeagueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeagueRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn stages(&self) -> StageRepository<'a> {
        StageRepository::new(self.pool)
    }

    fn matches(&self) -> MatchRepository<'a> {
        MatchRepository::new(self.pool)
    }

    fn rankings(&self) -> RankingRepository<'a> {
        RankingRepository::new(self.pool)
    }

    fn movements(&self) -> MovementRepository<'a> {
        MovementRepository::new(self.pool)
    }

    fn playoffs(&self) -> PlayoffRepository<'a> {
        PlayoffRepository::new(self.pool)
    }
}

#[async_trait]
impl LeagueStore for LeagueRepository<'_> {
    async fn get_stage(&self, stage_id: Uuid) -> Result<Stage> {
        self.stages().find_by_id(stage_id).await
    }

    async fn list_divisions(&self, stage_id: Uuid) -> Result<Vec<Division>> {
        self.stages().list_divisions(stage_id).await
    }

    async fn get_division(&self, division_id: Uuid) -> Result<Division> {
        self.stages().find_division(division_id).await
    }

    async fn count_active_registrations(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64> {
        self.stages()
            .count_active_registrations(stage_id, division_id)
            .await
    }

    async fn list_active_registrations(
        &self,
        stage_id: Uuid,
        division_id: Uuid,
    ) -> Result<Vec<Registration>> {
        self.stages()
            .list_active_registrations(stage_id, division_id)
            .await
    }

    async fn count_played_matches(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64> {
        self.matches().count_played(stage_id, division_id).await
    }

    async fn list_played_matches(&self, stage_id: Uuid, division_id: Uuid) -> Result<Vec<Match>> {
        self.matches().list_played(stage_id, division_id).await
    }

    async fn insert_match(&self, new_match: &NewMatch) -> Result<Match> {
        self.matches().create(new_match).await
    }

    async fn update_match_result(&self, match_id: Uuid, result: &MatchResult) -> Result<Match> {
        self.matches().update_result(match_id, result).await
    }

    async fn upsert_ranking(&self, ranking: &NewPlayerRanking) -> Result<PlayerRanking> {
        self.rankings().upsert(ranking).await
    }

    async fn list_rankings(&self, query: &RankingQuery) -> Result<Vec<PlayerRanking>> {
        self.rankings().list(query).await
    }

    async fn count_rankings(&self, query: &RankingQuery) -> Result<i64> {
        self.rankings().count(query).await
    }

    async fn list_settings(&self, stage_id: Uuid) -> Result<Vec<LeagueSettingsRow>> {
        self.stages().list_settings(stage_id).await
    }

    async fn insert_movement(&self, movement: &NewDivisionMovement) -> Result<DivisionMovement> {
        self.movements().create(movement).await
    }

    async fn list_movements(&self, stage_id: Uuid) -> Result<Vec<DivisionMovement>> {
        self.movements().list_by_stage(stage_id).await
    }

    async fn update_movement_score(
        &self,
        movement_id: Uuid,
        final_average: Decimal,
        position: Option<i32>,
    ) -> Result<()> {
        self.movements()
            .update_score(movement_id, final_average, position)
            .await
    }

    async fn insert_playoff(&self, playoff: &NewPlayoff) -> Result<Playoff> {
        self.playoffs().create(playoff).await
    }

    async fn get_playoff(&self, playoff_id: Uuid) -> Result<Playoff> {
        self.playoffs().find_by_id(playoff_id).await
    }

    async fn list_playoffs(&self, stage_id: Uuid) -> Result<Vec<Playoff>> {
        self.playoffs().list_by_stage(stage_id).await
    }

    async fn update_playoff_result(
        &self,
        playoff_id: Uuid,
        result: &MatchResult,
    ) -> Result<Playoff> {
        self.playoffs().update_result(playoff_id, result).await
    }

    async fn acquire_stage_lease(&self, stage_id: Uuid) -> Result<bool> {
        self.stages().acquire_lease(stage_id).await
    }

    async fn release_stage_lease(&self, stage_id: Uuid) -> Result<()> {
        self.stages().release_lease(stage_id).await
    }
}
