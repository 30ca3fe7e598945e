use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Division, DivisionMovement, LeagueSettingsRow, Match, MatchResult, NewDivisionMovement,
    NewMatch, NewPlayerRanking, NewPlayoff, PlayerRanking, Playoff, Registration, Stage,
};

pub mod league;
pub mod memory;
pub mod movement;
pub mod padel_match;
pub mod playoff;
pub mod ranking;
pub mod stage;

pub use league::LeagueRepository;
pub use memory::MemoryStore;

/// Filter for the ordered ranking select of one division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingQuery {
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub only_eligible: bool,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl RankingQuery {
    pub fn division(stage_id: Uuid, division_id: Uuid) -> Self {
        Self {
            stage_id,
            division_id,
            only_eligible: false,
            offset: None,
            limit: None,
        }
    }

    pub fn eligible_only(mut self) -> Self {
        self.only_eligible = true;
        self
    }

    pub fn range(mut self, offset: i64, limit: i64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }
}

/// Data-store seam used by the ranking, movement and playoff services.
///
/// Every method is a single round trip. Rankings come back in canonical
/// order (see [`PlayerRanking::canonical_cmp`]).
#[async_trait]
pub trait LeagueStore: Send + Sync {
    async fn get_stage(&self, stage_id: Uuid) -> Result<Stage>;

    /// Divisions of a stage ordered by `division_number`, top tier first.
    async fn list_divisions(&self, stage_id: Uuid) -> Result<Vec<Division>>;

    async fn get_division(&self, division_id: Uuid) -> Result<Division>;

    async fn count_active_registrations(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64>;

    async fn list_active_registrations(
        &self,
        stage_id: Uuid,
        division_id: Uuid,
    ) -> Result<Vec<Registration>>;

    async fn count_played_matches(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64>;

    async fn list_played_matches(&self, stage_id: Uuid, division_id: Uuid) -> Result<Vec<Match>>;

    async fn insert_match(&self, new_match: &NewMatch) -> Result<Match>;

    /// Writes the result and marks the match as played.
    async fn update_match_result(&self, match_id: Uuid, result: &MatchResult) -> Result<Match>;

    async fn upsert_ranking(&self, ranking: &NewPlayerRanking) -> Result<PlayerRanking>;

    async fn list_rankings(&self, query: &RankingQuery) -> Result<Vec<PlayerRanking>>;

    /// Number of rows matching `query`, ignoring its range.
    async fn count_rankings(&self, query: &RankingQuery) -> Result<i64>;

    async fn list_settings(&self, stage_id: Uuid) -> Result<Vec<LeagueSettingsRow>>;

    async fn insert_movement(&self, movement: &NewDivisionMovement) -> Result<DivisionMovement>;

    async fn list_movements(&self, stage_id: Uuid) -> Result<Vec<DivisionMovement>>;

    async fn update_movement_score(
        &self,
        movement_id: Uuid,
        final_average: Decimal,
        position: Option<i32>,
    ) -> Result<()>;

    async fn insert_playoff(&self, playoff: &NewPlayoff) -> Result<Playoff>;

    async fn get_playoff(&self, playoff_id: Uuid) -> Result<Playoff>;

    async fn list_playoffs(&self, stage_id: Uuid) -> Result<Vec<Playoff>>;

    /// Writes the result and marks the playoff as played.
    async fn update_playoff_result(&self, playoff_id: Uuid, result: &MatchResult)
    -> Result<Playoff>;

    /// Returns `false` when another pass already holds the stage.
    async fn acquire_stage_lease(&self, stage_id: Uuid) -> Result<bool>;

    async fn release_stage_lease(&self, stage_id: Uuid) -> Result<()>;
}
