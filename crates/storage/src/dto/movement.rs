use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Division, LeagueSettings, PlayerRanking};

/// The four bands a division's ranking is split into.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct BandPartition {
    pub promotion: Vec<PlayerRanking>,
    pub relegation: Vec<PlayerRanking>,
    pub playoff_promotion: Vec<PlayerRanking>,
    pub playoff_relegation: Vec<PlayerRanking>,
}

/// Band computation of one division, with the inputs that produced it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DivisionBands {
    pub division: Division,
    pub registered_players: u32,
    pub quota: u32,
    pub settings: LeagueSettings,
    pub ranking: Vec<PlayerRanking>,
    pub bands: BandPartition,
}

impl DivisionBands {
    /// 1-based canonical position of a player in the division ranking.
    pub fn position_of(&self, player_id: Uuid) -> Option<i32> {
        self.ranking
            .iter()
            .position(|r| r.player_id == player_id)
            .map(|index| index as i32 + 1)
    }
}

/// Outcome of one superior/inferior division boundary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DivisionTransition {
    pub superior_division_id: Uuid,
    pub inferior_division_id: Uuid,
    pub quota: u32,
    pub promoted: Vec<Uuid>,
    pub relegated: Vec<Uuid>,
    pub playoff_promotion: Vec<Uuid>,
    pub playoff_relegation: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StageProcessingReport {
    pub stage_id: Uuid,
    pub movements_recorded: u32,
    pub transitions: Vec<DivisionTransition>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BackfillResponse {
    pub stage_id: Uuid,
    pub updated: u32,
}
