use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{MovementKind, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "playoff_status")]
pub enum PlayoffStatus {
    #[sqlx(rename = "pendiente")]
    #[serde(rename = "pendiente")]
    Pending,
    #[sqlx(rename = "jugado")]
    #[serde(rename = "jugado")]
    Played,
}

/// Tie-break between a superior pair (side `A`) and an inferior pair
/// (side `B`) of the same division.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Playoff {
    pub playoff_id: Uuid,
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub zone: MovementKind,
    pub superior_player1: Uuid,
    pub superior_player2: Uuid,
    pub inferior_player1: Uuid,
    pub inferior_player2: Uuid,
    pub match_id: Option<Uuid>,
    pub status: PlayoffStatus,
    pub winner: Option<Team>,
    pub sets_team_a: Option<i32>,
    pub sets_team_b: Option<i32>,
    pub games_team_a: Option<i32>,
    pub games_team_b: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl Playoff {
    pub fn side(&self, team: Team) -> [Uuid; 2] {
        match team {
            Team::A => [self.superior_player1, self.superior_player2],
            Team::B => [self.inferior_player1, self.inferior_player2],
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPlayoff {
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub zone: MovementKind,
    pub superior_player1: Uuid,
    pub superior_player2: Uuid,
    pub inferior_player1: Uuid,
    pub inferior_player2: Uuid,
    pub match_id: Option<Uuid>,
}
