use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{MatchResult, MovementKind, Team};

/// Request payload for pairing a division's playoff band.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePlayoffsRequest {
    /// `ascenso` pairs the band below the promotion cut, `descenso` the band
    /// above the relegation cut.
    pub zone: MovementKind,
}

/// Request payload for recording the result of a playoff tie.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordPlayoffResultRequest {
    /// `A` is the superior pair, `B` the inferior pair.
    pub winner: Team,

    #[validate(range(min = 0, max = 5, message = "Sets must be between 0 and 5"))]
    pub sets_team_a: i32,

    #[validate(range(min = 0, max = 5, message = "Sets must be between 0 and 5"))]
    pub sets_team_b: i32,

    #[validate(range(min = 0, max = 99, message = "Games must be between 0 and 99"))]
    pub games_team_a: i32,

    #[validate(range(min = 0, max = 99, message = "Games must be between 0 and 99"))]
    pub games_team_b: i32,
}

impl From<&RecordPlayoffResultRequest> for MatchResult {
    fn from(request: &RecordPlayoffResultRequest) -> Self {
        Self {
            winner: request.winner,
            sets_team_a: request.sets_team_a,
            sets_team_b: request.sets_team_b,
            games_team_a: request.games_team_a,
            games_team_b: request.games_team_b,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppliedMovementsResponse {
    pub playoff_id: Uuid,
    pub movements: Vec<crate::models::DivisionMovement>,
}
