use std::cmp::Ordering;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Computed standing of a player inside one division of a stage.
///
/// Rows are derived from registrations and played matches and are rewritten
/// on every recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerRanking {
    pub ranking_id: Uuid,
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub player_id: Uuid,
    pub matches_played: i32,
    pub matches_won: i32,
    pub individual_average: Decimal,
    pub general_average: Decimal,
    pub play_bonus: Decimal,
    pub final_average: Decimal,
    pub required_minimum: i32,
    pub meets_minimum: bool,
    pub set_difference: i32,
    pub game_difference: i32,
    pub quality_wins: i32,
    pub computed_at: NaiveDateTime,
}

impl PlayerRanking {
    /// Canonical order, best first: final average, set difference, game
    /// difference, then wins over better pairs, all descending. Full ties
    /// fall back to `player_id` ascending.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        other
            .final_average
            .cmp(&self.final_average)
            .then_with(|| other.set_difference.cmp(&self.set_difference))
            .then_with(|| other.game_difference.cmp(&self.game_difference))
            .then_with(|| other.quality_wins.cmp(&self.quality_wins))
            .then_with(|| self.player_id.cmp(&other.player_id))
    }
}

/// Values written by a ranking upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayerRanking {
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub player_id: Uuid,
    pub matches_played: i32,
    pub matches_won: i32,
    pub individual_average: Decimal,
    pub general_average: Decimal,
    pub play_bonus: Decimal,
    pub final_average: Decimal,
    pub required_minimum: i32,
    pub meets_minimum: bool,
    pub set_difference: i32,
    pub game_difference: i32,
    pub quality_wins: i32,
}
