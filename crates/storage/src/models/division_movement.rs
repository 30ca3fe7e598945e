use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind")]
pub enum MovementKind {
    #[sqlx(rename = "ascenso")]
    #[serde(rename = "ascenso")]
    Promotion,
    #[sqlx(rename = "descenso")]
    #[serde(rename = "descenso")]
    Relegation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_trigger")]
pub enum MovementTrigger {
    #[sqlx(rename = "automatico")]
    #[serde(rename = "automatico")]
    Automatic,
    #[sqlx(rename = "playoff")]
    #[serde(rename = "playoff")]
    Playoff,
}

/// Audit entry for a player moving between two divisions of a stage.
///
/// `final_average` is `None` while the score that justifies the move is still
/// pending (playoff movements are written before the new rankings exist).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DivisionMovement {
    pub movement_id: Uuid,
    pub stage_id: Uuid,
    pub player_id: Uuid,
    pub origin_division_id: Uuid,
    pub destination_division_id: Uuid,
    pub kind: MovementKind,
    pub trigger: MovementTrigger,
    pub final_average: Option<Decimal>,
    pub position: Option<i32>,
    pub playoff_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl DivisionMovement {
    pub fn is_pending(&self) -> bool {
        self.final_average.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewDivisionMovement {
    pub stage_id: Uuid,
    pub player_id: Uuid,
    pub origin_division_id: Uuid,
    pub destination_division_id: Uuid,
    pub kind: MovementKind,
    pub trigger: MovementTrigger,
    pub final_average: Option<Decimal>,
    pub position: Option<i32>,
    pub playoff_id: Option<Uuid>,
}
