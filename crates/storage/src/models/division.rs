use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Competitive tier within a stage. `division_number` 1 is the top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Division {
    pub division_id: Uuid,
    pub stage_id: Uuid,
    pub division_number: i32,
    pub name: String,
}
