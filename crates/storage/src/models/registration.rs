use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "registration_status")]
pub enum RegistrationStatus {
    #[sqlx(rename = "activa")]
    #[serde(rename = "activa")]
    Active,
    #[sqlx(rename = "inactiva")]
    #[serde(rename = "inactiva")]
    Inactive,
    #[sqlx(rename = "baja")]
    #[serde(rename = "baja")]
    Withdrawn,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub registration_id: Uuid,
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub player_id: Uuid,
    pub status: RegistrationStatus,
    pub created_at: chrono::NaiveDateTime,
}

impl Registration {
    /// Only active registrations count toward a division's population.
    pub fn is_active(&self) -> bool {
        self.status == RegistrationStatus::Active
    }
}
