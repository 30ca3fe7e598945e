use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stage_status")]
pub enum StageStatus {
    #[sqlx(rename = "abierta")]
    #[serde(rename = "abierta")]
    Open,
    #[sqlx(rename = "activa")]
    #[serde(rename = "activa")]
    Active,
    #[sqlx(rename = "cerrada")]
    #[serde(rename = "cerrada")]
    Closed,
}

/// A time-boxed competition cycle. Every ranking and movement is scoped to one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Stage {
    pub stage_id: Uuid,
    pub name: String,
    pub status: StageStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}
