use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Division, LeagueSettingsRow, Registration, Stage};

/// Minutes after which a lease left behind by a crashed pass may be taken over.
const STALE_LEASE_MINUTES: i32 = 15;

/// Stages, their divisions, registrations and tuning rows.
pub struct StageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StageRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, stage_id: Uuid) -> Result<Stage> {
        let stage = sqlx::query_as::<_, Stage>(
            r#"
            SELECT stage_id, name, status, start_date, end_date, created_at
            FROM stages
            WHERE stage_id = $1
            "#,
        )
        .bind(stage_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(stage)
    }

    pub async fn list_divisions(&self, stage_id: Uuid) -> Result<Vec<Division>> {
        let divisions = sqlx::query_as::<_, Division>(
            r#"
            SELECT division_id, stage_id, division_number, name
            FROM divisions
            WHERE stage_id = $1
            ORDER BY division_number ASC
            "#,
        )
        .bind(stage_id)
        .fetch_all(self.pool)
        .await?;

        Ok(divisions)
    }

    pub async fn find_division(&self, division_id: Uuid) -> Result<Division> {
        let division = sqlx::query_as::<_, Division>(
            r#"
            SELECT division_id, stage_id, division_number, name
            FROM divisions
            WHERE division_id = $1
            "#,
        )
        .bind(division_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(division)
    }

    pub async fn count_active_registrations(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM registrations
            WHERE stage_id = $1 AND division_id = $2 AND status = 'activa'
            "#,
        )
        .bind(stage_id)
        .bind(division_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn list_active_registrations(
        &self,
        stage_id: Uuid,
        division_id: Uuid,
    ) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, stage_id, division_id, player_id, status, created_at
            FROM registrations
            WHERE stage_id = $1 AND division_id = $2 AND status = 'activa'
            ORDER BY created_at ASC
            "#,
        )
        .bind(stage_id)
        .bind(division_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn list_settings(&self, stage_id: Uuid) -> Result<Vec<LeagueSettingsRow>> {
        let rows = sqlx::query_as::<_, LeagueSettingsRow>(
            r#"
            SELECT settings_id, stage_id, division_id, promotion_percentage,
                   minimum_quota, maximum_quota, playoff_players
            FROM league_settings
            WHERE stage_id = $1
            "#,
        )
        .bind(stage_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn acquire_lease(&self, stage_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO stage_leases (stage_id, acquired_at)
            VALUES ($1, CURRENT_TIMESTAMP)
            ON CONFLICT (stage_id)
            DO UPDATE SET acquired_at = EXCLUDED.acquired_at
            WHERE stage_leases.acquired_at < CURRENT_TIMESTAMP - make_interval(mins => $2)
            "#,
        )
        .bind(stage_id)
        .bind(STALE_LEASE_MINUTES)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn release_lease(&self, stage_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM stage_leases
            WHERE stage_id = $1
            "#,
        )
        .bind(stage_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
