use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{DivisionMovement, NewDivisionMovement};

/// Append-only audit trail of promotions and relegations.
pub struct MovementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MovementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, movement: &NewDivisionMovement) -> Result<DivisionMovement> {
        let created = sqlx::query_as::<_, DivisionMovement>(
            r#"
            INSERT INTO division_movements (
                stage_id, player_id, origin_division_id, destination_division_id,
                kind, trigger, final_average, position, playoff_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING movement_id, stage_id, player_id, origin_division_id,
                      destination_division_id, kind, trigger, final_average, position,
                      playoff_id, created_at
            "#,
        )
        .bind(movement.stage_id)
        .bind(movement.player_id)
        .bind(movement.origin_division_id)
        .bind(movement.destination_division_id)
        .bind(movement.kind)
        .bind(movement.trigger)
        .bind(movement.final_average)
        .bind(movement.position)
        .bind(movement.playoff_id)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                return StorageError::ConstraintViolation(
                    "Movement references an unknown stage, division or player".to_string(),
                );
            }
            e
        })?;

        Ok(created)
    }

    pub async fn list_by_stage(&self, stage_id: Uuid) -> Result<Vec<DivisionMovement>> {
        let movements = sqlx::query_as::<_, DivisionMovement>(
            r#"
            SELECT movement_id, stage_id, player_id, origin_division_id,
                   destination_division_id, kind, trigger, final_average, position,
                   playoff_id, created_at
            FROM division_movements
            WHERE stage_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(stage_id)
        .fetch_all(self.pool)
        .await?;

        Ok(movements)
    }

    pub async fn update_score(
        &self,
        movement_id: Uuid,
        final_average: Decimal,
        position: Option<i32>,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE division_movements
            SET final_average = $2, position = $3
            WHERE movement_id = $1
            "#,
        )
        .bind(movement_id)
        .bind(final_average)
        .bind(position)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
