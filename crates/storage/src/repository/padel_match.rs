use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Match, MatchResult, NewMatch};

pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_played(&self, stage_id: Uuid, division_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM matches
            WHERE stage_id = $1 AND division_id = $2 AND status = 'jugado'
            "#,
        )
        .bind(stage_id)
        .bind(division_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn list_played(&self, stage_id: Uuid, division_id: Uuid) -> Result<Vec<Match>> {
        let matches = sqlx::query_as::<_, Match>(
            r#"
            SELECT match_id, stage_id, division_id,
                   player_a1, player_a2, player_b1, player_b2,
                   status, winner, sets_team_a, sets_team_b, games_team_a, games_team_b,
                   played_at, created_at
            FROM matches
            WHERE stage_id = $1 AND division_id = $2 AND status = 'jugado'
            ORDER BY played_at ASC NULLS LAST, created_at ASC
            "#,
        )
        .bind(stage_id)
        .bind(division_id)
        .fetch_all(self.pool)
        .await?;

        Ok(matches)
    }

    pub async fn create(&self, new_match: &NewMatch) -> Result<Match> {
        let created = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (
                stage_id, division_id, player_a1, player_a2, player_b1, player_b2, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING match_id, stage_id, division_id,
                      player_a1, player_a2, player_b1, player_b2,
                      status, winner, sets_team_a, sets_team_b, games_team_a, games_team_b,
                      played_at, created_at
            "#,
        )
        .bind(new_match.stage_id)
        .bind(new_match.division_id)
        .bind(new_match.player_a1)
        .bind(new_match.player_a2)
        .bind(new_match.player_b1)
        .bind(new_match.player_b2)
        .bind(new_match.status)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                return StorageError::ConstraintViolation(
                    "Match references an unknown stage, division or player".to_string(),
                );
            }
            e
        })?;

        Ok(created)
    }

    pub async fn update_result(&self, match_id: Uuid, result: &MatchResult) -> Result<Match> {
        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET
                status = 'jugado',
                winner = $2,
                sets_team_a = $3,
                sets_team_b = $4,
                games_team_a = $5,
                games_team_b = $6,
                played_at = COALESCE(played_at, CURRENT_TIMESTAMP)
            WHERE match_id = $1
            RETURNING match_id, stage_id, division_id,
                      player_a1, player_a2, player_b1, player_b2,
                      status, winner, sets_team_a, sets_team_b, games_team_a, games_team_b,
                      played_at, created_at
            "#,
        )
        .bind(match_id)
        .bind(result.winner)
        .bind(result.sets_team_a)
        .bind(result.sets_team_b)
        .bind(result.games_team_a)
        .bind(result.games_team_b)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }
}
