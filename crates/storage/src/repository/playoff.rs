use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{MatchResult, NewPlayoff, Playoff};

pub struct PlayoffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayoffRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, playoff: &NewPlayoff) -> Result<Playoff> {
        let created = sqlx::query_as::<_, Playoff>(
            r#"
            INSERT INTO playoffs (
                stage_id, division_id, zone,
                superior_player1, superior_player2, inferior_player1, inferior_player2,
                match_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING playoff_id, stage_id, division_id, zone,
                      superior_player1, superior_player2, inferior_player1, inferior_player2,
                      match_id, status, winner, sets_team_a, sets_team_b,
                      games_team_a, games_team_b, created_at
            "#,
        )
        .bind(playoff.stage_id)
        .bind(playoff.division_id)
        .bind(playoff.zone)
        .bind(playoff.superior_player1)
        .bind(playoff.superior_player2)
        .bind(playoff.inferior_player1)
        .bind(playoff.inferior_player2)
        .bind(playoff.match_id)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, playoff_id: Uuid) -> Result<Playoff> {
        let playoff = sqlx::query_as::<_, Playoff>(
            r#"
            SELECT playoff_id, stage_id, division_id, zone,
                   superior_player1, superior_player2, inferior_player1, inferior_player2,
                   match_id, status, winner, sets_team_a, sets_team_b,
                   games_team_a, games_team_b, created_at
            FROM playoffs
            WHERE playoff_id = $1
            "#,
        )
        .bind(playoff_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(playoff)
    }

    pub async fn list_by_stage(&self, stage_id: Uuid) -> Result<Vec<Playoff>> {
        let playoffs = sqlx::query_as::<_, Playoff>(
            r#"
            SELECT playoff_id, stage_id, division_id, zone,
                   superior_player1, superior_player2, inferior_player1, inferior_player2,
                   match_id, status, winner, sets_team_a, sets_team_b,
                   games_team_a, games_team_b, created_at
            FROM playoffs
            WHERE stage_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(stage_id)
        .fetch_all(self.pool)
        .await?;

        Ok(playoffs)
    }

    pub async fn update_result(&self, playoff_id: Uuid, result: &MatchResult) -> Result<Playoff> {
        let updated = sqlx::query_as::<_, Playoff>(
            r#"
            UPDATE playoffs
            SET
                status = 'jugado',
                winner = $2,
                sets_team_a = $3,
                sets_team_b = $4,
                games_team_a = $5,
                games_team_b = $6
            WHERE playoff_id = $1
            RETURNING playoff_id, stage_id, division_id, zone,
                      superior_player1, superior_player2, inferior_player1, inferior_player2,
                      match_id, status, winner, sets_team_a, sets_team_b,
                      games_team_a, games_team_b, created_at
            "#,
        )
        .bind(playoff_id)
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
