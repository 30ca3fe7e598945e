use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::Result;
use crate::models::{NewPlayerRanking, PlayerRanking};

use super::RankingQuery;

const CANONICAL_ORDER: &str = " ORDER BY final_average DESC, set_difference DESC, \
    game_difference DESC, quality_wins DESC, player_id ASC";

pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, ranking: &NewPlayerRanking) -> Result<PlayerRanking> {
        let row = sqlx::query_as::<_, PlayerRanking>(
            r#"
            INSERT INTO player_rankings (
                stage_id, division_id, player_id, matches_played, matches_won,
                individual_average, general_average, play_bonus, final_average,
                required_minimum, meets_minimum, set_difference, game_difference, quality_wins
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (stage_id, division_id, player_id)
            DO UPDATE SET
                matches_played = EXCLUDED.matches_played,
                matches_won = EXCLUDED.matches_won,
                individual_average = EXCLUDED.individual_average,
                general_average = EXCLUDED.general_average,
                play_bonus = EXCLUDED.play_bonus,
                final_average = EXCLUDED.final_average,
                required_minimum = EXCLUDED.required_minimum,
                meets_minimum = EXCLUDED.meets_minimum,
                set_difference = EXCLUDED.set_difference,
                game_difference = EXCLUDED.game_difference,
                quality_wins = EXCLUDED.quality_wins,
                computed_at = CURRENT_TIMESTAMP
            RETURNING ranking_id, stage_id, division_id, player_id, matches_played, matches_won,
                      individual_average, general_average, play_bonus, final_average,
                      required_minimum, meets_minimum, set_difference, game_difference,
                      quality_wins, computed_at
            "#,
        )
        .bind(ranking.stage_id)
        .bind(ranking.division_id)
        .bind(ranking.player_id)
        .bind(ranking.matches_played)
        .bind(ranking.matches_won)
        .bind(ranking.individual_average)
        .bind(ranking.general_average)
        .bind(ranking.play_bonus)
        .bind(ranking.final_average)
        .bind(ranking.required_minimum)
        .bind(ranking.meets_minimum)
        .bind(ranking.set_difference)
        .bind(ranking.game_difference)
        .bind(ranking.quality_wins)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list(&self, filter: &RankingQuery) -> Result<Vec<PlayerRanking>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT ranking_id, stage_id, division_id, player_id, matches_played, matches_won,
                   individual_average, general_average, play_bonus, final_average,
                   required_minimum, meets_minimum, set_difference, game_difference,
                   quality_wins, computed_at
            FROM player_rankings
            WHERE stage_id =
            "#,
        );
        query.push_bind(filter.stage_id);
        query.push(" AND division_id = ");
        query.push_bind(filter.division_id);

        if filter.only_eligible {
            query.push(" AND meets_minimum = true");
        }

        query.push(CANONICAL_ORDER);

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        if let Some(offset) = filter.offset {
            query.push(" OFFSET ");
            query.push_bind(offset);
        }

        let rows: Vec<PlayerRanking> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows)
    }

    pub async fn count(&self, filter: &RankingQuery) -> Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*)
            FROM player_rankings
            WHERE stage_id =
            "#,
        );
        query.push_bind(filter.stage_id);
        query.push(" AND division_id = ");
        query.push_bind(filter.division_id);

        if filter.only_eligible {
            query.push(" AND meets_minimum = true");
        }

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
