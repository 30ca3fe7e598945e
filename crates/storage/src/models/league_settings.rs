use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored tuning row. A row without `division_id` applies to the whole
/// stage; every column may be left empty to inherit the next layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeagueSettingsRow {
    pub settings_id: Uuid,
    pub stage_id: Uuid,
    pub division_id: Option<Uuid>,
    pub promotion_percentage: Option<Decimal>,
    pub minimum_quota: Option<i32>,
    pub maximum_quota: Option<i32>,
    pub playoff_players: Option<i32>,
}

/// Fully resolved promotion/relegation tuning for one division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeagueSettings {
    pub promotion_percentage: Decimal,
    pub minimum_quota: u32,
    pub maximum_quota: u32,
    pub playoff_players: u32,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            promotion_percentage: Decimal::from(20),
            minimum_quota: 2,
            maximum_quota: 10,
            playoff_players: 4,
        }
    }
}

impl LeagueSettings {
    /// Resolves every field from the division row, then the stage row, then
    /// the defaults.
    pub fn resolve(rows: &[LeagueSettingsRow], division_id: Uuid) -> Self {
        let division_row = rows.iter().find(|r| r.division_id == Some(division_id));
        let stage_row = rows.iter().find(|r| r.division_id.is_none());
        let layers = [division_row, stage_row];

        let pick = |field: fn(&LeagueSettingsRow) -> Option<i32>| {
            layers
                .iter()
                .flatten()
                .find_map(|row| field(row))
                .map(|value| value.max(0) as u32)
        };

        let defaults = Self::default();

        Self {
            promotion_percentage: layers
                .iter()
                .flatten()
                .find_map(|row| row.promotion_percentage)
                .unwrap_or(defaults.promotion_percentage),
            minimum_quota: pick(|row| row.minimum_quota).unwrap_or(defaults.minimum_quota),
            maximum_quota: pick(|row| row.maximum_quota).unwrap_or(defaults.maximum_quota),
            playoff_players: pick(|row| row.playoff_players).unwrap_or(defaults.playoff_players),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(division_id: Option<Uuid>) -> LeagueSettingsRow {
        LeagueSettingsRow {
            settings_id: Uuid::new_v4(),
            stage_id: Uuid::nil(),
            division_id,
            promotion_percentage: None,
            minimum_quota: None,
            maximum_quota: None,
            playoff_players: None,
        }
    }

    #[test]
    fn test_no_rows_uses_defaults() {
        let settings = LeagueSettings::resolve(&[], Uuid::new_v4());
        assert_eq!(settings, LeagueSettings::default());
        assert_eq!(settings.promotion_percentage, Decimal::from(20));
        assert_eq!(settings.playoff_players, 4);
    }

    #[test]
    fn test_division_row_overrides_stage_row_per_field() {
        let division_id = Uuid::new_v4();

        let mut stage = row(None);
        stage.promotion_percentage = Some(Decimal::from(25));
        stage.maximum_quota = Some(6);

        let mut division = row(Some(division_id));
        division.maximum_quota = Some(3);
        division.playoff_players = Some(8);

        let settings = LeagueSettings::resolve(&[stage, division], division_id);
        assert_eq!(settings.promotion_percentage, Decimal::from(25));
        assert_eq!(settings.minimum_quota, 2);
        assert_eq!(settings.maximum_quota, 3);
        assert_eq!(settings.playoff_players, 8);
    }

    #[test]
    fn test_rows_for_other_divisions_are_ignored() {
        let mut other = row(Some(Uuid::new_v4()));
        other.minimum_quota = Some(5);

        let settings = LeagueSettings::resolve(&[other], Uuid::new_v4());
        assert_eq!(settings.minimum_quota, 2);
    }
}
