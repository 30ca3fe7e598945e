use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::PlayerRanking;

use super::common::PaginationParams;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DivisionRankingFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Only players who reached the required number of matches.
    #[serde(default)]
    pub only_eligible: bool,
}

impl DivisionRankingFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingEntry {
    pub position: i64,
    #[serde(flatten)]
    pub ranking: PlayerRanking,
}

impl RankingEntry {
    /// Numbers rows starting after `offset`.
    pub fn numbered(rows: Vec<PlayerRanking>, offset: u32) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(index, ranking)| Self {
                position: i64::from(offset) + index as i64 + 1,
                ranking,
            })
            .collect()
    }
}
