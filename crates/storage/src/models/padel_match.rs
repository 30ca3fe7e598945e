use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Side of a doubles match. `A` is the superior side in playoff ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "match_team")]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

/// One of the four player positions of a doubles match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Slot {
    A1,
    A2,
    B1,
    B2,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::A1, Slot::A2, Slot::B1, Slot::B2];

    pub fn team(self) -> Team {
        match self {
            Slot::A1 | Slot::A2 => Team::A,
            Slot::B1 | Slot::B2 => Team::B,
        }
    }

    pub fn slots_of(team: Team) -> [Slot; 2] {
        match team {
            Team::A => [Slot::A1, Slot::A2],
            Team::B => [Slot::B1, Slot::B2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "match_status")]
pub enum MatchStatus {
    #[sqlx(rename = "pendiente")]
    #[serde(rename = "pendiente")]
    Pending,
    #[sqlx(rename = "jugado")]
    #[serde(rename = "jugado")]
    Played,
    #[sqlx(rename = "cancelado")]
    #[serde(rename = "cancelado")]
    Cancelled,
    #[sqlx(rename = "WO")]
    #[serde(rename = "WO")]
    Walkover,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub match_id: Uuid,
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub player_a1: Uuid,
    pub player_a2: Uuid,
    pub player_b1: Uuid,
    pub player_b2: Uuid,
    pub status: MatchStatus,
    pub winner: Option<Team>,
    pub sets_team_a: Option<i32>,
    pub sets_team_b: Option<i32>,
    pub games_team_a: Option<i32>,
    pub games_team_b: Option<i32>,
    pub played_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Match {
    pub fn player_at(&self, slot: Slot) -> Uuid {
        match slot {
            Slot::A1 => self.player_a1,
            Slot::A2 => self.player_a2,
            Slot::B1 => self.player_b1,
            Slot::B2 => self.player_b2,
        }
    }

    /// First slot occupied by `player_id`, if the player took part.
    pub fn slot_of(&self, player_id: Uuid) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.player_at(*slot) == player_id)
    }

    pub fn team_of(&self, player_id: Uuid) -> Option<Team> {
        self.slot_of(player_id).map(Slot::team)
    }

    pub fn players(&self, team: Team) -> [Uuid; 2] {
        Slot::slots_of(team).map(|slot| self.player_at(slot))
    }

    pub fn sets_for(&self, team: Team) -> i32 {
        match team {
            Team::A => self.sets_team_a.unwrap_or(0),
            Team::B => self.sets_team_b.unwrap_or(0),
        }
    }

    pub fn games_for(&self, team: Team) -> i32 {
        match team {
            Team::A => self.games_team_a.unwrap_or(0),
            Team::B => self.games_team_b.unwrap_or(0),
        }
    }

    /// Recorded winner, falling back to the set count when the winner column
    /// was left empty. A level set count yields no winner.
    pub fn winning_team(&self) -> Option<Team> {
        if self.winner.is_some() {
            return self.winner;
        }

        match (self.sets_team_a, self.sets_team_b) {
            (Some(a), Some(b)) if a > b => Some(Team::A),
            (Some(a), Some(b)) if b > a => Some(Team::B),
            _ => None,
        }
    }
}

/// Payload for inserting a match.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub stage_id: Uuid,
    pub division_id: Uuid,
    pub player_a1: Uuid,
    pub player_a2: Uuid,
    pub player_b1: Uuid,
    pub player_b2: Uuid,
    pub status: MatchStatus,
}

/// Final score of a match or playoff tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchResult {
    pub winner: Team,
    pub sets_team_a: i32,
    pub sets_team_b: i32,
    pub games_team_a: i32,
    pub games_team_b: i32,
}

impl MatchResult {
    pub fn validate(&self) -> Result<(), String> {
        if self.sets_team_a < 0
            || self.sets_team_b < 0
            || self.games_team_a < 0
            || self.games_team_b < 0
        {
            return Err("set and game counts must not be negative".to_string());
        }

        let (winner_sets, loser_sets) = match self.winner {
            Team::A => (self.sets_team_a, self.sets_team_b),
            Team::B => (self.sets_team_b, self.sets_team_a),
        };
        if winner_sets <= loser_sets {
            return Err(format!(
                "team {:?} cannot win with {} sets against {}",
                self.winner, winner_sets, loser_sets
            ));
        }

        Ok(())
    }
}
