pub mod division;
pub mod division_movement;
pub mod league_settings;
pub mod padel_match;
pub mod player_ranking;
pub mod playoff;
pub mod registration;
pub mod stage;

pub use division::Division;
pub use division_movement::{DivisionMovement, MovementKind, MovementTrigger, NewDivisionMovement};
pub use league_settings::{LeagueSettings, LeagueSettingsRow};
pub use padel_match::{Match, MatchResult, MatchStatus, NewMatch, Slot, Team};
pub use player_ranking::{NewPlayerRanking, PlayerRanking};
pub use playoff::{NewPlayoff, Playoff, PlayoffStatus};
pub use registration::{Registration, RegistrationStatus};
pub use stage::{Stage, StageStatus};
