use uuid::Uuid;

use crate::models::{Division, MatchResult, RegistrationStatus, Team};
use crate::repository::MemoryStore;

use super::averages::recompute_division_rankings;

pub(crate) struct League {
    pub store: MemoryStore,
    pub stage_id: Uuid,
    pub divisions: Vec<Division>,
    pub players: Vec<Vec<Uuid>>,
}

/// Stage with `division_count` divisions of `size` registered players and
/// computed rankings. Every player teams up with the player half a division
/// away, and the lower-indexed pair wins each meeting 2-0.
pub(crate) async fn seed_league(division_count: i32, size: usize) -> League {
    let store = MemoryStore::new();
    let stage = store.add_stage("Clausura");
    let mut divisions = Vec::new();
    let mut players = Vec::new();

    for number in 1..=division_count {
        let division = store.add_division(stage.stage_id, number);
        let members: Vec<Uuid> = (0..size).map(|_| Uuid::new_v4()).collect();
        for player in &members {
            store.add_registration(&division, *player, RegistrationStatus::Active);
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let partner_i = members[(i + size / 2) % size];
                let partner_j = members[(j + size / 2) % size];
                if partner_i == members[j] || partner_j == members[i] {
                    continue;
                }
                store.add_played_match(
                    &division,
                    [members[i], partner_i],
                    [members[j], partner_j],
                    MatchResult {
                        winner: Team::A,
                        sets_team_a: 2,
                        sets_team_b: 0,
                        games_team_a: 12,
                        games_team_b: 6,
                    },
                );
            }
        }

        recompute_division_rankings(&store, stage.stage_id, division.division_id)
            .await
            .unwrap();
        divisions.push(division);
        players.push(members);
    }

    League {
        store,
        stage_id: stage.stage_id,
        divisions,
        players,
    }
}
