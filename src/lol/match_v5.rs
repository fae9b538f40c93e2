// Response shapes for the match-v5 endpoints. Only the fields the relay
// consumes are modeled; the upstream payload carries far more.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub metadata: Metadata,
    pub info: Info,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Epoch milliseconds.
    pub game_creation: i64,
    /// Seconds.
    pub game_duration: u32,
    pub queue_id: u16,
    pub participants: Vec<Participant>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub puuid: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u32,
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    pub total_damage_dealt_to_champions: u32,
}
