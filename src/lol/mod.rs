use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod account;
pub mod league;
pub mod match_v5;

/// Competitive queue a match was played in, derived from the numeric
/// queue id carried by the match-v5 payload.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueType {
    RankedSolo,
    RankedFlex,
    RankedFlexTt,
    Clash,
    Other,
}

impl From<u16> for QueueType {
    fn from(queue_id: u16) -> Self {
        match queue_id {
            420 => Self::RankedSolo,
            440 => Self::RankedFlex,
            470 => Self::RankedFlexTt,
            700 => Self::Clash,
            _ => Self::Other,
        }
    }
}

impl QueueType {
    /// The queue string used by the league-v4 entries endpoint, where one
    /// exists for this queue.
    pub fn league_queue(self) -> Option<&'static str> {
        match self {
            Self::RankedSolo => Some("RANKED_SOLO_5x5"),
            Self::RankedFlex => Some("RANKED_FLEX_SR"),
            Self::RankedFlexTt => Some("RANKED_FLEX_TT"),
            Self::Clash | Self::Other => None,
        }
    }
}

impl Display for QueueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RankedSolo => "ranked-solo",
            Self::RankedFlex => "ranked-flex",
            Self::RankedFlexTt => "ranked-flex-tt",
            Self::Clash => "clash",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Ranked ladder tier. Anything the upstream reports that we don't know,
/// and every failed lookup, collapses to `Unranked`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankTier {
    Unranked,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl RankTier {
    pub fn from_tier(tier: &str) -> Self {
        match tier {
            "IRON" => Self::Iron,
            "BRONZE" => Self::Bronze,
            "SILVER" => Self::Silver,
            "GOLD" => Self::Gold,
            "PLATINUM" => Self::Platinum,
            "EMERALD" => Self::Emerald,
            "DIAMOND" => Self::Diamond,
            "MASTER" => Self::Master,
            "GRANDMASTER" => Self::Grandmaster,
            "CHALLENGER" => Self::Challenger,
            _ => Self::Unranked,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unranked => "UNRANKED",
            Self::Iron => "IRON",
            Self::Bronze => "BRONZE",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
            Self::Emerald => "EMERALD",
            Self::Diamond => "DIAMOND",
            Self::Master => "MASTER",
            Self::Grandmaster => "GRANDMASTER",
            Self::Challenger => "CHALLENGER",
        }
    }
}

/// One participant's statistics for one match. This is the row unit persisted
/// by the store; (puuid, match_id) is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub puuid: String,
    pub match_id: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u32,
    pub minions_killed: u32,
    pub damage_dealt: u32,
    /// Match length in seconds.
    pub game_duration: u32,
    /// Game creation time, epoch milliseconds.
    pub match_timestamp: i64,
    pub rank: RankTier,
    /// When this row was produced, epoch milliseconds.
    pub inserted_at: i64,
}

/// A fully enriched match as returned to the caller: normalized match header
/// plus one `PlayerStats` per participant, in upstream participant order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_id: String,
    pub queue: QueueType,
    pub game_duration: u32,
    pub game_creation: i64,
    pub participants: Vec<PlayerStats>,
}
