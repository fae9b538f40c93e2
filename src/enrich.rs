use chrono::Utc;
use futures::future::join_all;

use crate::{
    client::Client,
    lol::{match_v5, MatchRecord, PlayerStats, QueueType},
    rank::resolve_rank,
};

/// Turn a raw match-v5 payload into a `MatchRecord` with one `PlayerStats`
/// row per participant.
///
/// Rank lookups for all participants run concurrently; the output keeps the
/// upstream participant order because `join_all` yields results by input
/// index, not completion order. Pure apart from the rank lookups: nothing is
/// written to storage here.
pub async fn enrich(client: &Client, mat: &match_v5::Match) -> MatchRecord {
    let info = &mat.info;
    let ranks = join_all(
        info.participants
            .iter()
            .map(|p| resolve_rank(client, &p.puuid, QueueType::RankedSolo)),
    )
    .await;

    let inserted_at = Utc::now().timestamp_millis();
    let participants = info
        .participants
        .iter()
        .zip(ranks)
        .map(|(p, rank)| PlayerStats {
            puuid: p.puuid.clone(),
            match_id: mat.metadata.match_id.clone(),
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            gold_earned: p.gold_earned,
            minions_killed: p.total_minions_killed + p.neutral_minions_killed,
            damage_dealt: p.total_damage_dealt_to_champions,
            game_duration: info.game_duration,
            match_timestamp: info.game_creation,
            rank,
            inserted_at,
        })
        .collect();

    MatchRecord {
        match_id: mat.metadata.match_id.clone(),
        queue: QueueType::from(info.queue_id),
        game_duration: info.game_duration,
        game_creation: info.game_creation,
        participants,
    }
}
