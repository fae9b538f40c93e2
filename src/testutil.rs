// In-process stand-in for the Riot API, serving canned payloads over a real
// socket so client, pipeline and service tests exercise the full HTTP path.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{
    client::Client,
    lol::{account::Account, league::LeagueEntry, match_v5},
    store::MatchStore,
};

/// A store backed by a scratch file. Keep the `TempDir` alive for as long as
/// the store is used.
pub async fn temp_store() -> (MatchStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/stats.db?mode=rwc", dir.path().display());
    let store = MatchStore::connect(&url).await.unwrap();
    (store, dir)
}

#[derive(Default)]
pub struct MockRiot {
    /// Id list returned for every puuid.
    pub ids: Vec<String>,
    pub matches: HashMap<String, match_v5::Match>,
    /// Match ids whose detail fetch answers 500.
    pub fail_matches: HashSet<String>,
    pub accounts: HashMap<String, Account>,
    pub leagues: HashMap<String, Vec<LeagueEntry>>,
    /// Artificial latency per puuid on the league endpoint.
    pub league_delay_ms: HashMap<String, u64>,
    pub fail_leagues: bool,
}

/// Serve `mock` on an ephemeral port and return a `Client` pointed at it.
pub async fn spawn(mock: MockRiot) -> Client {
    let state = Arc::new(mock);
    let router = Router::new()
        .route("/lol/match/v5/matches/by-puuid/:puuid/ids", get(match_ids))
        .route("/lol/match/v5/matches/:id", get(match_detail))
        .route(
            "/lol/league/v4/entries/by-puuid/:puuid",
            get(league_entries),
        )
        .route(
            "/riot/account/v1/accounts/by-riot-id/:name/:tag",
            get(account),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    Client::new("test-key", None, &base, &base).unwrap()
}

async fn match_ids(State(mock): State<Arc<MockRiot>>) -> Json<Vec<String>> {
    Json(mock.ids.clone())
}

async fn match_detail(
    State(mock): State<Arc<MockRiot>>,
    Path(id): Path<String>,
) -> Result<Json<match_v5::Match>, StatusCode> {
    if mock.fail_matches.contains(&id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    mock.matches
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn league_entries(
    State(mock): State<Arc<MockRiot>>,
    Path(puuid): Path<String>,
) -> Result<Json<Vec<LeagueEntry>>, StatusCode> {
    if let Some(&ms) = mock.league_delay_ms.get(&puuid) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    if mock.fail_leagues {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(mock.leagues.get(&puuid).cloned().unwrap_or_default()))
}

async fn account(
    State(mock): State<Arc<MockRiot>>,
    Path((name, tag)): Path<(String, String)>,
) -> Result<Json<Account>, StatusCode> {
    mock.accounts
        .get(&format!("{}#{}", name, tag))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub fn league_entry(queue_type: &str, tier: &str) -> LeagueEntry {
    LeagueEntry {
        queue_type: queue_type.to_string(),
        tier: tier.to_string(),
        ..Default::default()
    }
}

/// A match payload with per-index participant stats, so field mapping is
/// checkable without fixture files.
pub fn make_match(
    match_id: &str,
    queue_id: u16,
    game_creation: i64,
    puuids: &[&str],
) -> match_v5::Match {
    let participants = puuids
        .iter()
        .enumerate()
        .map(|(idx, puuid)| {
            let n = idx as u32;
            match_v5::Participant {
                puuid: puuid.to_string(),
                kills: n + 1,
                deaths: n + 2,
                assists: n + 3,
                gold_earned: 10_000 + n,
                total_minions_killed: 150 + n,
                neutral_minions_killed: 20 + n,
                total_damage_dealt_to_champions: 20_000 + n,
            }
        })
        .collect::<Vec<_>>();

    match_v5::Match {
        metadata: match_v5::Metadata {
            match_id: match_id.to_string(),
            participants: puuids.iter().map(|p| p.to_string()).collect(),
        },
        info: match_v5::Info {
            game_creation,
            game_duration: 1800,
            queue_id,
            participants,
        },
    }
}
