use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    client::{Client, RequestError},
    lol::{account::Account, league::LeagueEntry, MatchRecord, QueueType},
    pipeline::{IngestError, Pipeline},
};

pub struct AppState {
    pub client: Client,
    pub pipeline: Pipeline,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summoner/recent-matches/:puuid", get(recent_matches))
        .route("/summoner/match-history/:puuid", get(match_history))
        .route("/summoner/account/:game_name/:tag_line", get(account))
        .route("/summoner/ranked-stats/:puuid", get(ranked_stats))
        .with_state(state)
}

/// An error the caller sees: HTTP status plus a `{"error": message}` body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        let status = match &err {
            IngestError::EmptyPuuid => StatusCode::BAD_REQUEST,
            IngestError::NoMatches => StatusCode::NOT_FOUND,
            IngestError::Upstream(RequestError::NotFound) => StatusCode::NOT_FOUND,
            IngestError::Upstream(_) | IngestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("ingestion failed: {}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        let status = match err {
            RequestError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("upstream request failed: {}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

async fn recent_matches(
    State(state): State<Arc<AppState>>,
    Path(puuid): Path<String>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    let records = state.pipeline.fetch_recent_enriched(&puuid).await?;
    Ok(Json(records))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HistoryParams {
    #[serde(default)]
    pub start: u32,
    #[serde(default = "default_count")]
    pub count: u8,
}

pub fn default_count() -> u8 {
    20
}

async fn match_history(
    State(state): State<Arc<AppState>>,
    Path(puuid): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state
        .client
        .get_match_ids(&puuid, params.start, params.count.min(100))
        .await?;
    Ok(Json(ids))
}

async fn account(
    State(state): State<Arc<AppState>>,
    Path((game_name, tag_line)): Path<(String, String)>,
) -> Result<Json<Account>, ApiError> {
    let account = state.client.get_account(&game_name, &tag_line).await?;
    Ok(Json(account))
}

async fn ranked_stats(
    State(state): State<Arc<AppState>>,
    Path(puuid): Path<String>,
) -> Result<Json<Vec<LeagueEntry>>, ApiError> {
    let entries = state.client.get_league_entries(&puuid).await?;
    let ranked = entries
        .into_iter()
        .filter(|entry| {
            [QueueType::RankedSolo, QueueType::RankedFlex]
                .iter()
                .any(|queue| queue.league_queue() == Some(entry.queue_type.as_str()))
        })
        .collect();
    Ok(Json(ranked))
}
