use chrono::Utc;
use futures::future::join_all;
use thiserror::Error;

use crate::{
    args::Args,
    client::{Client, RequestError},
    enrich::enrich,
    lol::{MatchRecord, QueueType},
    store::MatchStore,
};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Queues whose matches are returned to the caller.
pub const DEFAULT_QUEUES: [QueueType; 3] = [
    QueueType::RankedSolo,
    QueueType::RankedFlex,
    QueueType::RankedFlexTt,
];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("puuid must not be empty")]
    EmptyPuuid,
    #[error("no matches found")]
    NoMatches,
    #[error(transparent)]
    Upstream(#[from] RequestError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Orchestrates one ingestion request: id list, concurrent detail fetches,
/// enrichment, capped persistence, response filtering.
pub struct Pipeline {
    client: Client,
    store: MatchStore,
    window: u8,
    max_age_days: i64,
    max_rows: u64,
    allowed_queues: Vec<QueueType>,
}

impl Pipeline {
    pub fn new(client: Client, store: MatchStore, args: &Args) -> Self {
        Self {
            client,
            store,
            window: args.window,
            max_age_days: args.max_age_days,
            max_rows: args.max_rows,
            allowed_queues: DEFAULT_QUEUES.to_vec(),
        }
    }

    /// Fetch, enrich and persist a player's recent matches.
    ///
    /// Detail fetches answering 404 are skipped; any other detail failure
    /// aborts the whole request. Matches older than `max_age_days` are
    /// enriched and may be returned, but are never persisted. The returned
    /// list keeps the upstream most-recent-first order and contains only
    /// matches from the allowed queues; persistence and the response filter
    /// are independent of each other.
    pub async fn fetch_recent_enriched(
        &self,
        puuid: &str,
    ) -> Result<Vec<MatchRecord>, IngestError> {
        if puuid.is_empty() {
            return Err(IngestError::EmptyPuuid);
        }

        let ids = self.client.get_match_ids(puuid, 0, self.window).await?;
        if ids.is_empty() {
            return Err(IngestError::NoMatches);
        }
        log::debug!("retrieved {} match ids for {}", ids.len(), puuid);

        // fetch all details concurrently; join_all keeps the id order
        let details = join_all(ids.iter().map(|id| self.client.get_match(id))).await;
        let mut fetched = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(details) {
            match result {
                Ok(mat) => fetched.push(mat),
                Err(RequestError::NotFound) => {
                    log::info!("match {} not available upstream, skipping", id);
                }
                Err(err) => return Err(err.into()),
            }
        }

        let cutoff = Utc::now().timestamp_millis() - self.max_age_days * MS_PER_DAY;
        let mut records = Vec::with_capacity(fetched.len());
        for mat in &fetched {
            let record = enrich(&self.client, mat).await;
            if record.game_creation >= cutoff {
                self.store.upsert_batch(&record.participants).await?;
                self.store.enforce_cap(self.max_rows).await?;
            } else {
                log::debug!("match {} older than retention window, not persisted", record.match_id);
            }
            records.push(record);
        }

        records.retain(|record| self.allowed_queues.contains(&record.queue));
        if records.is_empty() {
            log::debug!("no matches left for {} after queue filter", puuid);
        }
        Ok(records)
    }
}
