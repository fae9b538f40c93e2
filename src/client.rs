use std::time::Duration;

use reqwest::{Proxy, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::lol::{account::Account, league::LeagueEntry, match_v5};

// we use separate error types for construction and request

#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("ProxyError: {0} from scheme: {1}.")]
    ProxyError(reqwest::Error, String),
    #[error("BuildError: {0}.")]
    BuildError(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Failed to retrieve result from web API: {0}")]
    ConnectionError(#[from] reqwest::Error),
    #[error("Failed to decode web API response: {0}")]
    DecodeError(serde_json::Error, String),
    #[error("Not Found")]
    NotFound,
    #[error("Too Many Requests")]
    TooManyRequests,
    #[error("Other Response: {0}")]
    OtherResponse(reqwest::StatusCode),
}

/// Authenticated client for the Riot web API. Cloning is cheap and shares
/// the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    key: String,
    /// Regional routing host (account-v1, match-v5).
    regional: String,
    /// Platform routing host (league-v4).
    platform: String,
}

impl Client {
    const HEADER_API_KEY: &'static str = "X-Riot-Token";

    pub fn new(
        key: &str,
        proxy: Option<&str>,
        regional: &str,
        platform: &str,
    ) -> Result<Self, ConstructionError> {
        let builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5));
        let builder = match proxy {
            Some(proxy) => {
                let proxy = Proxy::all(proxy)
                    .map_err(|err| ConstructionError::ProxyError(err, proxy.to_string()))?;
                builder.proxy(proxy)
            }
            None => builder,
        };
        let client = builder.build()?;
        Ok(Self {
            client,
            key: key.to_string(),
            regional: regional.trim_end_matches('/').to_string(),
            platform: platform.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_account(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Account, RequestError> {
        let url = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.regional, game_name, tag_line
        );
        self.dispatch(self.client.get(url)).await
    }

    /// Most-recent-first match ids for a player.
    pub async fn get_match_ids(
        &self,
        puuid: &str,
        start: u32,
        count: u8,
    ) -> Result<Vec<String>, RequestError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.regional, puuid
        );
        let req = self
            .client
            .get(url)
            .query(&[("start", start)])
            .query(&[("count", u32::from(count))]);
        self.dispatch(req).await
    }

    pub async fn get_match(&self, match_id: &str) -> Result<match_v5::Match, RequestError> {
        let url = format!("{}/lol/match/v5/matches/{}", self.regional, match_id);
        self.dispatch(self.client.get(url)).await
    }

    pub async fn get_league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntry>, RequestError> {
        let url = format!("{}/lol/league/v4/entries/by-puuid/{}", self.platform, puuid);
        self.dispatch(self.client.get(url)).await
    }

    async fn dispatch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RequestError> {
        let resp = req.header(Self::HEADER_API_KEY, &self.key).send().await?;
        match resp.status() {
            StatusCode::OK => {
                let content = resp.text().await?;
                serde_json::from_str(&content)
                    .map_err(|err| RequestError::DecodeError(err, content))
            }
            StatusCode::NOT_FOUND => Err(RequestError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(RequestError::TooManyRequests),
            other => Err(RequestError::OtherResponse(other)),
        }
    }
}
