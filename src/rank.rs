use crate::{
    client::Client,
    lol::{QueueType, RankTier},
};

/// Current ranked tier of a player in one queue.
///
/// Total by contract: an unresolved rank must not abort enrichment of a whole
/// match, so lookup failures of any kind collapse to `Unranked`.
pub async fn resolve_rank(client: &Client, puuid: &str, queue: QueueType) -> RankTier {
    let Some(league_queue) = queue.league_queue() else {
        return RankTier::Unranked;
    };
    match client.get_league_entries(puuid).await {
        Ok(entries) => entries
            .iter()
            .find(|entry| entry.queue_type == league_queue)
            .map(|entry| RankTier::from_tier(&entry.tier))
            .unwrap_or(RankTier::Unranked),
        Err(err) => {
            log::debug!("rank lookup failed for {}: {}", puuid, err);
            RankTier::Unranked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{self, league_entry as entry, MockRiot};

    #[tokio::test]
    async fn resolves_tier_for_matching_queue() {
        let mut mock = MockRiot::default();
        mock.leagues.insert(
            "p1".to_string(),
            vec![
                entry("RANKED_FLEX_SR", "SILVER"),
                entry("RANKED_SOLO_5x5", "GOLD"),
            ],
        );
        let client = testutil::spawn(mock).await;

        let tier = resolve_rank(&client, "p1", QueueType::RankedSolo).await;
        assert_eq!(tier, RankTier::Gold);
        let tier = resolve_rank(&client, "p1", QueueType::RankedFlex).await;
        assert_eq!(tier, RankTier::Silver);
    }

    #[tokio::test]
    async fn unranked_when_queue_missing() {
        let mut mock = MockRiot::default();
        mock.leagues
            .insert("p1".to_string(), vec![entry("RANKED_FLEX_SR", "SILVER")]);
        let client = testutil::spawn(mock).await;

        let tier = resolve_rank(&client, "p1", QueueType::RankedSolo).await;
        assert_eq!(tier, RankTier::Unranked);
        // player with no entries at all
        let tier = resolve_rank(&client, "p2", QueueType::RankedSolo).await;
        assert_eq!(tier, RankTier::Unranked);
    }

    #[tokio::test]
    async fn unranked_when_upstream_fails() {
        let mut mock = MockRiot::default();
        mock.fail_leagues = true;
        let client = testutil::spawn(mock).await;

        let tier = resolve_rank(&client, "p1", QueueType::RankedSolo).await;
        assert_eq!(tier, RankTier::Unranked);
    }

    #[tokio::test]
    async fn unranked_when_upstream_unreachable() {
        // nothing is listening on this address
        let client = Client::new("k", None, "http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
        let tier = resolve_rank(&client, "p1", QueueType::RankedSolo).await;
        assert_eq!(tier, RankTier::Unranked);
    }

    #[tokio::test]
    async fn unranked_for_queues_without_ladder() {
        let client = Client::new("k", None, "http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
        let tier = resolve_rank(&client, "p1", QueueType::Clash).await;
        assert_eq!(tier, RankTier::Unranked);
    }
}
