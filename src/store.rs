use sqlx::sqlite::SqlitePool;

use crate::lol::PlayerStats;

/// Persisted per-participant match statistics with a row-count ceiling.
///
/// Rows are keyed by (puuid, match_id); re-ingesting a match overwrites the
/// existing row instead of duplicating it. Concurrent upserts of the same key
/// are last-write-wins with no defined ordering.
pub struct MatchStore {
    pool: SqlitePool,
}

impl MatchStore {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePool::connect(url).await?;

        // create schema if not exists
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS player_match_stats (
                puuid TEXT NOT NULL,
                match_id TEXT NOT NULL,
                kills INTEGER NOT NULL,
                deaths INTEGER NOT NULL,
                assists INTEGER NOT NULL,
                gold_earned INTEGER NOT NULL,
                minions_killed INTEGER NOT NULL,
                damage_dealt INTEGER NOT NULL,
                game_duration INTEGER NOT NULL,
                match_timestamp INTEGER NOT NULL,
                rank TEXT NOT NULL,
                inserted_at INTEGER NOT NULL,
                PRIMARY KEY (puuid, match_id)
            )",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_player_match_stats_inserted_at
             ON player_match_stats (inserted_at)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Upsert each row independently. There is deliberately no transaction
    /// around the batch: a failure mid-batch leaves earlier rows committed.
    pub async fn upsert_batch(&self, rows: &[PlayerStats]) -> Result<(), sqlx::Error> {
        for row in rows {
            sqlx::query(
                "INSERT INTO player_match_stats
                    (puuid, match_id, kills, deaths, assists, gold_earned,
                     minions_killed, damage_dealt, game_duration,
                     match_timestamp, rank, inserted_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT (puuid, match_id) DO UPDATE SET
                    kills = excluded.kills,
                    deaths = excluded.deaths,
                    assists = excluded.assists,
                    gold_earned = excluded.gold_earned,
                    minions_killed = excluded.minions_killed,
                    damage_dealt = excluded.damage_dealt,
                    game_duration = excluded.game_duration,
                    match_timestamp = excluded.match_timestamp,
                    rank = excluded.rank,
                    inserted_at = excluded.inserted_at",
            )
            .bind(&row.puuid)
            .bind(&row.match_id)
            .bind(row.kills)
            .bind(row.deaths)
            .bind(row.assists)
            .bind(row.gold_earned)
            .bind(row.minions_killed)
            .bind(row.damage_dealt)
            .bind(row.game_duration)
            .bind(row.match_timestamp)
            .bind(row.rank.as_str())
            .bind(row.inserted_at)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM player_match_stats")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Delete exactly the rows beyond `max_rows`, strictly oldest
    /// `inserted_at` first, ties broken by (puuid, match_id). Returns how
    /// many rows were evicted.
    ///
    /// Not mutually exclusive with concurrent upserts: the count is read
    /// before the delete, so the table can transiently overshoot the cap
    /// until the next enforcement pass.
    pub async fn enforce_cap(&self, max_rows: u64) -> Result<u64, sqlx::Error> {
        let count = self.count().await?;
        if count <= max_rows {
            return Ok(0);
        }
        let excess = count - max_rows;
        sqlx::query(
            "DELETE FROM player_match_stats WHERE rowid IN (
                SELECT rowid FROM player_match_stats
                ORDER BY inserted_at ASC, puuid ASC, match_id ASC
                LIMIT ?)",
        )
        .bind(excess as i64)
        .execute(&self.pool)
        .await?;
        log::info!("retention cap: evicted {} oldest rows", excess);
        Ok(excess)
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
