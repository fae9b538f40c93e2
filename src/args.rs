use clap::Parser;

#[derive(Parser)]
pub struct Args {
    /// Riot API key sent with every upstream request. Missing key is a
    /// startup error, not a per-request one.
    #[arg(long, env = "RIOT_API_KEY", hide_env_values = true)]
    pub api_key: String,
    #[arg(long)]
    pub proxy: Option<String>,
    /// Regional routing host (account-v1, match-v5).
    #[arg(long, default_value = "https://europe.api.riotgames.com")]
    pub regional_host: String,
    /// Platform routing host (league-v4).
    #[arg(long, default_value = "https://euw1.api.riotgames.com")]
    pub platform_host: String,
    #[arg(long, default_value = "sqlite:match_stats.db?mode=rwc")]
    pub database_url: String,
    /// Row ceiling for the persisted statistics table.
    #[arg(long, default_value_t = 5000)]
    pub max_rows: u64,
    /// How many recent match ids to ingest per request.
    #[arg(long, default_value_t = 10)]
    pub window: u8,
    /// Matches older than this are returned but not persisted.
    #[arg(long, default_value_t = 30)]
    pub max_age_days: i64,
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub listen: String,
}
