mod args;
mod client;
mod enrich;
mod lol;
mod pipeline;
mod rank;
mod service;
mod store;
#[cfg(test)]
mod testutil;

use std::sync::Arc;

use clap::Parser;

use crate::{
    args::Args,
    client::Client,
    pipeline::Pipeline,
    service::AppState,
    store::MatchStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let client = Client::new(
        &args.api_key,
        args.proxy.as_deref(),
        &args.regional_host,
        &args.platform_host,
    )?;
    let store = MatchStore::connect(&args.database_url).await?;
    let pipeline = Pipeline::new(client.clone(), store, &args);

    let state = Arc::new(AppState { client, pipeline });
    let app = service::router(state);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    log::info!("listening on {}", args.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
