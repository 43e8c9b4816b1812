use anyhow::Result;
use clap::Parser;
use nfl_sim_jobs::JobRegistry;
use nfl_sim_overrides::OverrideStore;
use nfl_sim_server::{init_tracing, routes, snapshot, AppState, Config};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Arc::new(Config::parse());
	init_tracing(&config);

	tokio::fs::create_dir_all(&config.cache_directory).await?;

	let season = config.resolved_season();
	let roster = Arc::new(snapshot::load_roster(&config.cache_directory).await?);
	let schedule = snapshot::load_schedule(&config.cache_directory, season).await?;
	let overrides = Arc::new(OverrideStore::load(config.cache_directory.join("user_overrides.json")).await?);
	let jobs = JobRegistry::with_worker_threads(config.job_ttl(), config.sim_worker_threads);

	let state = AppState {
		config: config.clone(),
		roster,
		schedule: Arc::new(RwLock::new(schedule)),
		overrides,
		jobs,
	};

	let app = routes::router().with_state(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

	let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
	tracing::info!(port = config.port, season, "listening");
	axum::serve(listener, app).await?;

	Ok(())
}
