use crate::error::Error;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use nfl_sim_core::{CancelFlag, SimulationResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
	pub num_simulations: u32,
	pub random_seed: Option<u64>,
}

/// `POST /simulate`: the synchronous, legacy path -- runs to completion on
/// the request task (via `spawn_blocking`) and returns the full result. Most
/// callers should prefer `/simulation-jobs` instead.
pub async fn post_simulate(State(state): State<AppState>, Json(request): Json<SimulateRequest>) -> Result<Json<SimulationResult>, Error> {
	let games = state.effective_schedule().await;
	let roster = state.roster.clone();
	let worker_threads_override = state.config.sim_worker_threads;

	let result = tokio::task::spawn_blocking(move || {
		let progress = |_percent: u8| {};
		let cancel = CancelFlag::new();
		nfl_sim_montecarlo::simulate_with_threads(&games, &roster, request.num_simulations, request.random_seed, worker_threads_override, &progress, &cancel)
	})
	.await
	.map_err(|join_err| Error::Internal(anyhow::anyhow!("simulation task panicked: {join_err}")))??;

	Ok(Json(result))
}
