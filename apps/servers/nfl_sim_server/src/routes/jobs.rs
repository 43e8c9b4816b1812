use crate::error::Error;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use nfl_sim_jobs::Job;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StartJobRequest {
	pub num_simulations: u32,
	pub random_seed: Option<u64>,
}

/// `POST /simulation-jobs`: registers a job and returns immediately with
/// `Pending`, 0%. Fails with `Conflict` while another job is active.
pub async fn post_simulation_job(State(state): State<AppState>, Json(request): Json<StartJobRequest>) -> Result<Json<Job>, Error> {
	let games = state.effective_schedule().await;
	let job = state.jobs.start(games, state.roster.clone(), request.num_simulations, request.random_seed)?;
	Ok(Json(job))
}

pub async fn get_simulation_job(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Job>, Error> {
	Ok(Json(state.jobs.get(&id)?))
}

/// `DELETE /simulation-jobs/{id}`: idempotent cancellation request. The
/// returned snapshot may still read `Pending`/`Running` -- cancellation is
/// cooperative and may lag by up to one progress tick.
pub async fn delete_simulation_job(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Job>, Error> {
	Ok(Json(state.jobs.cancel(&id)?))
}
