mod health;
mod jobs;
mod overrides;
mod schedule;
mod simulate;
mod standings;
mod teams;

use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;

/// The full route table, assembled as one router and merged into `main`'s
/// app.
pub fn router() -> Router<AppState> {
	Router::new()
		.route("/teams", get(teams::get_teams))
		.route("/schedule", get(schedule::get_schedule))
		.route("/standings", get(standings::get_standings))
		.route("/simulate", post(simulate::post_simulate))
		.route("/simulation-jobs", post(jobs::post_simulation_job))
		.route("/simulation-jobs/:id", get(jobs::get_simulation_job).delete(jobs::delete_simulation_job))
		.route("/override", post(overrides::post_override))
		.route("/override/:game_id", delete(overrides::delete_override))
		.route("/healthz", get(health::healthz))
}
