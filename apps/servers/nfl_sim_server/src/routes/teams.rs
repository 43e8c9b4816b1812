use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use nfl_sim_core::Team;

pub async fn get_teams(State(state): State<AppState>) -> Json<Vec<Team>> {
	Json(state.roster.teams().to_vec())
}
