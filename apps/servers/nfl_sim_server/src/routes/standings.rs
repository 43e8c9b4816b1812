use crate::error::Error;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use nfl_sim_core::{fixed_outcomes, resolve_schedule, LeagueStats, Standing};
use serde::Serialize;

/// The league's current standings, computed only from completed/overridden
/// games -- unresolved games are left out, matching `GET /standings`'s
/// "no simulation involved" read-only semantics.
#[derive(Debug, Serialize)]
pub struct StandingRow {
	pub team_id: String,
	#[serde(flatten)]
	pub standing: Standing,
	pub win_percentage: f64,
	pub net_points: i32,
}

pub async fn get_standings(State(state): State<AppState>) -> Result<Json<Vec<StandingRow>>, Error> {
	let games = state.effective_schedule().await;
	let resolved = resolve_schedule(&games, &state.roster)?;
	let outcomes = fixed_outcomes(&resolved);
	let league = LeagueStats::compute(&state.roster, &outcomes);

	let rows = state
		.roster
		.teams()
		.iter()
		.enumerate()
		.map(|(idx, team)| {
			let standing = league.standing(idx as u8).clone();
			StandingRow {
				team_id: team.id.clone(),
				win_percentage: standing.win_percentage(),
				net_points: standing.net_points(),
				standing,
			}
		})
		.collect();

	Ok(Json(rows))
}
