use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use nfl_sim_core::Game;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
	pub week: Option<u8>,
}

pub async fn get_schedule(State(state): State<AppState>, Query(query): Query<ScheduleQuery>) -> Json<Vec<Game>> {
	let games = state.effective_schedule().await;
	let games = match query.week {
		Some(week) => games.into_iter().filter(|g| g.week == week).collect(),
		None => games,
	};
	Json(games)
}
