use crate::error::Error;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SetOverrideRequest {
	pub game_id: String,
	pub home_score: Option<u16>,
	pub away_score: Option<u16>,
	pub is_overridden: bool,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
	pub ok: bool,
}

/// `POST /override`: sets or clears an override for one game, depending on
/// `is_overridden`. 404 if `game_id` isn't on the loaded schedule.
pub async fn post_override(State(state): State<AppState>, Json(request): Json<SetOverrideRequest>) -> Result<Json<OkResponse>, Error> {
	let known = state.schedule.read().await.iter().any(|g| g.id == request.game_id);
	if !known {
		return Err(Error::NotFound(format!("unknown game id: {}", request.game_id)));
	}

	if !request.is_overridden {
		state.overrides.clear(&request.game_id).await?;
		return Ok(Json(OkResponse { ok: true }));
	}

	let (home_score, away_score) = match (request.home_score, request.away_score) {
		(Some(home), Some(away)) => (home, away),
		_ => return Err(Error::validation("home_score", "home_score and away_score are both required when is_overridden is true")),
	};

	state.overrides.set(&request.game_id, home_score, away_score, chrono::Utc::now()).await?;
	Ok(Json(OkResponse { ok: true }))
}

/// `DELETE /override/{game_id}`: explicit clear, complementing `POST
/// /override`'s `is_overridden: false` path with an idempotent removal.
pub async fn delete_override(State(state): State<AppState>, Path(game_id): Path<String>) -> Result<Json<OkResponse>, Error> {
	let existed = state.overrides.clear(&game_id).await?;
	if !existed {
		return Err(Error::NotFound(format!("no override set for game id: {game_id}")));
	}
	Ok(Json(OkResponse { ok: true }))
}
