use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// The HTTP crate's own error type. Every internal crate (`nfl_sim_core`,
/// `nfl_sim_jobs`, `nfl_sim_overrides`) returns its own `thiserror` error;
/// this is the single place those get mapped onto a status code and body.
#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("{message}")]
	Validation { field: String, message: String },

	#[error("a simulation job is already active")]
	Conflict,

	#[error("{0}")]
	NotFound(String),

	#[error("an internal server error occurred")]
	Internal(#[from] anyhow::Error),
}

impl Error {
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation {
			field: field.into(),
			message: message.into(),
		}
	}

	const fn status_code(&self) -> StatusCode {
		match self {
			Self::Validation { .. } => StatusCode::BAD_REQUEST,
			Self::Conflict => StatusCode::CONFLICT,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[derive(Serialize)]
struct ErrorBody {
	error: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	field: Option<String>,
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		if let Self::Internal(ref e) = self {
			tracing::error!(error = %e, "internal server error");
		}

		let field = match &self {
			Self::Validation { field, .. } => Some(field.clone()),
			_ => None,
		};

		(self.status_code(), Json(ErrorBody { error: self.to_string(), field })).into_response()
	}
}

impl From<nfl_sim_core::Error> for Error {
	fn from(e: nfl_sim_core::Error) -> Self {
		match e {
			nfl_sim_core::Error::UnknownTeam(id) => Self::NotFound(format!("unknown team id: {id}")),
			nfl_sim_core::Error::UnknownGame(id) => Self::NotFound(format!("unknown game id: {id}")),
			nfl_sim_core::Error::InvalidTrialCount(n) => Self::validation("num_simulations", format!("must be between 1 and 1_000_000, got {n}")),
			nfl_sim_core::Error::InvalidGame { id, reason } => Self::validation("game", format!("{id}: {reason}")),
			nfl_sim_core::Error::Cancelled | nfl_sim_core::Error::Internal(_) => Self::Internal(anyhow::anyhow!(e)),
		}
	}
}

impl From<nfl_sim_jobs::Error> for Error {
	fn from(e: nfl_sim_jobs::Error) -> Self {
		match e {
			nfl_sim_jobs::Error::InvalidTrialCount(n) => Self::validation("num_simulations", format!("must be between 1 and 1_000_000, got {n}")),
			nfl_sim_jobs::Error::Conflict => Self::Conflict,
			nfl_sim_jobs::Error::NotFound(id) => Self::NotFound(format!("unknown job id: {id}")),
		}
	}
}

impl From<nfl_sim_overrides::Error> for Error {
	fn from(e: nfl_sim_overrides::Error) -> Self {
		Self::Internal(anyhow::anyhow!(e))
	}
}
