use thiserror::Error;

/// Errors the job orchestrator raises at its own boundary. HTTP-facing
/// crates map this to a status code rather than depending on axum from here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("num_simulations must be between 1 and 1_000_000, got {0}")]
	InvalidTrialCount(u32),

	#[error("a simulation job is already active")]
	Conflict,

	#[error("unknown job id: {0}")]
	NotFound(String),
}
