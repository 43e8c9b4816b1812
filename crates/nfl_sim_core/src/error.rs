use thiserror::Error;

/// Errors shared by the domain model, standings calculator, tiebreaker engine
/// and playoff seeder. HTTP-facing crates wrap this in their own error type
/// rather than depending on axum from here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	#[error("unknown team id: {0}")]
	UnknownTeam(String),

	#[error("unknown game id: {0}")]
	UnknownGame(String),

	#[error("invalid game {id}: {reason}")]
	InvalidGame { id: String, reason: String },

	#[error("num_simulations must be between 1 and 1_000_000, got {0}")]
	InvalidTrialCount(u32),

	#[error("simulation was cancelled")]
	Cancelled,

	#[error("internal simulation error: {0}")]
	Internal(String),
}
