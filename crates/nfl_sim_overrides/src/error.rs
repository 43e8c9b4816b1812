use thiserror::Error;

/// Errors raised by the override store itself. Unknown-game-id validation
/// lives at the HTTP boundary, which has the schedule snapshot needed to
/// check an id -- the store only knows about persisted entries.
#[derive(Error, Debug)]
pub enum Error {
	#[error("failed to read or write override store at {path}: {source}")]
	Io { path: String, source: std::io::Error },

	#[error("malformed override store contents: {0}")]
	Serde(#[from] serde_json::Error),
}
