use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted override: a user-supplied substitute score for a game,
/// stamped with when it was set. The wire/disk shape matches
/// `user_overrides.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
	pub home_score: u16,
	pub away_score: u16,
	pub set_at: DateTime<Utc>,
}
