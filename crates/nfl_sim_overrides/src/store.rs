//! The override store: a persistent game id -> substitute-outcome mapping,
//! applied as a pre-simulation transform on the schedule.

use crate::entry::OverrideEntry;
use crate::error::Error;
use chrono::{DateTime, Utc};
use nfl_sim_core::Game;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Read-mostly, file-backed override table. One store per cache directory;
/// cloning is not supported -- wrap in `Arc` to share across handlers.
pub struct OverrideStore {
	path: PathBuf,
	entries: RwLock<HashMap<String, OverrideEntry>>,
}

impl OverrideStore {
	/// Loads `user_overrides.json` from `path`, treating a missing file as
	/// an empty store (first run).
	pub async fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
		let path = path.into();
		let entries = match tokio::fs::read(&path).await {
			Ok(bytes) => serde_json::from_slice(&bytes)?,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
			Err(source) => return Err(Error::Io { path: path.display().to_string(), source }),
		};
		Ok(Self { path, entries: RwLock::new(entries) })
	}

	/// Sets (or idempotently re-sets) the override for `game_id`. Setting an
	/// override to the value already present leaves the persisted `set_at`
	/// untouched.
	pub async fn set(&self, game_id: &str, home_score: u16, away_score: u16, now: DateTime<Utc>) -> Result<(), Error> {
		let mut entries = self.entries.write().await;
		let unchanged = entries.get(game_id).is_some_and(|e| e.home_score == home_score && e.away_score == away_score);
		if !unchanged {
			entries.insert(game_id.to_string(), OverrideEntry { home_score, away_score, set_at: now });
		}
		self.persist(&entries).await
	}

	/// Removes the override for `game_id`, if any. Returns whether an entry
	/// was actually present.
	pub async fn clear(&self, game_id: &str) -> Result<bool, Error> {
		let mut entries = self.entries.write().await;
		let existed = entries.remove(game_id).is_some();
		if existed {
			self.persist(&entries).await?;
		}
		Ok(existed)
	}

	pub async fn get(&self, game_id: &str) -> Option<OverrideEntry> {
		self.entries.read().await.get(game_id).copied()
	}

	#[must_use]
	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	/// Stamps every persisted override onto a copy of `games`. Per the
	/// refresh conflict policy, the actual score (if any) is left in place
	/// alongside the override -- both remain visible on the returned game,
	/// and `Game::effective_score` resolves the override as authoritative.
	pub async fn apply(&self, games: &[Game]) -> Vec<Game> {
		let entries = self.entries.read().await;
		games
			.iter()
			.cloned()
			.map(|mut game| {
				if let Some(entry) = entries.get(&game.id) {
					game.override_home_score = Some(entry.home_score);
					game.override_away_score = Some(entry.away_score);
					game.is_overridden = true;
				}
				game
			})
			.collect()
	}

	async fn persist(&self, entries: &HashMap<String, OverrideEntry>) -> Result<(), Error> {
		let json = serde_json::to_vec_pretty(entries)?;
		let tmp_path = self.path.with_extension("json.tmp");
		tokio::fs::write(&tmp_path, &json).await.map_err(|source| Error::Io {
			path: tmp_path.display().to_string(),
			source,
		})?;
		tokio::fs::rename(&tmp_path, &self.path).await.map_err(|source| Error::Io {
			path: self.path.display().to_string(),
			source,
		})?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nfl_sim_core::Game;

	fn game(id: &str) -> Game {
		Game {
			id: id.to_string(),
			week: 1,
			home_team: "kc".to_string(),
			away_team: "den".to_string(),
			home_score: None,
			away_score: None,
			is_completed: false,
			override_home_score: None,
			override_away_score: None,
			is_overridden: false,
		}
	}

	#[tokio::test]
	async fn missing_file_loads_as_empty() {
		let dir = tempfile::tempdir().unwrap();
		let store = OverrideStore::load(dir.path().join("user_overrides.json")).await.unwrap();
		assert_eq!(store.len().await, 0);
	}

	#[tokio::test]
	async fn set_then_apply_stamps_the_schedule() {
		let dir = tempfile::tempdir().unwrap();
		let store = OverrideStore::load(dir.path().join("user_overrides.json")).await.unwrap();
		store.set("g1", 24, 17, Utc::now()).await.unwrap();

		let games = vec![game("g1"), game("g2")];
		let applied = store.apply(&games).await;
		assert!(applied[0].is_overridden);
		assert_eq!(applied[0].effective_score(), Some((24, 17)));
		assert!(!applied[1].is_overridden);
	}

	#[tokio::test]
	async fn setting_the_same_value_is_a_no_op_on_set_at() {
		let dir = tempfile::tempdir().unwrap();
		let store = OverrideStore::load(dir.path().join("user_overrides.json")).await.unwrap();
		let first_time = Utc::now();
		store.set("g1", 24, 17, first_time).await.unwrap();
		store.set("g1", 24, 17, first_time + chrono::Duration::hours(1)).await.unwrap();

		let entry = store.get("g1").await.unwrap();
		assert_eq!(entry.set_at, first_time);
	}

	#[tokio::test]
	async fn clear_removes_the_override() {
		let dir = tempfile::tempdir().unwrap();
		let store = OverrideStore::load(dir.path().join("user_overrides.json")).await.unwrap();
		store.set("g1", 24, 17, Utc::now()).await.unwrap();
		assert!(store.clear("g1").await.unwrap());
		assert!(!store.clear("g1").await.unwrap());
		assert!(store.get("g1").await.is_none());
	}

	#[tokio::test]
	async fn reload_round_trips_through_disk() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("user_overrides.json");
		{
			let store = OverrideStore::load(&path).await.unwrap();
			store.set("g1", 10, 9, Utc::now()).await.unwrap();
		}
		let reloaded = OverrideStore::load(&path).await.unwrap();
		assert_eq!(reloaded.len().await, 1);
		assert_eq!(reloaded.get("g1").await.unwrap().home_score, 10);
	}
}
