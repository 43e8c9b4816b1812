use crate::config::Config;
use nfl_sim_core::{Game, TeamRoster};
use nfl_sim_jobs::JobRegistry;
use nfl_sim_overrides::OverrideStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The synthesis point: the only place that knows about HTTP, file paths
/// and process configuration. `schedule` is the raw on-disk snapshot;
/// handlers fold the override store onto it on read.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<Config>,
	pub roster: Arc<TeamRoster>,
	pub schedule: Arc<RwLock<Vec<Game>>>,
	pub overrides: Arc<OverrideStore>,
	pub jobs: JobRegistry,
}

impl AppState {
	/// The schedule with every persisted override stamped on, the shape
	/// every read-only route serves.
	pub async fn effective_schedule(&self) -> Vec<Game> {
		let games = self.schedule.read().await.clone();
		self.overrides.apply(&games).await
	}
}
