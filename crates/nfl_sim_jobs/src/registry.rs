//! The job orchestrator: single-flight lifecycle, progress reporting and
//! cooperative cancellation for one simulation at a time. Transport-agnostic
//! -- the HTTP crate only calls `start`, `get` and `cancel`.

use crate::error::Error;
use crate::job::{Job, JobRecord, JobState};
use dashmap::DashMap;
use nfl_sim_core::{CancelFlag, Game, SimulationResult, TeamRoster};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared handle to the job registry. Cheap to clone -- every clone points
/// at the same underlying state (an `Arc`), matching the pack's
/// `ManagedOrchestrator` / `StreamOrchestrator` handle pattern.
#[derive(Clone)]
pub struct JobRegistry {
	inner: Arc<Inner>,
}

struct Inner {
	jobs: DashMap<String, JobRecord>,
	active: Mutex<Option<String>>,
	ttl: Duration,
	worker_threads_override: Option<usize>,
}

impl JobRegistry {
	/// `ttl` is how long a terminal job is kept around before `reap` discards
	/// it; configured via `JOB_TTL_SECS`, one hour by default.
	#[must_use]
	pub fn new(ttl: Duration) -> Self {
		Self::with_worker_threads(ttl, None)
	}

	/// As `new`, but every job this registry spawns uses `worker_threads`
	/// worker threads instead of `min(num_simulations / 1000, available
	/// cores)`, mirroring the server's `SIM_WORKER_THREADS` override.
	#[must_use]
	pub fn with_worker_threads(ttl: Duration, worker_threads: Option<usize>) -> Self {
		Self {
			inner: Arc::new(Inner {
				jobs: DashMap::new(),
				active: Mutex::new(None),
				ttl,
				worker_threads_override: worker_threads,
			}),
		}
	}

	/// Registers a new job and spawns its worker task, honoring the
	/// single-flight invariant: fails with `Error::Conflict` if any job is
	/// currently `Pending` or `Running`. `roster` is the immutable team
	/// snapshot the worker treats as read-only for the job's lifetime.
	pub fn start(&self, games: Vec<Game>, roster: Arc<TeamRoster>, num_simulations: u32, seed: Option<u64>) -> Result<Job, Error> {
		if !(nfl_sim_montecarlo::MIN_TRIALS..=nfl_sim_montecarlo::MAX_TRIALS).contains(&num_simulations) {
			return Err(Error::InvalidTrialCount(num_simulations));
		}

		let mut active = self.inner.active.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
		if let Some(active_id) = active.as_deref() {
			let still_active = self.inner.jobs.get(active_id).is_some_and(|record| !record.job.state.is_terminal());
			if still_active {
				return Err(Error::Conflict);
			}
		}

		let id = Uuid::new_v4().to_string();
		let cancel_token = CancellationToken::new();
		let job = Job {
			id: id.clone(),
			state: JobState::Pending,
			progress: 0,
			num_simulations,
			seed,
			result: None,
			error: None,
		};

		self.inner.jobs.insert(
			id.clone(),
			JobRecord {
				job: job.clone(),
				cancel_token: cancel_token.clone(),
				finished_at: None,
			},
		);
		*active = Some(id.clone());
		drop(active);

		info!(job_id = %id, num_simulations, "starting simulation job");
		self.spawn_worker(id, games, roster, num_simulations, seed, cancel_token);

		Ok(job)
	}

	/// A snapshot of the current job state. Tolerates terminal jobs until
	/// they're reaped.
	pub fn get(&self, id: &str) -> Result<Job, Error> {
		self.reap_expired();
		self.inner.jobs.get(id).map(|record| record.job.clone()).ok_or_else(|| Error::NotFound(id.to_string()))
	}

	/// Idempotent: sets the job's cancellation token. The worker transitions
	/// to `Cancelled` as soon as it observes the token, which may lag this
	/// call by up to one progress-tick interval -- so the returned snapshot
	/// may still read `Pending`/`Running`.
	pub fn cancel(&self, id: &str) -> Result<Job, Error> {
		let record = self.inner.jobs.get(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
		if !record.job.state.is_terminal() {
			record.cancel_token.cancel();
		}
		Ok(record.job.clone())
	}

	fn spawn_worker(&self, id: String, games: Vec<Game>, roster: Arc<TeamRoster>, num_simulations: u32, seed: Option<u64>, cancel_token: CancellationToken) {
		let registry = self.clone();
		tokio::spawn(async move {
			registry.set_state(&id, JobState::Running);

			let cancel_flag = CancelFlag::new();
			let watcher_token = cancel_token.clone();
			let watcher_flag = cancel_flag.clone();
			let watcher = tokio::spawn(async move {
				watcher_token.cancelled().await;
				watcher_flag.cancel();
			});

			let registry_for_progress = registry.clone();
			let id_for_progress = id.clone();
			let worker_threads_override = registry.inner.worker_threads_override;

			let outcome = tokio::task::spawn_blocking(move || {
				let progress = move |percent: u8| registry_for_progress.set_progress(&id_for_progress, percent);
				nfl_sim_montecarlo::simulate_with_threads(&games, &roster, num_simulations, seed, worker_threads_override, &progress, &cancel_flag)
			})
			.await;

			watcher.abort();

			match outcome {
				Ok(Ok(result)) => registry.complete(&id, result),
				Ok(Err(nfl_sim_core::Error::Cancelled)) => {
					info!(job_id = %id, "simulation job cancelled");
					registry.set_state(&id, JobState::Cancelled);
				}
				Ok(Err(e)) => {
					warn!(job_id = %id, error = %e, "simulation job failed");
					registry.fail(&id, e.to_string());
				}
				Err(join_err) => {
					warn!(job_id = %id, error = %join_err, "simulation worker task panicked");
					registry.fail(&id, format!("simulation worker task panicked: {join_err}"));
				}
			}
		});
	}

	fn set_state(&self, id: &str, state: JobState) {
		if let Some(mut record) = self.inner.jobs.get_mut(id) {
			record.job.state = state;
			if state.is_terminal() {
				record.finished_at = Some(Instant::now());
			}
		}
	}

	fn set_progress(&self, id: &str, percent: u8) {
		if let Some(mut record) = self.inner.jobs.get_mut(id) {
			if !record.job.state.is_terminal() {
				record.job.progress = percent;
			}
		}
	}

	fn complete(&self, id: &str, result: SimulationResult) {
		if let Some(mut record) = self.inner.jobs.get_mut(id) {
			record.job.state = JobState::Completed;
			record.job.progress = 100;
			record.job.result = Some(result);
			record.finished_at = Some(Instant::now());
		}
	}

	fn fail(&self, id: &str, message: String) {
		if let Some(mut record) = self.inner.jobs.get_mut(id) {
			record.job.state = JobState::Error;
			record.job.error = Some(message);
			record.finished_at = Some(Instant::now());
		}
	}

	fn reap_expired(&self) {
		let ttl = self.inner.ttl;
		self.inner.jobs.retain(|_, record| !record.job.state.is_terminal() || record.finished_at.map_or(true, |t| t.elapsed() < ttl));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nfl_sim_core::{Conference, Division, Team};
	use std::time::Duration as StdDuration;

	fn sample_roster() -> Arc<TeamRoster> {
		let mut teams = Vec::with_capacity(32);
		let mut n = 0;
		for conference in Conference::ALL {
			for division in Division::ALL {
				for _ in 0..4 {
					teams.push(Team {
						id: format!("t{n}"),
						name: format!("Team {n}"),
						abbreviation: format!("T{n}"),
						conference,
						division,
					});
					n += 1;
				}
			}
		}
		Arc::new(TeamRoster::new(teams).expect("sample roster is valid"))
	}

	fn empty_schedule(roster: &TeamRoster) -> Vec<Game> {
		let teams = roster.teams().to_vec();
		let mut games = Vec::new();
		for (i, home) in teams.iter().enumerate() {
			for away in &teams[i + 1..] {
				games.push(Game {
					id: format!("{}-{}", home.id, away.id),
					week: 1,
					home_team: home.id.clone(),
					away_team: away.id.clone(),
					home_score: None,
					away_score: None,
					is_completed: false,
					override_home_score: None,
					override_away_score: None,
					is_overridden: false,
				});
			}
		}
		games
	}

	#[test]
	fn rejects_trial_count_out_of_range() {
		let registry = JobRegistry::new(StdDuration::from_secs(3600));
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		assert_eq!(registry.start(games, roster, 0, None), Err(Error::InvalidTrialCount(0)));
	}

	#[tokio::test]
	async fn second_start_conflicts_while_first_is_active() {
		let registry = JobRegistry::new(StdDuration::from_secs(3600));
		let roster = sample_roster();
		let games = empty_schedule(&roster);

		let first = registry.start(games.clone(), roster.clone(), 200_000, Some(1)).unwrap();
		assert_eq!(first.state, JobState::Pending);

		let second = registry.start(games, roster, 1_000, Some(2));
		assert_eq!(second, Err(Error::Conflict));

		registry.cancel(&first.id).unwrap();
	}

	#[tokio::test]
	async fn cancel_is_idempotent_and_job_reaches_cancelled() {
		let registry = JobRegistry::new(StdDuration::from_secs(3600));
		let roster = sample_roster();
		let games = empty_schedule(&roster);

		let job = registry.start(games, roster, 500_000, Some(3)).unwrap();
		registry.cancel(&job.id).unwrap();
		registry.cancel(&job.id).unwrap();

		let mut observed = registry.get(&job.id).unwrap();
		for _ in 0..200 {
			if observed.state.is_terminal() {
				break;
			}
			tokio::time::sleep(StdDuration::from_millis(10)).await;
			observed = registry.get(&job.id).unwrap();
		}
		assert_eq!(observed.state, JobState::Cancelled);
		assert!(observed.result.is_none());
	}

	#[tokio::test]
	async fn get_on_unknown_job_is_not_found() {
		let registry = JobRegistry::new(StdDuration::from_secs(3600));
		assert_eq!(registry.get("missing"), Err(Error::NotFound("missing".to_string())));
	}

	#[tokio::test]
	async fn small_job_completes_and_frees_the_single_flight_slot() {
		let registry = JobRegistry::new(StdDuration::from_secs(3600));
		let roster = sample_roster();
		let games = empty_schedule(&roster);

		let job = registry.start(games.clone(), roster.clone(), 50, Some(9)).unwrap();

		let mut observed = registry.get(&job.id).unwrap();
		for _ in 0..200 {
			if observed.state.is_terminal() {
				break;
			}
			tokio::time::sleep(StdDuration::from_millis(10)).await;
			observed = registry.get(&job.id).unwrap();
		}
		assert_eq!(observed.state, JobState::Completed);
		assert!(observed.result.is_some());

		let next = registry.start(games, roster, 50, Some(10));
		assert!(next.is_ok());
	}
}
