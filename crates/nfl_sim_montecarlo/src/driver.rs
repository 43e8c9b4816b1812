//! The Monte Carlo driver: the `simulate` entry point. Partitions
//! `num_trials` across worker threads, runs one complete simulated season
//! per trial on each, and merges the per-worker counters into a single
//! `SimulationResult`.

use crate::counters::WorkerCounters;
use crate::scoring::score_distribution;
use crate::trial::run_trial;
use nfl_sim_core::{fixed_outcomes, resolve_schedule, unresolved_games, CancelFlag, Error, Game, SimulationResult, TeamRoster};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::time::Instant;

pub const MIN_TRIALS: u32 = 1;
pub const MAX_TRIALS: u32 = 1_000_000;

/// Called with a percentage in `[0, 100]`, non-decreasing across the life of
/// one `simulate` call. May be invoked concurrently from multiple worker
/// threads; implementations must be `Sync`.
pub trait ProgressCallback: Sync {
	fn report(&self, percent_complete: u8);
}

impl<F: Fn(u8) + Sync> ProgressCallback for F {
	fn report(&self, percent_complete: u8) {
		self(percent_complete);
	}
}

/// `min(num_trials / 1000, available)`, floored at 1 so a small trial count
/// still gets a worker.
#[must_use]
pub fn worker_thread_count(num_trials: u32, available: usize) -> usize {
	let by_trial_count = (num_trials as usize / 1000).max(1);
	by_trial_count.min(available.max(1))
}

/// Split `num_trials` into `workers` near-even shares; the first
/// `num_trials % workers` shares get one extra trial.
fn split_trials(num_trials: u32, workers: usize) -> Vec<u32> {
	let base = num_trials / workers as u32;
	let remainder = num_trials % workers as u32;
	(0..workers).map(|i| base + u32::from(i < remainder as usize)).collect()
}

fn random_seed() -> u64 {
	rand::thread_rng().next_u64()
}

/// Runs `num_trials` independent seasons, splitting them across worker
/// threads, and returns the aggregated probabilities.
///
/// # Errors
/// Returns `Error::InvalidTrialCount` if `num_trials` is outside
/// `[1, 1_000_000]`, propagates `resolve_schedule`'s validation errors, and
/// returns `Error::Cancelled` if `cancel` is observed set before every
/// requested trial completes.
pub fn simulate(games: &[Game], roster: &TeamRoster, num_trials: u32, seed: Option<u64>, progress: &dyn ProgressCallback, cancel: &CancelFlag) -> Result<SimulationResult, Error> {
	simulate_with_threads(games, roster, num_trials, seed, None, progress, cancel)
}

/// As `simulate`, but `worker_threads_override` (when set) replaces the
/// `min(num_trials / 1000, available cores)` default -- the `SIM_WORKER_THREADS`
/// config knob's only effect.
pub fn simulate_with_threads(
	games: &[Game],
	roster: &TeamRoster,
	num_trials: u32,
	seed: Option<u64>,
	worker_threads_override: Option<usize>,
	progress: &dyn ProgressCallback,
	cancel: &CancelFlag,
) -> Result<SimulationResult, Error> {
	if !(MIN_TRIALS..=MAX_TRIALS).contains(&num_trials) {
		return Err(Error::InvalidTrialCount(num_trials));
	}

	let resolved = resolve_schedule(games, roster)?;
	let fixed = fixed_outcomes(&resolved);
	let unresolved = unresolved_games(&resolved);

	let seed = seed.unwrap_or_else(random_seed);
	let available = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
	let threads = worker_threads_override.unwrap_or_else(|| worker_thread_count(num_trials, available)).max(1);
	let shares = split_trials(num_trials, threads);

	let started = Instant::now();
	let completed_trials = AtomicU32::new(0);
	let last_reported_percent = AtomicU8::new(0);
	let cancelled = std::sync::atomic::AtomicBool::new(false);

	let mut total = WorkerCounters::new(roster.len());

	std::thread::scope(|scope| -> Result<(), Error> {
		let mut handles = Vec::with_capacity(threads);

		for (worker_index, &trial_count) in shares.iter().enumerate() {
			if trial_count == 0 {
				continue;
			}
			let completed_trials = &completed_trials;
			let last_reported_percent = &last_reported_percent;
			let cancelled = &cancelled;
			let unresolved = &unresolved;
			let fixed = &fixed;
			let roster = roster;

			handles.push(scope.spawn(move || -> Result<WorkerCounters, Error> {
				let mut rng = StdRng::seed_from_u64(seed ^ worker_index as u64);
				let poisson = score_distribution();
				let mut counters = WorkerCounters::new(roster.len());

				for _ in 0..trial_count {
					if cancel.is_cancelled() {
						cancelled.store(true, Ordering::Relaxed);
						return Err(Error::Cancelled);
					}

					run_trial(unresolved, fixed, roster, &poisson, &mut rng, &mut counters);

					let done = completed_trials.fetch_add(1, Ordering::Relaxed) + 1;
					report_progress(done, num_trials, last_reported_percent, progress);
				}
				Ok(counters)
			}));
		}

		let mut first_err = None;
		for handle in handles {
			match handle.join() {
				Ok(Ok(counters)) => total.merge(&counters),
				Ok(Err(e)) if first_err.is_none() => first_err = Some(e),
				Ok(Err(_)) => {}
				Err(_) if first_err.is_none() => first_err = Some(Error::Internal("simulation worker thread panicked".into())),
				Err(_) => {}
			}
		}
		first_err.map_or(Ok(()), Err)
	})?;

	Ok(total.into_result(roster, started.elapsed()))
}

fn report_progress(done: u32, total: u32, last_reported_percent: &AtomicU8, progress: &dyn ProgressCallback) {
	let percent = u8::try_from((u64::from(done) * 100) / u64::from(total.max(1))).unwrap_or(100).min(100);
	let mut prev = last_reported_percent.load(Ordering::Relaxed);
	while percent > prev {
		match last_reported_percent.compare_exchange_weak(prev, percent, Ordering::Relaxed, Ordering::Relaxed) {
			Ok(_) => {
				progress.report(percent);
				break;
			}
			Err(actual) => prev = actual,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nfl_sim_core::{Conference, Division, Team};
	use std::sync::atomic::AtomicUsize;
	use std::sync::Mutex;

	fn sample_roster() -> TeamRoster {
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
		TeamRoster::new(teams).expect("sample roster is valid")
	}

	fn empty_schedule(roster: &TeamRoster) -> Vec<Game> {
		let teams: Vec<_> = roster.teams().to_vec();
		let mut games = Vec::new();
		let mut week = 1u8;
		for (i, home) in teams.iter().enumerate() {
			for away in &teams[i + 1..] {
				games.push(Game {
					id: format!("{}-{}", home.id, away.id),
					week,
					home_team: home.id.clone(),
					away_team: away.id.clone(),
					home_score: None,
					away_score: None,
					is_completed: false,
					override_home_score: None,
					override_away_score: None,
					is_overridden: false,
				});
				week = week % 18 + 1;
			}
		}
		games
	}

	#[test]
	fn rejects_out_of_range_trial_counts() {
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		let noop = |_: u8| {};
		let cancel = CancelFlag::new();
		assert!(matches!(simulate(&games, &roster, 0, Some(1), &noop, &cancel), Err(Error::InvalidTrialCount(0))));
		assert!(matches!(simulate(&games, &roster, 1_000_001, Some(1), &noop, &cancel), Err(Error::InvalidTrialCount(1_000_001))));
	}

	#[test]
	fn same_seed_is_deterministic() {
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		let noop = |_: u8| {};
		let cancel = CancelFlag::new();
		let a = simulate(&games, &roster, 500, Some(42), &noop, &cancel).unwrap();
		let b = simulate(&games, &roster, 500, Some(42), &noop, &cancel).unwrap();
		for (ta, tb) in a.teams.iter().zip(b.teams.iter()) {
			assert!((ta.playoff_probability - tb.playoff_probability).abs() < f64::EPSILON);
			assert!((ta.average_wins - tb.average_wins).abs() < f64::EPSILON);
		}
	}

	#[test]
	fn probabilities_sum_to_one_per_seed_per_conference() {
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		let noop = |_: u8| {};
		let cancel = CancelFlag::new();
		let result = simulate(&games, &roster, 2_000, Some(7), &noop, &cancel).unwrap();

		for conference in nfl_sim_core::Conference::ALL {
			for seed_idx in 0..7 {
				let total: f64 = result
					.teams
					.iter()
					.filter(|t| roster.team(roster.index_of(&t.team_id).unwrap()).conference == conference)
					.map(|t| t.seed_probabilities[seed_idx])
					.sum();
				assert!((total - 1.0).abs() < 1e-9, "seed {seed_idx} conference {conference:?} summed to {total}");
			}
		}
	}

	#[test]
	fn cancellation_before_any_trial_yields_cancelled_error() {
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		let noop = |_: u8| {};
		let cancel = CancelFlag::new();
		cancel.cancel();
		assert!(matches!(simulate(&games, &roster, 10_000, Some(1), &noop, &cancel), Err(Error::Cancelled)));
	}

	#[test]
	fn progress_is_observed_and_non_decreasing() {
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		let seen = Mutex::new(Vec::new());
		let callback = |p: u8| seen.lock().unwrap().push(p);
		let cancel = CancelFlag::new();
		simulate(&games, &roster, 5_000, Some(3), &callback, &cancel).unwrap();
		let seen = seen.lock().unwrap();
		assert!(!seen.is_empty());
		assert!(seen.windows(2).all(|w| w[0] <= w[1]));
		assert_eq!(*seen.last().unwrap(), 100);
	}

	#[test]
	fn worker_thread_count_floors_at_one() {
		assert_eq!(worker_thread_count(10, 16), 1);
		assert_eq!(worker_thread_count(100_000, 4), 4);
		let _ = AtomicUsize::new(0);
	}

	#[test]
	fn worker_threads_override_is_honored() {
		let roster = sample_roster();
		let games = empty_schedule(&roster);
		let noop = |_: u8| {};
		let cancel = CancelFlag::new();
		// A single worker thread must still produce a fully aggregated result.
		let result = simulate_with_threads(&games, &roster, 300, Some(5), Some(1), &noop, &cancel).unwrap();
		assert_eq!(result.num_trials, 300);
	}
}
