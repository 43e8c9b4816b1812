use nfl_sim_core::{SimulationResult, TeamRoster, TeamSimulationStats};
use std::time::Duration;

/// Per-team accumulators for one worker's share of the trials. Kept as
/// dense, fixed-size arrays so a trial's inner loop never allocates.
#[derive(Debug, Clone)]
pub struct WorkerCounters {
	pub trials_run: u64,
	pub wins_sum: Vec<f64>,
	/// `seed_counts[team][seed - 1]`.
	pub seed_counts: Vec<[u64; 7]>,
	pub division_win_count: Vec<u64>,
	pub first_seed_count: Vec<u64>,
}

impl WorkerCounters {
	#[must_use]
	pub fn new(num_teams: usize) -> Self {
		Self {
			trials_run: 0,
			wins_sum: vec![0.0; num_teams],
			seed_counts: vec![[0u64; 7]; num_teams],
			division_win_count: vec![0; num_teams],
			first_seed_count: vec![0; num_teams],
		}
	}

	pub fn merge(&mut self, other: &Self) {
		self.trials_run += other.trials_run;
		for i in 0..self.wins_sum.len() {
			self.wins_sum[i] += other.wins_sum[i];
			self.division_win_count[i] += other.division_win_count[i];
			self.first_seed_count[i] += other.first_seed_count[i];
			for s in 0..7 {
				self.seed_counts[i][s] += other.seed_counts[i][s];
			}
		}
	}

	#[must_use]
	pub fn into_result(self, roster: &TeamRoster, duration: Duration) -> SimulationResult {
		let n = self.trials_run.max(1) as f64;
		let teams = roster
			.teams()
			.iter()
			.enumerate()
			.map(|(idx, team)| {
				let seed_counts = self.seed_counts[idx];
				let playoff_trials: u64 = seed_counts.iter().sum();
				let mut seed_probabilities = [0.0; 7];
				for (s, &count) in seed_counts.iter().enumerate() {
					seed_probabilities[s] = count as f64 / n;
				}
				TeamSimulationStats {
					team_id: team.id.clone(),
					average_wins: self.wins_sum[idx] / n,
					playoff_probability: playoff_trials as f64 / n,
					division_win_probability: self.division_win_count[idx] as f64 / n,
					first_seed_probability: self.first_seed_count[idx] as f64 / n,
					seed_probabilities,
				}
			})
			.collect();

		SimulationResult {
			num_trials: self.trials_run as u32,
			duration,
			teams,
		}
	}
}
