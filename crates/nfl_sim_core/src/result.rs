use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Empirical per-team outcome across every trial of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSimulationStats {
	pub team_id: String,
	pub average_wins: f64,
	pub playoff_probability: f64,
	pub division_win_probability: f64,
	pub first_seed_probability: f64,
	/// Index 0 is the probability of the #1 seed, index 6 the #7 seed.
	pub seed_probabilities: [f64; 7],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
	pub num_trials: u32,
	#[serde(with = "duration_millis")]
	pub duration: Duration,
	pub teams: Vec<TeamSimulationStats>,
}

mod duration_millis {
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use std::time::Duration;

	pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		(duration.as_millis() as u64).serialize(serializer)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		let millis = u64::deserialize(deserializer)?;
		Ok(Duration::from_millis(millis))
	}
}
