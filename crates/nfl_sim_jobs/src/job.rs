use nfl_sim_core::SimulationResult;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// The job state machine: `Pending -> Running -> {Completed, Cancelled,
/// Error}`. Terminal states are sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
	Pending,
	Running,
	Completed,
	Cancelled,
	Error,
}

impl JobState {
	#[must_use]
	pub const fn is_terminal(self) -> bool {
		matches!(self, Self::Completed | Self::Cancelled | Self::Error)
	}
}

/// A client-facing snapshot of one simulation job. `result` is present iff
/// `state == Completed`; `error` is present iff `state == Error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
	pub id: String,
	pub state: JobState,
	pub progress: u8,
	pub num_simulations: u32,
	pub seed: Option<u64>,
	pub result: Option<SimulationResult>,
	pub error: Option<String>,
}

/// Registry-internal bookkeeping that rides alongside the public `Job`
/// snapshot: the cancellation token the worker observes, and the instant it
/// went terminal (used by the reaper to enforce the job TTL).
pub(crate) struct JobRecord {
	pub job: Job,
	pub cancel_token: CancellationToken,
	pub finished_at: Option<Instant>,
}
