//! The Monte Carlo driver: runs N independent simulated seasons over a
//! schedule snapshot and aggregates per-team playoff probabilities. Depends
//! only on `nfl_sim_core` -- nothing here knows about HTTP, the cache
//! directory, or job lifecycles.

mod counters;
mod driver;
mod scoring;
mod trial;

pub use counters::WorkerCounters;
pub use driver::{simulate, simulate_with_threads, worker_thread_count, ProgressCallback, MAX_TRIALS, MIN_TRIALS};
pub use scoring::{score_distribution, SCORE_LAMBDA};
