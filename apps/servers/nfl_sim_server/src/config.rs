use clap::Parser;
use std::path::PathBuf;

/// Process configuration: a single `clap::Parser` struct with `env`
/// fallbacks, parsed once at startup. `CACHE_DIRECTORY`, `LOG_LEVEL` and
/// `PORT` cover the transport surface; the rest are tunables for the
/// simulation engine itself.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "NFL season Monte Carlo simulator HTTP server", long_about = None)]
pub struct Config {
	#[arg(long, env = "CACHE_DIRECTORY", default_value = "./cache")]
	pub cache_directory: PathBuf,

	#[arg(long, env = "LOG_LEVEL", default_value = "info")]
	pub log_level: String,

	#[arg(long, env = "PORT", default_value = "8080")]
	pub port: u16,

	/// Overrides `min(num_simulations / 1000, available cores)` when set.
	#[arg(long, env = "SIM_WORKER_THREADS")]
	pub sim_worker_threads: Option<usize>,

	#[arg(long, env = "JOB_TTL_SECS", default_value = "3600")]
	pub job_ttl_secs: u64,

	/// Which `schedule_<season>.json` to load. Defaults to the current
	/// calendar year at startup.
	#[arg(long, env = "SEASON")]
	pub season: Option<u16>,
}

impl Config {
	#[must_use]
	pub fn resolved_season(&self) -> u16 {
		self.season.unwrap_or_else(|| {
			u16::try_from(chrono::Utc::now().format("%Y").to_string().parse::<i64>().unwrap_or(2024)).unwrap_or(2024)
		})
	}

	#[must_use]
	pub fn job_ttl(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.job_ttl_secs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_defaults_with_no_args() {
		let config = Config::parse_from(["nfl_sim_server"]);
		assert_eq!(config.port, 8080);
		assert_eq!(config.log_level, "info");
		assert_eq!(config.job_ttl_secs, 3600);
		assert!(config.season.is_none());
	}

	#[test]
	fn explicit_season_is_preserved() {
		let config = Config::parse_from(["nfl_sim_server", "--season", "2025"]);
		assert_eq!(config.resolved_season(), 2025);
	}
}
