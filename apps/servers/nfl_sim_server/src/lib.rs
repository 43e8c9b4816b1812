//! The HTTP surface: the single binary that owns the cache-directory
//! snapshot, the override store and the job registry, and turns requests
//! into calls against the transport-agnostic simulation crates.

pub mod config;
pub mod error;
pub mod routes;
pub mod snapshot;
pub mod state;

pub use config::Config;
pub use error::Error;
pub use state::AppState;

use std::str::FromStr;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Initializes `tracing` from `config.log_level`: pretty output by default,
/// JSON when `LOG_FORMAT` requests it.
pub fn init_tracing(config: &Config) {
	let filter = EnvFilter::from_str(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

	let _ = tracing_subscriber::registry()
		.with(if json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(tracing_subscriber::fmt::layer().event_format(tracing_subscriber::fmt::format().pretty()).with_filter(filter))
		})
		.try_init();
}
