use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A single shared atomic boolean. Cheap to check on every trial of the
/// hottest loop in the system, and cheap to clone into worker threads.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
	#[must_use]
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(false)))
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}
