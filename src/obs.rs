//! Optional observability helpers for signed REST calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `coinbase_signer.request` with the `api`
//!   (mode) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `coinbase_signer_request_total` counter for every
//!   attempt/success/failure, labeled by `api` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;
pub use crate::auth::ApiMode;

/// Outcome labels recorded for each signed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to the call wrapper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
