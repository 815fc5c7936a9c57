//! Optional observability hooks for the `whoami` fetch.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every fetch in a span named `oauth2_younility.whoami` carrying the
//!   requested `uri`.
//! - Enable `metrics` to increment the `oauth2_younility_whoami_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each profile fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WhoamiOutcome {
	/// Fetch started.
	Attempt,
	/// Profile parsed successfully.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl WhoamiOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			WhoamiOutcome::Attempt => "attempt",
			WhoamiOutcome::Success => "success",
			WhoamiOutcome::Failure => "failure",
		}
	}
}
impl Display for WhoamiOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
