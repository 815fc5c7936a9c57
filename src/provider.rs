//! Provider-facing configuration (data) and the `whoami` endpoint builder.
//!
//! `options` exposes [`StrategyOptions`] with Younility's fixed client defaults, all of
//! which the host pipeline may override at construction. `endpoint` derives the profile
//! lookup path from the configured API prefix.

/// Profile lookup path derived from the API prefix.
pub mod endpoint;
/// Strategy and OAuth client options with Younility defaults.
pub mod options;

pub use endpoint::*;
pub use options::*;

/// Provider name stamped on every [`crate::record::AuthRecord`].
pub const PROVIDER_NAME: &str = "younility";
