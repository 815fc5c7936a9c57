//! Strategy-level error types shared by the profile fetch and configuration layers.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
///
/// Absent profile keys are never errors; they resolve to the missing marker instead.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The `whoami` call failed; there is no identity without the profile.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
}

/// Configuration and validation failures raised while resolving client options.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Site cannot be parsed as an absolute URL.
	#[error("Site `{site}` is not a valid URL.")]
	InvalidSite {
		/// Offending site value.
		site: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Site must use HTTPS.
	#[error("Site must use HTTPS: {site}.")]
	InsecureSite {
		/// Offending site value.
		site: String,
	},
	/// Endpoint path cannot be resolved against the site.
	#[error("The {endpoint} endpoint `{path}` cannot be resolved against the site.")]
	InvalidEndpoint {
		/// Which endpoint failed to resolve.
		endpoint: &'static str,
		/// Configured endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token response carried an `expires_in` that does not fit the supported range.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

/// Failures of the single `whoami` GET. None of them are retried locally.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Underlying HTTP client reported a network or request-construction failure.
	#[error("Network error occurred while calling the whoami endpoint.")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success status.
	#[error("The whoami endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
		/// Truncated preview of the response body.
		body_preview: Option<String>,
	},
	/// Provider answered with a body that is not valid JSON.
	#[error("The whoami endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Provider answered with valid JSON that is not an object.
	#[error("The whoami endpoint returned a JSON value that is not an object.")]
	NotAnObject {
		/// HTTP status code of the response.
		status: u16,
	},
}
impl UpstreamError {
	/// Wraps a transport-specific failure.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}

	/// Returns the HTTP status associated with the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport { .. } => None,
			Self::Status { status, .. }
			| Self::Parse { status, .. }
			| Self::NotAnObject { status } => Some(*status),
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for UpstreamError {
	fn from(e: ReqwestError) -> Self {
		Self::transport(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upstream_status_is_exposed_when_known() {
		let err = UpstreamError::Status { status: 401, retry_after: None, body_preview: None };

		assert_eq!(err.status(), Some(401));
		assert_eq!(err.to_string(), "The whoami endpoint returned HTTP 401.");

		let err = UpstreamError::transport(std::io::Error::other("connection reset"));

		assert_eq!(err.status(), None);
		assert!(err.source().is_some());
	}

	#[test]
	fn strategy_error_is_transparent_over_upstream() {
		let err = Error::from(UpstreamError::NotAnObject { status: 200 });

		assert_eq!(
			err.to_string(),
			"The whoami endpoint returned a JSON value that is not an object."
		);
	}
}
