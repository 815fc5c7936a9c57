//! Raw `whoami` payloads and the single authenticated fetch that produces them.

// std
use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::UpstreamError,
	obs::{self, WhoamiOutcome, WhoamiSpan},
};

/// Unmodified JSON object returned by the provider; keys are not normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProfile(JsonMap<String, JsonValue>);
impl RawProfile {
	/// Looks up a top-level key.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Consumes the profile, returning the underlying JSON object.
	pub fn into_inner(self) -> JsonMap<String, JsonValue> {
		self.0
	}
}
impl From<JsonMap<String, JsonValue>> for RawProfile {
	fn from(map: JsonMap<String, JsonValue>) -> Self {
		Self(map)
	}
}
impl Deref for RawProfile {
	type Target = JsonMap<String, JsonValue>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Performs exactly one authenticated GET against `uri` and parses the body.
///
/// Transport failures, non-success statuses, malformed JSON, and non-object bodies all
/// surface as [`UpstreamError`]. Nothing is retried here; retry policy belongs to the
/// transport behind `token`.
pub async fn fetch_profile<T>(token: &T, uri: &str) -> Result<RawProfile, UpstreamError>
where
	T: ?Sized + AccessToken,
{
	let span = WhoamiSpan::new(uri);

	obs::record_whoami_outcome(WhoamiOutcome::Attempt);

	let result = span
		.instrument(async {
			let response = token.get(uri).await?.error_for_status()?;

			response.parsed()
		})
		.await;

	match &result {
		Ok(_) => obs::record_whoami_outcome(WhoamiOutcome::Success),
		Err(_) => obs::record_whoami_outcome(WhoamiOutcome::Failure),
	}

	result
}
