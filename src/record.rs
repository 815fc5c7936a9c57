//! Canonical identity record handed back to the host pipeline.

// self
use crate::{
	_prelude::*,
	identity::{self, Credentials, NormalizedInfo},
};

/// Normalized identity produced for one authentication request.
///
/// Serializes as `{ provider, uid, info, credentials, extra }`; a missing `uid` is emitted as
/// `null` rather than omitted. When read back, a present `null` stays `Some(JsonValue::Null)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRecord {
	/// Name of the strategy that produced the record.
	pub provider: String,
	/// Unique user identifier taken from the profile's `id` key.
	#[serde(default, deserialize_with = "identity::deserialize_present")]
	pub uid: Option<JsonValue>,
	/// Display information.
	pub info: NormalizedInfo,
	/// Token-derived credential bundle.
	pub credentials: Credentials,
	/// Reserved for provider-specific metadata; always empty.
	pub extra: JsonMap<String, JsonValue>,
}

/// Combines the three projections into an [`AuthRecord`] with an empty `extra` map.
pub fn build_auth_record(
	provider: impl Into<String>,
	uid: Option<JsonValue>,
	info: NormalizedInfo,
	credentials: Credentials,
) -> AuthRecord {
	AuthRecord { provider: provider.into(), uid, info, credentials, extra: JsonMap::new() }
}
