//! Pure projections from the raw profile and token metadata into normalized identity data.
//!
//! Every projected field uses `Option` as its missing marker: `None` means the provider never
//! sent the key, while `Some(JsonValue::Null)` means it sent an explicit `null`. Both
//! serialize to `null`, and no field is ever dropped from the shape. Deserializing maps a
//! present `null` back to `Some(JsonValue::Null)` and only an absent key to `None`.

// self
use crate::{
	_prelude::*,
	auth::{IssuedToken, TokenSecret},
	profile::RawProfile,
};

/// Display information projected from the provider profile.
///
/// Values are passed through exactly as the provider sent them; `verified_email` is usually
/// a boolean but is never coerced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedInfo {
	/// Provider-side user identifier.
	#[serde(default, deserialize_with = "deserialize_present")]
	pub id: Option<JsonValue>,
	/// Display name.
	#[serde(default, deserialize_with = "deserialize_present")]
	pub name: Option<JsonValue>,
	/// Primary email address.
	#[serde(default, deserialize_with = "deserialize_present")]
	pub email: Option<JsonValue>,
	/// Whether the provider verified the email address.
	#[serde(default, deserialize_with = "deserialize_present")]
	pub verified_email: Option<JsonValue>,
	/// Organization selected by default for the user.
	#[serde(default, deserialize_with = "deserialize_present")]
	pub default_organization_id: Option<JsonValue>,
	/// Role the user holds in the default organization.
	#[serde(default, deserialize_with = "deserialize_present")]
	pub default_role: Option<JsonValue>,
}
impl NormalizedInfo {
	/// Returns `true` when no field was found in the profile.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// Credential bundle derived from the access token alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Access token secret.
	pub token: TokenSecret,
	/// Refresh token secret, if issued.
	pub refresh_token: Option<TokenSecret>,
	/// Absolute expiry in epoch seconds.
	pub expires_at: Option<i64>,
	/// Whether the token expires at all.
	pub expires: bool,
}

/// Returns the value at `"id"`, or the missing marker when the key is absent.
pub fn extract_uid(profile: &RawProfile) -> Option<JsonValue> {
	lookup(profile, "id")
}

/// Projects the six display fields by identically named top-level keys.
pub fn extract_info(profile: &RawProfile) -> NormalizedInfo {
	NormalizedInfo {
		id: lookup(profile, "id"),
		name: lookup(profile, "name"),
		email: lookup(profile, "email"),
		verified_email: lookup(profile, "verified_email"),
		default_organization_id: lookup(profile, "default_organization_id"),
		default_role: lookup(profile, "default_role"),
	}
}

/// Builds the credential bundle from token metadata. Never touches the profile or the
/// network; the argument carries no transport capability.
pub fn extract_credentials(token: &IssuedToken) -> Credentials {
	Credentials {
		token: token.token().clone(),
		refresh_token: token.refresh_token().cloned(),
		expires_at: token.expires_at(),
		expires: token.expires(),
	}
}

fn lookup(profile: &RawProfile, key: &str) -> Option<JsonValue> {
	profile.get(key).cloned()
}

/// Keeps an explicit `null` as `Some(JsonValue::Null)`; pair with `#[serde(default)]` so an
/// absent key stays `None`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	JsonValue::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::_preludet::fixture_token;

	fn profile(value: JsonValue) -> RawProfile {
		match value {
			JsonValue::Object(map) => RawProfile::from(map),
			other => panic!("Fixture must be a JSON object, got {other}."),
		}
	}

	#[test]
	fn uid_reads_the_id_key() {
		assert_eq!(extract_uid(&profile(json!({ "id": "123" }))), Some(json!("123")));
		assert_eq!(extract_uid(&profile(json!({ "uid": "123" }))), None);
		assert_eq!(extract_uid(&profile(json!({ "id": null }))), Some(JsonValue::Null));
	}

	#[test]
	fn info_passes_all_fields_through() {
		let info = extract_info(&profile(json!({
			"id": "123",
			"name": "Lester Tester",
			"email": "lester@example.com",
			"verified_email": true,
			"default_organization_id": "987",
			"default_role": "admin"
		})));

		assert_eq!(
			serde_json::to_value(&info).expect("Info should serialize."),
			json!({
				"id": "123",
				"name": "Lester Tester",
				"email": "lester@example.com",
				"verified_email": true,
				"default_organization_id": "987",
				"default_role": "admin"
			})
		);
	}

	#[test]
	fn info_does_not_coerce_types() {
		let info = extract_info(&profile(json!({ "verified_email": "yes", "id": 42 })));

		assert_eq!(info.verified_email, Some(json!("yes")));
		assert_eq!(info.id, Some(json!(42)));
		assert_eq!(info.name, None);
	}

	#[test]
	fn nested_auth_shaped_payload_yields_missing_markers() {
		let info = extract_info(&profile(json!({
			"provider": "younility",
			"uid": "123",
			"info": { "id": "123", "name": "Lester Tester" },
			"credentials": { "token": "123" },
			"extra": {}
		})));

		assert!(info.is_empty());
		assert_eq!(
			serde_json::to_value(&info).expect("Info should serialize."),
			json!({
				"id": null,
				"name": null,
				"email": null,
				"verified_email": null,
				"default_organization_id": null,
				"default_role": null
			})
		);
	}

	#[test]
	fn explicit_nulls_survive_deserialization() {
		let info: NormalizedInfo = serde_json::from_value(json!({
			"id": "123",
			"name": null,
			"email": "lester@example.com"
		}))
		.expect("Info should deserialize.");

		assert_eq!(info.id, Some(json!("123")));
		assert_eq!(info.name, Some(JsonValue::Null));
		assert_eq!(info.verified_email, None);
		assert_eq!(info.default_role, None);
	}

	#[test]
	fn credentials_come_from_the_token_only() {
		let credentials = extract_credentials(&fixture_token());

		assert_eq!(
			serde_json::to_value(&credentials).expect("Credentials should serialize."),
			json!({ "token": "123", "refresh_token": "abcd", "expires_at": 12345, "expires": true })
		);
	}

	#[test]
	fn credentials_for_a_bare_token() {
		let credentials = extract_credentials(&IssuedToken::new("bare"));

		assert_eq!(credentials.token.expose(), "bare");
		assert_eq!(credentials.refresh_token, None);
		assert_eq!(credentials.expires_at, None);
		assert!(!credentials.expires);
	}
}
