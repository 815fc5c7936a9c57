//! The access-token collaborator and the metadata it carries.
//!
//! The host pipeline performs the authorization-code exchange and hands the strategy an
//! object implementing [`AccessToken`]. The trait splits the token into plain metadata
//! ([`IssuedToken`]) and a single transport capability ([`AccessToken::get`]), so the
//! credentials projection can be computed from the metadata alone without any I/O.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError, http::WhoamiFuture};

/// An already-valid OAuth 2.0 access token able to perform authenticated GET requests.
///
/// Implementors must be `Send + Sync` so sessions can be awaited from any executor thread.
/// The reqwest-backed implementation lives in [`crate::http::ReqwestAccessToken`]; tests
/// inject in-memory fakes.
pub trait AccessToken: Send + Sync {
	/// Token metadata (secret, refresh token, expiry).
	fn issued(&self) -> &IssuedToken;

	/// Performs one authenticated GET against `path` and returns the raw response.
	///
	/// Non-success statuses are returned as responses, not errors; only transport failures
	/// resolve to [`crate::error::UpstreamError`].
	fn get<'a>(&'a self, path: &'a str) -> WhoamiFuture<'a>;
}
impl<T> AccessToken for Arc<T>
where
	T: ?Sized + AccessToken,
{
	fn issued(&self) -> &IssuedToken {
		(**self).issued()
	}

	fn get<'a>(&'a self, path: &'a str) -> WhoamiFuture<'a> {
		(**self).get(path)
	}
}

/// Immutable token metadata produced by the OAuth handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
	access_token: TokenSecret,
	refresh_token: Option<TokenSecret>,
	expires_in: Option<i64>,
	expires_at: Option<i64>,
}
impl IssuedToken {
	/// Creates metadata for a non-expiring token without a refresh token.
	pub fn new(access_token: impl Into<TokenSecret>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: None,
			expires_in: None,
			expires_at: None,
		}
	}

	/// Builds metadata from a token response returned by the `oauth2` crate.
	///
	/// `expires_at` is derived from the current UTC clock when the response carries an
	/// `expires_in` value.
	pub fn from_token_response<R>(response: &R) -> Result<Self, ConfigError>
	where
		R: oauth2::TokenResponse,
	{
		let mut issued = Self::new(response.access_token().secret().as_str());

		if let Some(refresh) = response.refresh_token() {
			issued = issued.with_refresh_token(refresh.secret().as_str());
		}
		if let Some(expires_in) = response.expires_in() {
			let secs = i64::try_from(expires_in.as_secs())
				.map_err(|_| ConfigError::ExpiresInOutOfRange)?;

			issued = issued.with_expires_in(secs);
		}

		Ok(issued)
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}

	/// Records the relative lifetime; derives `expires_at` from the current clock unless an
	/// absolute expiry was already set.
	pub fn with_expires_in(self, expires_in: i64) -> Self {
		self.with_expires_in_from(expires_in, OffsetDateTime::now_utc())
	}

	/// Same as [`IssuedToken::with_expires_in`] with an explicit issue instant.
	pub fn with_expires_in_from(mut self, expires_in: i64, issued_at: OffsetDateTime) -> Self {
		self.expires_in = Some(expires_in);

		if self.expires_at.is_none() {
			self.expires_at = Some(issued_at.unix_timestamp().saturating_add(expires_in));
		}

		self
	}

	/// Sets the absolute expiry in epoch seconds, overriding any derived value.
	pub fn with_expires_at(mut self, expires_at: i64) -> Self {
		self.expires_at = Some(expires_at);

		self
	}

	/// Access token secret.
	pub fn token(&self) -> &TokenSecret {
		&self.access_token
	}

	/// Refresh token secret, if one was issued.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		self.refresh_token.as_ref()
	}

	/// Lifetime in seconds as reported by the provider.
	pub fn expires_in(&self) -> Option<i64> {
		self.expires_in
	}

	/// Absolute expiry in epoch seconds.
	pub fn expires_at(&self) -> Option<i64> {
		self.expires_at
	}

	/// Returns `true` when the token carries an expiry.
	pub fn expires(&self) -> bool {
		self.expires_at.is_some()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::{
		AccessToken as OAuthAccessToken, EmptyExtraTokenFields, RefreshToken,
		basic::{BasicTokenResponse, BasicTokenType},
	};
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn plain_token_does_not_expire() {
		let issued = IssuedToken::new("123");

		assert_eq!(issued.token().expose(), "123");
		assert!(issued.refresh_token().is_none());
		assert!(!issued.expires());
		assert_eq!(issued.expires_at(), None);
	}

	#[test]
	fn expires_in_derives_absolute_expiry() {
		let issued_at = datetime!(2024-01-01 00:00 UTC);
		let issued = IssuedToken::new("123").with_expires_in_from(3600, issued_at);

		assert!(issued.expires());
		assert_eq!(issued.expires_in(), Some(3600));
		assert_eq!(issued.expires_at(), Some(issued_at.unix_timestamp() + 3600));
	}

	#[test]
	fn explicit_expiry_wins_regardless_of_order() {
		let before = IssuedToken::new("123").with_expires_at(12345).with_expires_in(34345);
		let after = IssuedToken::new("123").with_expires_in(34345).with_expires_at(12345);

		assert_eq!(before.expires_at(), Some(12345));
		assert_eq!(after.expires_at(), Some(12345));
		assert_eq!(before, after);
	}

	#[test]
	fn token_response_maps_into_metadata() {
		let mut response = BasicTokenResponse::new(
			OAuthAccessToken::new("123".into()),
			BasicTokenType::Bearer,
			EmptyExtraTokenFields {},
		);

		response.set_refresh_token(Some(RefreshToken::new("abcd".into())));
		response.set_expires_in(Some(&std::time::Duration::from_secs(34345)));

		let now = OffsetDateTime::now_utc().unix_timestamp();
		let issued =
			IssuedToken::from_token_response(&response).expect("Token response should convert.");

		assert_eq!(issued.token().expose(), "123");
		assert_eq!(issued.refresh_token().map(TokenSecret::expose), Some("abcd"));
		assert_eq!(issued.expires_in(), Some(34345));

		let expires_at = issued.expires_at().expect("Expiry should be derived from expires_in.");

		assert!(expires_at >= now + 34345);
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let issued = IssuedToken::new("super-secret").with_refresh_token("also-secret");
		let rendered = format!("{issued:?}");

		assert!(!rendered.contains("super-secret"));
		assert!(!rendered.contains("also-secret"));
	}
}
