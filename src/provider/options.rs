// self
use crate::{_prelude::*, error::ConfigError, provider::whoami_uri};

/// OAuth client settings for the Younility authorization server.
///
/// `authorize_url` and `token_url` are paths relative to `site`; the host pipeline resolves
/// them with [`ClientOptions::authorize_endpoint`] and [`ClientOptions::token_endpoint`]
/// when it runs the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
	/// Base URL of the provider.
	pub site: String,
	/// Authorization endpoint path.
	pub authorize_url: String,
	/// Token endpoint path.
	pub token_url: String,
}
impl ClientOptions {
	/// Default provider site.
	pub const DEFAULT_SITE: &'static str = "https://app.younility.com";
	/// Default authorization endpoint path.
	pub const DEFAULT_AUTHORIZE_URL: &'static str = "/oauth/authorize";
	/// Default token endpoint path.
	pub const DEFAULT_TOKEN_URL: &'static str = "/oauth/token";

	/// Parses the site and requires HTTPS.
	pub fn site_url(&self) -> Result<Url, ConfigError> {
		let url = Url::parse(&self.site)
			.map_err(|source| ConfigError::InvalidSite { site: self.site.clone(), source })?;

		if url.scheme() != "https" {
			return Err(ConfigError::InsecureSite { site: self.site.clone() });
		}

		Ok(url)
	}

	/// Resolves the authorization endpoint against the site.
	pub fn authorize_endpoint(&self) -> Result<Url, ConfigError> {
		self.resolve("authorize", &self.authorize_url)
	}

	/// Resolves the token endpoint against the site.
	pub fn token_endpoint(&self) -> Result<Url, ConfigError> {
		self.resolve("token", &self.token_url)
	}

	/// Checks that the site and both endpoints resolve.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.authorize_endpoint()?;
		self.token_endpoint()?;

		Ok(())
	}

	fn resolve(&self, endpoint: &'static str, path: &str) -> Result<Url, ConfigError> {
		self.site_url()?.join(path).map_err(|source| ConfigError::InvalidEndpoint {
			endpoint,
			path: path.to_owned(),
			source,
		})
	}
}
impl Default for ClientOptions {
	fn default() -> Self {
		Self {
			site: Self::DEFAULT_SITE.into(),
			authorize_url: Self::DEFAULT_AUTHORIZE_URL.into(),
			token_url: Self::DEFAULT_TOKEN_URL.into(),
		}
	}
}

/// Immutable strategy configuration, created once and shared by every request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
	/// Path prefix placed in front of every API call (empty by default).
	pub api_prefix: String,
	/// OAuth client settings.
	pub client_options: ClientOptions,
}
impl StrategyOptions {
	/// Overrides the API prefix.
	pub fn with_api_prefix(mut self, api_prefix: impl Into<String>) -> Self {
		self.api_prefix = api_prefix.into();

		self
	}

	/// Overrides the provider site.
	pub fn with_site(mut self, site: impl Into<String>) -> Self {
		self.client_options.site = site.into();

		self
	}

	/// Overrides the authorization endpoint path.
	pub fn with_authorize_url(mut self, authorize_url: impl Into<String>) -> Self {
		self.client_options.authorize_url = authorize_url.into();

		self
	}

	/// Overrides the token endpoint path.
	pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
		self.client_options.token_url = token_url.into();

		self
	}

	/// Profile lookup path for the configured prefix.
	pub fn whoami_uri(&self) -> String {
		whoami_uri(&self.api_prefix)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_the_provider() {
		let options = StrategyOptions::default();

		assert_eq!(options.api_prefix, "");
		assert_eq!(options.client_options.site, "https://app.younility.com");
		assert_eq!(options.client_options.authorize_url, "/oauth/authorize");
		assert_eq!(options.client_options.token_url, "/oauth/token");
		assert_eq!(options.whoami_uri(), "/v0/whoami");
	}

	#[test]
	fn endpoints_resolve_against_the_site() {
		let client = ClientOptions::default();

		assert_eq!(
			client.authorize_endpoint().expect("Default authorize endpoint should resolve.").as_str(),
			"https://app.younility.com/oauth/authorize"
		);
		assert_eq!(
			client.token_endpoint().expect("Default token endpoint should resolve.").as_str(),
			"https://app.younility.com/oauth/token"
		);
		client.validate().expect("Default client options should validate.");
	}

	#[test]
	fn insecure_or_invalid_sites_are_rejected() {
		let insecure = StrategyOptions::default().with_site("http://app.younility.com");

		assert!(matches!(
			insecure.client_options.validate(),
			Err(ConfigError::InsecureSite { .. })
		));

		let invalid = StrategyOptions::default().with_site("not a url");

		assert!(matches!(
			invalid.client_options.site_url(),
			Err(ConfigError::InvalidSite { .. })
		));
	}

	#[test]
	fn partial_config_falls_back_to_defaults() {
		let options: StrategyOptions = serde_json::from_str(r#"{ "api_prefix": "/api" }"#)
			.expect("Partial options should deserialize.");

		assert_eq!(options.api_prefix, "/api");
		assert_eq!(options.client_options, ClientOptions::default());
		assert_eq!(options.whoami_uri(), "/api/v0/whoami");

		let options: StrategyOptions =
			serde_json::from_str(r#"{ "client_options": { "site": "https://staging.example.com" } }"#)
				.expect("Nested partial options should deserialize.");

		assert_eq!(options.client_options.site, "https://staging.example.com");
		assert_eq!(options.client_options.token_url, "/oauth/token");
	}
}
