//! Transport primitives for the `whoami` GET.
//!
//! [`WhoamiResponse`] is the crate-owned response shape every [`AccessToken`] returns, so
//! the profile fetcher never depends on a particular HTTP stack. With the `reqwest` feature
//! the module also ships [`ReqwestAccessToken`], which resolves request paths against the
//! provider site and authenticates with the bearer token.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::UpstreamError, profile::RawProfile};
#[cfg(feature = "reqwest")]
use crate::{
	auth::{AccessToken, IssuedToken},
	error::ConfigError,
	provider::ClientOptions,
};

/// Boxed future returned by [`crate::auth::AccessToken::get`].
pub type WhoamiFuture<'a> =
	Pin<Box<dyn Future<Output = Result<WhoamiResponse, UpstreamError>> + 'a + Send>>;

/// Raw HTTP response captured from the `whoami` endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhoamiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl WhoamiResponse {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Creates a response without a Retry-After hint.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, retry_after: None, body: body.into() }
	}

	/// Adds a Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
		self.retry_after = Some(retry_after);

		self
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Converts non-success statuses into [`UpstreamError::Status`].
	pub fn error_for_status(self) -> Result<Self, UpstreamError> {
		if self.is_success() {
			return Ok(self);
		}

		let body_preview = (!self.body.is_empty())
			.then(|| truncate_preview(String::from_utf8_lossy(&self.body).into_owned()));

		Err(UpstreamError::Status {
			status: self.status,
			retry_after: self.retry_after,
			body_preview,
		})
	}

	/// Parses the body as a JSON object.
	pub fn parsed(&self) -> Result<RawProfile, UpstreamError> {
		let mut de = serde_json::Deserializer::from_slice(&self.body);
		let value: JsonValue = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| UpstreamError::Parse { source, status: self.status })?;

		match value {
			JsonValue::Object(map) => Ok(RawProfile::from(map)),
			_ => Err(UpstreamError::NotAnObject { status: self.status }),
		}
	}
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= WhoamiResponse::BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf: String = body.chars().take(WhoamiResponse::BODY_PREVIEW_LIMIT).collect();

	buf.push('…');

	buf
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// [`AccessToken`] backed by reqwest.
///
/// Paths are resolved against `site` with URL-join semantics, so `/api/v0/whoami` replaces
/// any path component of the site. Every request carries `Authorization: Bearer <token>`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestAccessToken {
	issued: IssuedToken,
	site: Url,
	http_client: ReqwestHttpClient,
}
#[cfg(feature = "reqwest")]
impl ReqwestAccessToken {
	/// Creates a token that talks to `site` with a default reqwest client.
	pub fn new(issued: IssuedToken, site: Url) -> Self {
		Self { issued, site, http_client: ReqwestHttpClient::default() }
	}

	/// Creates a token for the validated site of `options`.
	pub fn for_client_options(
		issued: IssuedToken,
		options: &ClientOptions,
	) -> Result<Self, ConfigError> {
		Ok(Self::new(issued, options.site_url()?))
	}

	/// Replaces the HTTP client, e.g. to configure timeouts or proxies.
	pub fn with_http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.http_client = http_client;

		self
	}

	/// Site every request path is resolved against.
	pub fn site(&self) -> &Url {
		&self.site
	}
}
#[cfg(feature = "reqwest")]
impl AccessToken for ReqwestAccessToken {
	fn issued(&self) -> &IssuedToken {
		&self.issued
	}

	fn get<'a>(&'a self, path: &'a str) -> WhoamiFuture<'a> {
		Box::pin(async move {
			let url = self.site.join(path).map_err(UpstreamError::transport)?;
			let response = self
				.http_client
				.get(url)
				.bearer_auth(self.issued.token().expose())
				.header(ACCEPT, "application/json")
				.send()
				.await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(WhoamiResponse { status, retry_after, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
