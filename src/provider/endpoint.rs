/// Path of the profile lookup relative to the API prefix.
pub const WHOAMI_PATH: &str = "/v0/whoami";

/// Returns `prefix + "/v0/whoami"`.
///
/// Concatenation is literal: leading or trailing slashes in `prefix` are not normalized.
pub fn whoami_uri(prefix: &str) -> String {
	let mut uri = String::with_capacity(prefix.len() + WHOAMI_PATH.len());

	uri.push_str(prefix);
	uri.push_str(WHOAMI_PATH);

	uri
}
