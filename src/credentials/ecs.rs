use reqwest::Client;
use tracing::debug;

use super::request::RequestSpec;
use super::{Credentials, CredentialsError, decode_credentials};

/// Fetch task credentials from the container metadata proxy.
///
/// The orchestrator announces a relative path; the absolute endpoint is the
/// fixed proxy host with that path appended verbatim. A single GET returns
/// the standard credential document.
pub(crate) async fn fetch(
    client: &Client,
    base_url: &str,
    relative_uri: &str,
) -> Result<Credentials, CredentialsError> {
    let spec = RequestSpec::get(format!("{base_url}{relative_uri}"));
    debug!(url = spec.url(), "requesting credentials from container metadata");

    let body = spec.send(client).await?;
    decode_credentials(spec.url(), &body)
}
