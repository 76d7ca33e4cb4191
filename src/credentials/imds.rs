use reqwest::Client;
use tracing::debug;

use crate::constants::{
    IMDS_CREDENTIALS_PATH, IMDS_TOKEN_HEADER, IMDS_TOKEN_PATH, IMDS_TOKEN_TTL_HEADER,
    IMDS_TOKEN_TTL_SECONDS,
};

use super::request::RequestSpec;
use super::{Credentials, CredentialsError, decode_credentials};

/// Fetch role credentials via the token-secured metadata flow.
///
/// Three steps: PUT for a session token, GET the role listing with the token
/// attached, GET that role's credential document. A failure at any step
/// fails the whole flow; no partial credentials are ever returned.
pub(crate) async fn fetch_v2(
    client: &Client,
    base_url: &str,
) -> Result<Credentials, CredentialsError> {
    let token = RequestSpec::put(format!("{base_url}{IMDS_TOKEN_PATH}"))
        .header(IMDS_TOKEN_TTL_HEADER, IMDS_TOKEN_TTL_SECONDS)
        .send(client)
        .await?;

    let role_name = RequestSpec::get(format!("{base_url}{IMDS_CREDENTIALS_PATH}"))
        .header(IMDS_TOKEN_HEADER, token.clone())
        .send(client)
        .await?;
    let role_name = role_name.trim();
    debug!(role_name, "resolved IAM role from instance metadata");

    let spec = RequestSpec::get(format!("{base_url}{IMDS_CREDENTIALS_PATH}{role_name}"))
        .header(IMDS_TOKEN_HEADER, token);
    let body = spec.send(client).await?;
    decode_credentials(spec.url(), &body)
}

/// Fetch role credentials via the legacy unauthenticated metadata flow.
pub(crate) async fn fetch_v1(
    client: &Client,
    base_url: &str,
) -> Result<Credentials, CredentialsError> {
    let role_name = RequestSpec::get(format!("{base_url}{IMDS_CREDENTIALS_PATH}"))
        .send(client)
        .await?;
    let role_name = role_name.trim();
    debug!(role_name, "resolved IAM role from instance metadata");

    let spec = RequestSpec::get(format!("{base_url}{IMDS_CREDENTIALS_PATH}{role_name}"));
    let body = spec.send(client).await?;
    decode_credentials(spec.url(), &body)
}
