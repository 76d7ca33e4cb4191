use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{Config, ImdsVersion};
use crate::constants::{ECS_METADATA_BASE_URL, IMDS_BASE_URL, METADATA_TIMEOUT};

use super::{Credentials, CredentialsError, ecs, env, imds};

/// Resolve credentials from the configured sources in precedence order:
/// process environment, container metadata, instance metadata.
///
/// Sources are tried strictly sequentially; a source failure is logged and
/// the next applicable source is attempted. Only exhaustion of every
/// applicable source is an error.
pub async fn resolve(config: &Config) -> Result<Credentials, CredentialsError> {
    let client = metadata_client()?;
    resolve_with(config, &client, IMDS_BASE_URL, ECS_METADATA_BASE_URL).await
}

pub(crate) async fn resolve_with(
    config: &Config,
    client: &Client,
    imds_base_url: &str,
    ecs_base_url: &str,
) -> Result<Credentials, CredentialsError> {
    // Environment variables win unconditionally and need no network
    if let Some(credentials) = env::from_env() {
        return Ok(credentials);
    }

    if let Some(relative_uri) = &config.container_credentials_uri {
        debug!("attempting container metadata credentials");
        match ecs::fetch(client, ecs_base_url, relative_uri).await {
            Ok(credentials) => return Ok(credentials),
            Err(error) => warn!(%error, "container metadata credentials unavailable"),
        }
    }

    if config.use_imds {
        let attempt = match config.imds_version {
            ImdsVersion::V1 => imds::fetch_v1(client, imds_base_url).await,
            ImdsVersion::V2 => imds::fetch_v2(client, imds_base_url).await,
            ImdsVersion::Auto => match imds::fetch_v2(client, imds_base_url).await {
                Ok(credentials) => Ok(credentials),
                // Any secured-flow failure triggers the legacy attempt, not
                // just a token-step failure
                Err(error) => {
                    debug!(%error, "secured instance metadata flow failed, trying legacy flow");
                    imds::fetch_v1(client, imds_base_url).await
                }
            },
        };
        match attempt {
            Ok(credentials) => return Ok(credentials),
            Err(error) => warn!(%error, "instance metadata credentials unavailable"),
        }
    }

    Err(CredentialsError::NoCredentialsFound)
}

/// One explicitly constructed client, shared by every strategy in a single
/// resolution call. The timeout bounds each request so resolution cannot
/// hang on an unreachable metadata endpoint.
fn metadata_client() -> Result<Client, CredentialsError> {
    Client::builder()
        .timeout(METADATA_TIMEOUT)
        .build()
        .map_err(CredentialsError::Client)
}
