use std::time::{SystemTime, UNIX_EPOCH};

use aws_smithy_types::{DateTime, date_time::Format};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::DEFAULT_CREDENTIAL_LIFETIME_SECS;

mod ecs;
mod env;
mod imds;
mod request;
mod resolver;

pub use resolver::resolve;

/// AWS credentials resolved from a single source.
///
/// A fresh value is produced per resolution; nothing is cached or refreshed.
/// The session token is empty for long-lived keys.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

/// Failure modes of the credential sources.
///
/// Everything except `NoCredentialsFound` describes a single strategy's
/// failure; the resolver records those and moves on to the next source.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("failed to build metadata HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode credentials from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to locate AWS credentials in any configured source")]
    NoCredentialsFound,
}

/// Credential document served by both the instance and container metadata
/// endpoints.
#[derive(Debug, Deserialize)]
struct CredentialsDocument {
    #[serde(rename = "AccessKeyId")]
    access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    secret_access_key: String,
    #[serde(rename = "Token", default)]
    token: String,
    #[serde(rename = "Expiration", default)]
    expiration: String,
}

impl CredentialsDocument {
    fn into_credentials(self) -> Credentials {
        // A missing or malformed expiration never fails the fetch; assume
        // the default lifetime instead.
        let expiration = DateTime::from_str(&self.expiration, Format::DateTime)
            .unwrap_or_else(|_| default_expiration());

        Credentials {
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            session_token: self.token,
            expiration,
        }
    }
}

pub(crate) fn decode_credentials(url: &str, body: &str) -> Result<Credentials, CredentialsError> {
    let document: CredentialsDocument =
        serde_json::from_str(body).map_err(|source| CredentialsError::Decode {
            url: url.to_string(),
            source,
        })?;
    Ok(document.into_credentials())
}

pub(crate) fn default_expiration() -> DateTime {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    DateTime::from_secs(now.as_secs() as i64 + DEFAULT_CREDENTIAL_LIFETIME_SECS)
}

#[cfg(test)]
pub(crate) fn now_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
