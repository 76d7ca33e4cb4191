use std::env;

use tracing::debug;

use super::{Credentials, default_expiration};

/// Read credentials directly from the process environment.
///
/// Both the key id and the secret must be non-empty; a half-configured pair
/// is treated as absent rather than as an error, so resolution moves on to
/// the next source. No network I/O happens here.
pub(crate) fn from_env() -> Option<Credentials> {
    let access_key_id = env::var("AWS_ACCESS_KEY_ID").unwrap_or_default();
    let secret_access_key = env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default();

    if access_key_id.is_empty() || secret_access_key.is_empty() {
        return None;
    }

    debug!("using credentials from environment variables");
    Some(Credentials {
        access_key_id,
        secret_access_key,
        session_token: env::var("AWS_SESSION_TOKEN").unwrap_or_default(),
        expiration: default_expiration(),
    })
}

#[cfg(test)]
pub(crate) use test_support::credential_env;
