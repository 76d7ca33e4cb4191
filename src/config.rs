use std::{env, path::PathBuf};

use crate::constants::{self, DEFAULT_AWS_REGION};

/// Which instance metadata protocol to attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImdsVersion {
    /// Legacy unauthenticated flow only
    V1,
    /// Token-secured flow only
    V2,
    /// Secured flow first, legacy fallback on any failure in the secured flow
    Auto,
}

impl ImdsVersion {
    fn from_env() -> Self {
        match env::var("AWS_IMDS_VERSION").as_deref() {
            Ok("v1") => Self::V1,
            Ok("v2") => Self::V2,
            _ => Self::Auto,
        }
    }
}

/// Application configuration, read once from the process environment at
/// startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub profile: String,
    /// Custom DynamoDB endpoint, e.g. DynamoDB Local
    pub endpoint: Option<String>,
    pub config_file: Option<PathBuf>,
    pub credentials_file: Option<PathBuf>,
    pub use_imds: bool,
    pub imds_version: ImdsVersion,
    /// Relative path announced by the container orchestrator. Its presence
    /// is what enables the container metadata strategy.
    pub container_credentials_uri: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Self {
        let region = non_empty_var("AWS_REGION")
            .or_else(|| non_empty_var("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string());

        let profile = non_empty_var("AWS_PROFILE").unwrap_or_else(|| "default".to_string());

        // Endpoint for local development (e.g. DynamoDB Local)
        let endpoint = non_empty_var("AWS_DYNAMODB_ENDPOINT");

        // Only the literal "false" disables IMDS
        let use_imds = env::var("AWS_USE_IMDS").map(|v| v != "false").unwrap_or(true);

        Self {
            region,
            profile,
            endpoint,
            config_file: constants::get_aws_config_path(),
            credentials_file: constants::get_aws_credentials_path(),
            use_imds,
            imds_version: ImdsVersion::from_env(),
            container_credentials_uri: non_empty_var("AWS_CONTAINER_CREDENTIALS_RELATIVE_URI"),
        }
    }

    pub fn use_ecs_metadata(&self) -> bool {
        self.container_credentials_uri.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
