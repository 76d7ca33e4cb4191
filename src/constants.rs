use std::{env, path::PathBuf, time::Duration};

use dirs;

/// Instance metadata service base URL (link-local, reachable only inside EC2)
pub const IMDS_BASE_URL: &str = "http://169.254.169.254";

/// IMDSv2 session token path
pub const IMDS_TOKEN_PATH: &str = "/latest/api/token";

/// IAM role credentials path prefix (lists role names when no role is appended)
pub const IMDS_CREDENTIALS_PATH: &str = "/latest/meta-data/iam/security-credentials/";

/// Header carrying the IMDSv2 session token
pub const IMDS_TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

/// Header requesting a session token TTL from IMDSv2
pub const IMDS_TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";

/// Session token TTL requested from IMDSv2 (6 hours)
pub const IMDS_TOKEN_TTL_SECONDS: &str = "21600";

/// Container credentials proxy base URL (link-local, reachable only inside ECS tasks)
pub const ECS_METADATA_BASE_URL: &str = "http://169.254.170.2";

/// Timeout applied to every metadata request, so resolution fails fast when
/// no metadata endpoint is reachable (e.g. on a developer machine)
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Credential lifetime assumed when a source omits or mangles its expiration
pub const DEFAULT_CREDENTIAL_LIFETIME_SECS: i64 = 3600;

/// Default AWS region when none is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// Get the AWS config file path
/// Respects AWS_CONFIG_FILE environment variable if set
pub fn get_aws_config_path() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    // Use default AWS config location
    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CONFIG_FILE_NAME))
}

/// Get the AWS credentials file path
/// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
pub fn get_aws_credentials_path() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }

    // Use default AWS credentials location
    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join("credentials"))
}
