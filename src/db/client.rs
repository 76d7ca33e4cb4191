use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials as SdkCredentials;
use aws_sdk_dynamodb::Client as SdkClient;
use aws_sdk_dynamodb::types;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::credentials;

use super::{IndexInfo, KeySchemaElement, TableInfo, demo};

/// DynamoDB client facade.
///
/// Falls back to the built-in demo catalog whenever a live call fails or no
/// live client exists, so a missing AWS environment degrades the browser
/// instead of crashing it.
pub struct DynamoClient {
    client: Option<SdkClient>,
    config: Config,
}

impl DynamoClient {
    /// Build a client connected to DynamoDB.
    ///
    /// Explicit credential resolution runs at most once here; if it fails,
    /// the SDK's own default chain takes over.
    pub async fn new(config: Config) -> Self {
        let client = build_sdk_client(&config).await;
        Self {
            client: Some(client),
            config,
        }
    }

    /// Build a client that only serves the demo catalog.
    pub fn demo(config: Config) -> Self {
        Self {
            client: None,
            config,
        }
    }

    pub fn region(&self) -> &str {
        &self.config.region
    }

    pub fn is_demo(&self) -> bool {
        self.client.is_none()
    }

    /// List all table names, following pagination to the end.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let Some(client) = &self.client else {
            return Ok(demo::table_names());
        };

        let mut table_names = Vec::new();
        let mut start_table: Option<String> = None;

        loop {
            let response = client
                .list_tables()
                .set_exclusive_start_table_name(start_table.clone())
                .send()
                .await;

            let output = match response {
                Ok(output) => output,
                Err(error) => {
                    warn!(%error, "listing tables failed, serving demo catalog");
                    return Ok(demo::table_names());
                }
            };

            table_names.extend(output.table_names().iter().cloned());

            start_table = output.last_evaluated_table_name().map(str::to_string);
            if start_table.is_none() {
                break;
            }
        }

        debug!(count = table_names.len(), "listed tables");
        Ok(table_names)
    }

    /// Describe one table's schema.
    pub async fn describe_table(&self, table_name: &str) -> Result<TableInfo> {
        let Some(client) = &self.client else {
            return demo_table_info(table_name);
        };

        let response = client.describe_table().table_name(table_name).send().await;

        let output = match response {
            Ok(output) => output,
            Err(error) => {
                warn!(%error, table_name, "describing table failed, serving demo catalog");
                return demo_table_info(table_name);
            }
        };

        let table = output
            .table()
            .with_context(|| format!("table not found: {table_name}"))?;
        Ok(convert_table(table))
    }
}

fn demo_table_info(table_name: &str) -> Result<TableInfo> {
    demo::table_info(table_name).with_context(|| format!("table not found: {table_name}"))
}

async fn build_sdk_client(config: &Config) -> SdkClient {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .profile_name(&config.profile);

    if let Some(endpoint) = &config.endpoint {
        info!(endpoint = %endpoint, "using custom DynamoDB endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    // Resolver failure is non-fatal: the SDK's ambient chain still gets a
    // chance to find credentials on its own
    debug!(
        use_imds = config.use_imds,
        use_ecs_metadata = config.use_ecs_metadata(),
        "resolving explicit credentials"
    );
    match credentials::resolve(config).await {
        Ok(resolved) => {
            debug!("using explicitly resolved credentials");
            let session_token = (!resolved.session_token.is_empty())
                .then(|| resolved.session_token.clone());
            loader = loader.credentials_provider(SdkCredentials::new(
                resolved.access_key_id,
                resolved.secret_access_key,
                session_token,
                None,
                "dynoscope-resolver",
            ));
        }
        Err(error) => {
            warn!(%error, "no explicit credentials resolved, using SDK default chain");
        }
    }

    let sdk_config = loader.load().await;
    SdkClient::new(&sdk_config)
}

fn convert_table(table: &types::TableDescription) -> TableInfo {
    let table_name = table.table_name().unwrap_or_default().to_string();

    let global_secondary_indexes = table
        .global_secondary_indexes()
        .iter()
        .map(|index| IndexInfo {
            index_name: index.index_name().unwrap_or_default().to_string(),
            key_schema: convert_key_schema(index.key_schema()),
        })
        .collect();

    let local_secondary_indexes = table
        .local_secondary_indexes()
        .iter()
        .map(|index| IndexInfo {
            index_name: index.index_name().unwrap_or_default().to_string(),
            key_schema: convert_key_schema(index.key_schema()),
        })
        .collect();

    TableInfo {
        table_name,
        key_schema: convert_key_schema(table.key_schema()),
        attribute_definitions: table
            .attribute_definitions()
            .iter()
            .map(|attr| {
                (
                    attr.attribute_name().to_string(),
                    attr.attribute_type().as_str().to_string(),
                )
            })
            .collect(),
        global_secondary_indexes,
        local_secondary_indexes,
    }
}

fn convert_key_schema(schema: &[types::KeySchemaElement]) -> Vec<KeySchemaElement> {
    schema
        .iter()
        .map(|element| KeySchemaElement {
            attribute_name: element.attribute_name().to_string(),
            key_type: element.key_type().as_str().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::{
        AttributeDefinition, GlobalSecondaryIndexDescription, KeyType,
        LocalSecondaryIndexDescription, ScalarAttributeType, TableDescription,
    };

    fn key_element(name: &str, key_type: KeyType) -> types::KeySchemaElement {
        types::KeySchemaElement::builder()
            .attribute_name(name)
            .key_type(key_type)
            .build()
            .unwrap()
    }

    #[test]
    fn test_convert_key_schema() {
        let schema = vec![
            key_element("UserID", KeyType::Hash),
            key_element("Email", KeyType::Range),
        ];

        let converted = convert_key_schema(&schema);
        assert_eq!(
            converted,
            vec![
                KeySchemaElement {
                    attribute_name: "UserID".to_string(),
                    key_type: "HASH".to_string(),
                },
                KeySchemaElement {
                    attribute_name: "Email".to_string(),
                    key_type: "RANGE".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_convert_table_with_indexes() {
        let table = TableDescription::builder()
            .table_name("Users")
            .key_schema(key_element("UserID", KeyType::Hash))
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("UserID")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .global_secondary_indexes(
                GlobalSecondaryIndexDescription::builder()
                    .index_name("UsernameIndex")
                    .key_schema(key_element("Username", KeyType::Hash))
                    .build(),
            )
            .local_secondary_indexes(
                LocalSecondaryIndexDescription::builder()
                    .index_name("CreatedAtIndex")
                    .key_schema(key_element("UserID", KeyType::Hash))
                    .key_schema(key_element("CreatedAt", KeyType::Range))
                    .build(),
            )
            .build();

        let info = convert_table(&table);
        assert_eq!(info.table_name, "Users");
        assert_eq!(info.key_schema.len(), 1);
        assert_eq!(info.attribute_definitions.get("UserID").unwrap(), "S");
        assert_eq!(info.global_secondary_indexes.len(), 1);
        assert_eq!(
            info.global_secondary_indexes[0].index_name,
            "UsernameIndex"
        );
        assert_eq!(info.local_secondary_indexes[0].key_schema.len(), 2);
    }

    #[tokio::test]
    async fn test_demo_client_lists_demo_tables() {
        let client = DynamoClient::demo(test_config());
        let tables = client.list_tables().await.unwrap();
        assert_eq!(tables, vec!["Users", "Products", "Orders"]);
    }

    #[tokio::test]
    async fn test_demo_client_describes_demo_table() {
        let client = DynamoClient::demo(test_config());
        let info = client.describe_table("Orders").await.unwrap();
        assert_eq!(info.table_name, "Orders");
        assert_eq!(info.global_secondary_indexes.len(), 1);
        assert_eq!(info.local_secondary_indexes.len(), 1);
    }

    #[tokio::test]
    async fn test_demo_client_errors_on_unknown_table() {
        let client = DynamoClient::demo(test_config());
        let result = client.describe_table("NonExistentTable").await;
        assert!(result.is_err());
    }

    fn test_config() -> Config {
        Config {
            region: "us-east-1".to_string(),
            profile: "default".to_string(),
            endpoint: None,
            config_file: None,
            credentials_file: None,
            use_imds: false,
            imds_version: crate::config::ImdsVersion::Auto,
            container_credentials_uri: None,
        }
    }
}
