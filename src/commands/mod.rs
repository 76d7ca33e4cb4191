use crate::config::Config;
use crate::db::DynamoClient;

pub mod browse;
pub mod completions;
pub mod describe;
pub mod tables;

pub use browse::BrowseCommand;
pub use completions::CompletionsCommand;
pub use describe::DescribeCommand;
pub use tables::TablesCommand;

pub(crate) async fn build_client(config: &Config, demo: bool) -> DynamoClient {
    if demo {
        DynamoClient::demo(config.clone())
    } else {
        DynamoClient::new(config.clone()).await
    }
}
