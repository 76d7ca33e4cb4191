use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::ui;

#[derive(Debug, Clone, Args)]
pub struct BrowseCommand {}

impl BrowseCommand {
    pub async fn execute(self, config: &Config, demo: bool) -> Result<()> {
        info!(
            "Starting table browser for profile: {} in region: {}",
            config.profile, config.region
        );

        let client = super::build_client(config, demo).await;
        ui::run(&client).await
    }
}
