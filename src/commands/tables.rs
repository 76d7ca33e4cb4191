use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;

#[derive(Debug, Clone, Args)]
pub struct TablesCommand {}

impl TablesCommand {
    pub async fn execute(self, config: &Config, demo: bool) -> Result<()> {
        let client = super::build_client(config, demo).await;
        let tables = client
            .list_tables()
            .await
            .context("Failed to list tables")?;

        for table in tables {
            println!("{table}");
        }

        Ok(())
    }
}
