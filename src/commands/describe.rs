use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;
use crate::ui;

#[derive(Debug, Clone, Args)]
pub struct DescribeCommand {
    #[arg(help = "Name of the table to describe")]
    pub table: String,
}

impl DescribeCommand {
    pub async fn execute(self, config: &Config, demo: bool) -> Result<()> {
        let client = super::build_client(config, demo).await;
        let info = client
            .describe_table(&self.table)
            .await
            .with_context(|| format!("Failed to describe table '{}'", self.table))?;

        println!("{}", ui::render_table_detail(&info));
        println!("{}", ui::render_index_view(&info));

        Ok(())
    }
}
