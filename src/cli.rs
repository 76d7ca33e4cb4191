use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{BrowseCommand, CompletionsCommand, DescribeCommand, TablesCommand};
use crate::config::Config;

#[derive(Debug, Clone, Parser)]
#[command(name = "dynoscope", version, about = "Terminal browser for DynamoDB table schemas", long_about = None, arg_required_else_help = false)]
pub struct Cli {
    #[arg(
        short = 'p',
        long,
        global = true,
        help = "AWS profile name (overrides AWS_PROFILE)"
    )]
    pub profile: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Serve built-in demo data instead of connecting to DynamoDB"
    )]
    pub demo: bool,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Browse tables interactively (default)")]
    Browse(BrowseCommand),
    #[command(about = "List table names")]
    Tables(TablesCommand),
    #[command(about = "Print one table's schema")]
    Describe(DescribeCommand),
    #[command(about = "Generate shell completion scripts for dynoscope")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = Config::load();
        if let Some(profile) = self.profile {
            config.profile = profile;
        }

        let command = self.command.unwrap_or(Commands::Browse(BrowseCommand {}));

        match command {
            Commands::Browse(cmd) => cmd.execute(&config, self.demo).await,
            Commands::Tables(cmd) => cmd.execute(&config, self.demo).await,
            Commands::Describe(cmd) => cmd.execute(&config, self.demo).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}
