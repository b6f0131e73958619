//! `generate` command group.

use clap::{Args, Subcommand};
use sobject_core::{config::AppConfig, AppResult};

use super::{FieldCommand, TabCommand};

/// Generate local metadata files
#[derive(Args, Debug)]
pub struct GenerateCommand {
    #[command(subcommand)]
    pub action: GenerateAction,
}

#[derive(Subcommand, Debug)]
pub enum GenerateAction {
    /// Generate metadata source files
    Metadata(MetadataCommand),
}

/// Generate metadata source files
#[derive(Args, Debug)]
pub struct MetadataCommand {
    #[command(subcommand)]
    pub action: MetadataAction,
}

#[derive(Subcommand, Debug)]
pub enum MetadataAction {
    /// Generate a custom field, including lookup and master-detail relationships
    Field(FieldCommand),
    /// Generate a custom tab for a custom object
    Tab(TabCommand),
}

impl GenerateCommand {
    pub fn name(&self) -> &'static str {
        match &self.action {
            GenerateAction::Metadata(cmd) => match cmd.action {
                MetadataAction::Field(_) => "generate metadata field",
                MetadataAction::Tab(_) => "generate metadata tab",
            },
        }
    }

    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            GenerateAction::Metadata(cmd) => match &cmd.action {
                MetadataAction::Field(field) => field.execute(config).await,
                MetadataAction::Tab(tab) => tab.execute().await,
            },
        }
    }
}
