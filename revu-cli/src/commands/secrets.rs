//! Secrets command - Manage the secrets file

use clap::{Args, Subcommand};
use revu_core::Secrets;

/// Arguments for the secrets command
#[derive(Args, Debug)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Create a secrets template with owner-only permissions
    Init,

    /// Show which secrets are configured (values are never printed)
    Status,
}

impl SecretsArgs {
    /// Execute the secrets command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            SecretsCommand::Init => {
                let path = Secrets::create_template()?;
                println!("Created secrets template at {}", path.display());
                println!("Edit it to add your GitHub token and Anthropic API key.");
            }
            SecretsCommand::Status => {
                let secrets = Secrets::load()?;
                println!(
                    "GitHub token: {}",
                    configured(secrets.github_token().is_some())
                );
                println!(
                    "Anthropic API key: {}",
                    configured(secrets.anthropic_api_key().is_some())
                );
                if let Some(path) = Secrets::default_secrets_path() {
                    println!("Secrets file: {}", path.display());
                }
            }
        }

        Ok(())
    }
}

fn configured(present: bool) -> &'static str {
    if present {
        "configured"
    } else {
        "missing"
    }
}
