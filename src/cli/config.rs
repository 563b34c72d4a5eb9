use std::{fs, path::Path};

use anyhow::Context;
use gherkin_split::Config;
use tracing::instrument;

use crate::cli::terminal::Style;

#[derive(Debug, clap::Parser)]
/// Show or initialise the configuration
///
/// Configuration is stored in .bdd/config.toml and controls how scenario
/// title labels map to tags, and which tags mark a scenario as
/// non-functional.
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show the effective configuration as TOML
    Show,

    /// Write the default configuration file
    Init,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => Self::show_config(config_path),
            ConfigCommand::Init => Self::init_config(config_path),
        }
    }

    fn show_config(config_path: &Path) -> anyhow::Result<()> {
        let config = super::load_config(config_path)?;

        if config_path.exists() {
            println!("{}", format!("# {}", config_path.display()).muted());
        } else {
            println!("{}", "# defaults (no config file)".muted());
        }
        print!("{}", config.to_toml()?);
        Ok(())
    }

    fn init_config(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!("Configuration already exists at {}", config_path.display());
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        Config::default().save(config_path)?;

        println!("{} {}", "Created".done(), config_path.display());
        Ok(())
    }
}
