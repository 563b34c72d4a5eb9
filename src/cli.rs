use std::{
    io::Read,
    path::{Path, PathBuf},
};

mod config;
mod normalize;
mod split;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use gherkin_split::Config;

/// Location of the configuration file, relative to the workspace root.
const CONFIG_PATH: &str = ".bdd/config.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the workspace root
    ///
    /// Feature files are written below `<root>/bdd_tests`.
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Configuration file to use instead of `<root>/.bdd/config.toml`
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self
            .config
            .unwrap_or_else(|| self.root.join(CONFIG_PATH));

        self.command.run(&self.root, &config_path)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Split a generated Gherkin document into feature files
    ///
    /// Scenarios are routed into `bdd_tests/functional` or
    /// `bdd_tests/non_functional` by their tags. Existing `.feature` files in
    /// those directories are deleted first.
    Split(split::Command),

    /// Normalize a single scenario and show its tags
    Normalize(normalize::Command),

    /// Show or initialise the configuration
    Config(config::Command),
}

impl Command {
    fn run(self, root: &Path, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Split(command) => command.run(root, &load_config(config_path)?)?,
            Self::Normalize(command) => command.run(&load_config(config_path)?)?,
            Self::Config(command) => command.run(config_path)?,
        }
        Ok(())
    }
}

/// Loads the configuration, falling back to the defaults if there is no
/// configuration file.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!(
            "No config file at {}, using default configuration",
            path.display()
        );
        return Ok(Config::default());
    }

    let config = Config::load(path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Reads command input from a file, or from stdin if the path is absent or
/// `-`.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_config_uses_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_PATH)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "_version = \"1\"\nnon_functional = \"@security\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn read_input_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("response.txt");
        fs::write(&path, "Feature: X\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "Feature: X\n");
    }

    #[test]
    fn parses_split_command() {
        let cli = Cli::try_parse_from([
            "gherkin-split",
            "-vv",
            "--root",
            "workspace",
            "split",
            "response.json",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("workspace"));
        assert!(matches!(cli.command, Command::Split(_)));
    }
}
