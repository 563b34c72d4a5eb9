use std::path::PathBuf;

use gherkin_split::{Config, Normalizer};
use tracing::instrument;

use super::terminal::Style;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// File holding one scenario block (reads stdin if omitted or "-")
    input: Option<PathBuf>,

    /// Print only the normalized text
    #[arg(long, short)]
    quiet: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let text = super::read_input(self.input.as_deref())?;
        let scenario = Normalizer::new(config).normalize(&text);

        println!("{}", scenario.text.trim_end());
        if self.quiet {
            return Ok(());
        }

        let tags: Vec<_> = scenario.tags.iter().map(ToString::to_string).collect();
        let classification = config.classify(&scenario.tags);

        println!();
        println!("{} {}", "tags:".muted(), tags.join(" ").value());
        println!("{} {}", "classification:".muted(), classification.to_string().value());
        if let Some(label) = &scenario.unmapped_label {
            println!(
                "{}",
                format!("label '{label}' was stripped but maps to no tag").caution()
            );
        }

        Ok(())
    }
}
