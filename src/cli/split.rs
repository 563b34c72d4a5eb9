use std::path::{Path, PathBuf};

use anyhow::Context;
use gherkin_split::{Config, OutputLayout, SplitReport, Splitter, extract_feature_text};
use tracing::instrument;

use super::terminal::Style;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// File holding the generator response (reads stdin if omitted or "-")
    ///
    /// Either a JSON object with a `feature_text` field, or the Gherkin
    /// document itself.
    input: Option<PathBuf>,

    /// Also write one combined, normalized file per feature into `bdd_tests`
    #[arg(long)]
    combined: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, root: &Path, config: &Config) -> anyhow::Result<()> {
        let body = super::read_input(self.input.as_deref())?;
        let document = extract_feature_text(&body);

        let mut config = config.clone();
        config.write_combined |= self.combined;

        let layout = OutputLayout::new(root);
        let report = Splitter::new(&config, layout.clone())
            .split(&document)
            .with_context(|| format!("failed to split features into {}", layout.base().display()))?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => output_table(&report, &layout),
        }

        Ok(())
    }
}

fn output_table(report: &SplitReport, layout: &OutputLayout) {
    if report.features == 0 {
        println!("{}", "No features found in input; nothing written.".caution());
        return;
    }

    println!(
        "Split {} {} into {}",
        report.features,
        plural(report.features, "feature"),
        layout.base().display()
    );
    println!(
        "  {:<16}{}",
        "functional:",
        format!("{} {}", report.functional, plural(report.functional, "scenario")).value()
    );
    println!(
        "  {:<16}{}",
        "non-functional:",
        format!(
            "{} {}",
            report.non_functional,
            plural(report.non_functional, "scenario")
        )
        .value()
    );
    if report.removed > 0 {
        println!(
            "  {}",
            format!("Removed {} stale {}", report.removed, plural(report.removed, "file")).muted()
        );
    }

    println!();
    for path in &report.written {
        let display = path
            .strip_prefix(layout.base())
            .unwrap_or(path)
            .display()
            .to_string();
        println!("  {} {display}", "✓".done());
    }

    if !report.unmapped_labels.is_empty() {
        let labels: Vec<_> = report.unmapped_labels.iter().map(String::as_str).collect();
        println!();
        println!(
            "{}",
            format!("Unmapped title labels (stripped, no tag): {}", labels.join(", ")).caution()
        );
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
