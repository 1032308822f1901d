//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, describe::DescribeArgs,
    import::ImportArgs, units::UnitsArgs,
};
use crate::core::Config;

#[derive(Parser)]
#[command(name = "catdesc")]
#[command(author, version, about = "Canonical descriptions for electronic component catalogs")]
#[command(long_about = "Generates one deterministic, human-readable description string for each catalog component from its structured attributes.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate descriptions for attribute files (YAML or JSON)
    Describe(DescribeArgs),

    /// Generate descriptions for every row of a CSV file
    Import(ImportArgs),

    /// Show the unit and taper lookup tables
    Units(UnitsArgs),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Use the configured default (plain text for describe, tsv for tables)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Replace `Auto` with the configured default format, if any
    pub fn resolve(self, config: &Config) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        config
            .default_format
            .as_deref()
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_resolution() {
        let mut config = Config::default();
        assert_eq!(OutputFormat::Auto.resolve(&config), OutputFormat::Auto);
        assert_eq!(OutputFormat::Csv.resolve(&config), OutputFormat::Csv);

        config.default_format = Some("JSON".into());
        assert_eq!(OutputFormat::Auto.resolve(&config), OutputFormat::Json);
        assert_eq!(OutputFormat::Md.resolve(&config), OutputFormat::Md);

        config.default_format = Some("xml".into());
        assert_eq!(OutputFormat::Auto.resolve(&config), OutputFormat::Auto);
    }
}
