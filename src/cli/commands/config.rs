//! `catdesc config` command - Configuration management
//!
//! Settings live in two files: the global user config and the nearest
//! `.catdesc.yaml` above the working directory. Environment variables
//! override both.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::{CONFIG_KEYS, LOCAL_CONFIG_FILE};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (see `catdesc config keys`)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of the local file
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the local file
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        check_key(key)?;
        return match config.get(key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in CONFIG_KEYS {
        match config.get(key) {
            Some(v) => println!("  {}: {}", style(key).cyan(), style(v).yellow()),
            None => println!("  {}: {}", style(key).cyan(), style("(not set)").dim()),
        }
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (CATDESC_FORMAT, CATDESC_SKIP_ERRORS)");
    println!("  2. Local config ({})", LOCAL_CONFIG_FILE);
    println!("  3. Global config (~/.config/catdesc/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let path = target_path(args.global)?;

    let mut config = Config::read_for_update(&path)?;
    config.set(&args.key, &args.value).map_err(|e| miette::miette!("{}", e))?;
    write_config(&path, &config)?;

    if !global.quiet {
        println!(
            "{} Set {} {} {} in {}",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow(),
            path.display()
        );
    }

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let path = target_path(args.global)?;

    if !path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            path.display()
        ));
    }

    let mut config = Config::read_for_update(&path)?;
    if config.get(&args.key).is_none() {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }
    config.unset(&args.key).map_err(|e| miette::miette!("{}", e))?;
    write_config(&path, &config)?;

    if !global.quiet {
        println!(
            "{} Removed {} from {}",
            style("✓").green(),
            style(&args.key).cyan(),
            path.display()
        );
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let global_path = global_config_path()?;
    let local_path = local_config_path()?;

    println!("{}", style("Configuration file paths:").bold());
    println!();
    for (label, path) in [("Global:", global_path), ("Local: ", local_path)] {
        let status = if path.exists() {
            style("(exists)").green()
        } else {
            style("(not created)").dim()
        };
        println!("  {} {} {}", style(label).cyan(), path.display(), status);
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in CONFIG_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'catdesc config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

fn check_key(key: &str) -> Result<()> {
    if CONFIG_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "Run `catdesc config keys` to list valid keys",
            "Unknown config key: {}",
            key
        ))
    }
}

fn target_path(global: bool) -> Result<PathBuf> {
    if global {
        global_config_path()
    } else {
        local_config_path()
    }
}

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

/// Nearest existing local config, or a new one in the working directory
fn local_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(Config::discover_local(&cwd).unwrap_or_else(|| cwd.join(LOCAL_CONFIG_FILE)))
}

fn write_config(path: &PathBuf, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(config).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()
}
