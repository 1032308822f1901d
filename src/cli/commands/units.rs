//! `catdesc units` command - Lookup tables used when formatting values

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::json;

use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::describe::units::{self, DEFAULT_TAPER_CODE};

#[derive(clap::Args, Debug)]
pub struct UnitsArgs {
    /// Show only the taper code table
    #[arg(long, conflicts_with = "units_only")]
    pub tapers_only: bool,

    /// Show only the unit alias table
    #[arg(long)]
    pub units_only: bool,
}

pub fn run(args: UnitsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    let mut tapers = Table::new(&["taper", "code"]);
    for (name, code) in units::taper_table() {
        tapers.push([name.to_string(), code.to_string()]);
    }

    let mut unit_rows = Table::new(&["unit", "canonical", "exponent"]);
    for (alias, canonical, exponent) in units::unit_table() {
        unit_rows.push([alias.to_string(), canonical.to_string(), exponent.to_string()]);
    }

    let show_tapers = !args.units_only;
    let show_units = !args.tapers_only;

    match global.format.resolve(&config) {
        format @ (OutputFormat::Json | OutputFormat::Yaml) => {
            let mut value = json!({});
            if show_tapers {
                value["tapers"] = json!(tapers.to_records());
            }
            if show_units {
                value["units"] = json!(unit_rows.to_records());
            }
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
            } else {
                print!("{}", serde_yml::to_string(&value).into_diagnostic()?);
            }
        }
        OutputFormat::Auto => {
            if show_tapers {
                println!("{}", style("Taper codes").bold());
                print!("{}", tapers.render(OutputFormat::Tsv, b',')?);
                if !global.quiet {
                    println!(
                        "{}",
                        style(format!("Unrecognized tapers use {}", DEFAULT_TAPER_CODE)).dim()
                    );
                }
            }
            if show_tapers && show_units {
                println!();
            }
            if show_units {
                println!("{}", style("Units").bold());
                print!("{}", unit_rows.render(OutputFormat::Tsv, b',')?);
            }
        }
        format => {
            if show_tapers {
                print!("{}", tapers.render(format, config.csv_delimiter())?);
            }
            if show_units {
                print!("{}", unit_rows.render(format, config.csv_delimiter())?);
            }
        }
    }

    Ok(())
}
