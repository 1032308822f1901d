//! `catdesc describe` command - Descriptions for attribute files

use console::style;
use log::debug;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::pluralize;
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{AttributeDocument, Config};
use crate::describe::{describe, Description};

#[derive(clap::Args, Debug)]
pub struct DescribeArgs {
    /// Attribute file (YAML or JSON), or '-' to read stdin
    pub file: PathBuf,

    /// Show the kind and individual clauses of each description
    #[arg(long, short = 'x')]
    pub explain: bool,

    /// Store the generated descriptions back into the file
    #[arg(long, short = 'w')]
    pub write: bool,
}

/// Structured output record
#[derive(Debug, Serialize)]
struct DescribedEntry<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    #[serde(flatten)]
    description: &'a Description,
}

pub fn run(args: DescribeArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut doc = AttributeDocument::load(&args.file)?;

    for (idx, attrs) in doc.entries.iter().enumerate() {
        attrs.validate().map_err(|e| {
            miette::Report::new(e).wrap_err(format!(
                "Component {} in {} is invalid",
                idx + 1,
                args.file.display()
            ))
        })?;
    }

    let descriptions: Vec<Description> = doc.entries.iter().map(describe).collect();
    debug!("Generated {}", pluralize(descriptions.len(), "description"));

    if args.write {
        for (attrs, desc) in doc.entries.iter_mut().zip(&descriptions) {
            attrs.description = Some(desc.text.clone());
        }
        doc.save()?;
        if !global.quiet {
            println!(
                "{} Updated {} in {}",
                style("✓").green(),
                pluralize(descriptions.len(), "description"),
                style(args.file.display()).cyan()
            );
        }
        return Ok(());
    }

    let entries: Vec<DescribedEntry> = doc
        .entries
        .iter()
        .zip(&descriptions)
        .map(|(attrs, description)| DescribedEntry {
            type_name: &attrs.type_name,
            description,
        })
        .collect();

    match global.format.resolve(&config) {
        OutputFormat::Auto => {
            for entry in &entries {
                if args.explain {
                    print_explained(entry);
                } else {
                    println!("{}", entry.description.text);
                }
            }
        }
        OutputFormat::Json => {
            let json = if doc.is_list {
                serde_json::to_string_pretty(&entries)
            } else {
                serde_json::to_string_pretty(&entries[0])
            }
            .into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = if doc.is_list {
                serde_yml::to_string(&entries)
            } else {
                serde_yml::to_string(&entries[0])
            }
            .into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let mut table = Table::new(&["type", "kind", "description"]);
            for entry in &entries {
                table.push([
                    entry.type_name.to_string(),
                    entry.description.kind.to_string(),
                    entry.description.text.clone(),
                ]);
            }
            print!("{}", table.render(format, config.csv_delimiter())?);
        }
    }

    Ok(())
}

fn print_explained(entry: &DescribedEntry) {
    println!("{}", style(&entry.description.text).bold());
    println!("  {} {}", style("type:").dim(), entry.type_name);
    println!("  {} {}", style("kind:").dim(), entry.description.kind);
    for (i, clause) in entry.description.clauses.iter().enumerate() {
        println!("  {} {}", style(format!("{}.", i + 1)).dim(), clause);
    }
}
