//! `catdesc import` command - Batch descriptions from CSV
//!
//! Each CSV row is one component. Header names match the attribute field
//! names of the YAML form (`type`, `category`, `ohms`, `ohms_unit`, ...),
//! case-insensitively, with the same aliases.

use clap::ValueEnum;
use console::style;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use miette::{Diagnostic, IntoDiagnostic, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use thiserror::Error;

use crate::cli::helpers::{pluralize, truncate_str};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::describe::{describe, units, Description, Kind};
use crate::entities::{AttributeError, ComponentAttributes};

/// A CSV column: canonical header first, then accepted aliases
type Column = &'static [&'static str];

const TYPE: Column = &["type", "type_name"];
const CATEGORY: Column = &["category", "category_name"];
const OHMS: Column = &["ohms"];
const OHMS_UNIT: Column = &["ohms_unit"];
const FARADS: Column = &["farads"];
const FARADS_UNIT: Column = &["farads_unit"];
const VOLTAGE_RATING: Column = &["voltage_rating"];
const TOLERANCE: Column = &["tolerance"];
const WATTAGE: Column = &["wattage"];
const MOUNTING_STYLE: Column = &["mounting_style"];
const SIZE: Column = &["size", "size_name"];
const MANUFACTURER: Column = &["manufacturer", "manufacturer_name"];
const PART_NO: Column = &["part_no", "manufacturer_part_no", "part"];
const POT_TAPER: Column = &["pot_taper"];
const POT_SHAFT_TYPE: Column = &["pot_shaft_type"];
const POT_SHAFT_MATERIAL: Column = &["pot_shaft_material"];
const POT_ANGLE_TYPE: Column = &["pot_angle_type"];
const POT_GANGS: Column = &["pot_gangs"];
const POT_MOUNTING_TYPE: Column = &["pot_mounting_type"];
const POT_SPLIT_SHAFT: Column = &["pot_split_shaft"];
const POT_SHAFT_DIAMETER: Column = &["pot_shaft_diameter"];
const POT_SHAFT_LENGTH: Column = &["pot_shaft_length"];
const POT_BASE_WIDTH: Column = &["pot_base_width"];

/// Template column order
const COLUMNS: &[Column] = &[
    TYPE,
    CATEGORY,
    OHMS,
    OHMS_UNIT,
    FARADS,
    FARADS_UNIT,
    VOLTAGE_RATING,
    TOLERANCE,
    WATTAGE,
    MOUNTING_STYLE,
    SIZE,
    MANUFACTURER,
    PART_NO,
    POT_TAPER,
    POT_SHAFT_TYPE,
    POT_SHAFT_MATERIAL,
    POT_ANGLE_TYPE,
    POT_GANGS,
    POT_MOUNTING_TYPE,
    POT_SPLIT_SHAFT,
    POT_SHAFT_DIAMETER,
    POT_SHAFT_LENGTH,
    POT_BASE_WIDTH,
];

const EXAMPLE_ROWS: &[&[&str]] = &[
    &[
        "Resistor", "Resistors", "10", "kΩ", "", "", "", "5%", "0.25W", "th", "", "Vishay",
        "MFR-25", "", "", "", "", "", "", "", "", "", "",
    ],
    &[
        "Potentiometer", "", "100", "kΩ", "", "", "", "", "", "", "", "Alpha", "RV16", "Logarithmic",
        "Knurled", "Metal", "Straight", "", "PCB Mount", "false", "6mm", "15mm", "",
    ],
];

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to read, or '-' for stdin
    #[arg(required_unless_present = "template")]
    pub file: Option<PathBuf>,

    /// Print a CSV header template and exit
    #[arg(long)]
    pub template: bool,

    /// Continue past rows that fail to parse or validate
    #[arg(long)]
    pub skip_errors: bool,

    /// Sort rows by field
    #[arg(long, default_value = "row")]
    pub sort: SortField,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only the number of described rows
    #[arg(long)]
    pub count: bool,

    /// Write the output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Sort order for imported rows
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortField {
    /// Original CSV order
    Row,
    /// Component type name
    Type,
    /// Electrical value scaled to its base unit
    Value,
    /// Generated description
    Description,
}

/// Why a single CSV row could not be described
#[derive(Debug, Error, Diagnostic)]
pub enum RowError {
    #[error("`{field}` is not a number: '{value}'")]
    #[diagnostic(code(catdesc::import::invalid_number))]
    InvalidNumber { field: &'static str, value: String },

    #[error("`{field}`: {message}")]
    #[diagnostic(code(catdesc::import::invalid_value))]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Attribute(#[from] AttributeError),

    #[error("CSV parse error: {0}")]
    #[diagnostic(code(catdesc::import::csv))]
    Csv(#[from] csv::Error),
}

/// A successfully described row
#[derive(Debug)]
pub struct ImportedRow {
    /// 1-based line number in the CSV, counting the header
    pub row: usize,
    pub attrs: ComponentAttributes,
    pub description: Description,
}

/// Import statistics
#[derive(Debug, Default)]
pub struct ImportStats {
    pub rows_processed: usize,
    pub described: usize,
    pub errors: usize,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        return generate_template();
    }

    let config = Config::load();
    let skip_errors = args.skip_errors || config.skip_errors();
    let file = args
        .file
        .clone()
        .ok_or_else(|| miette::miette!("No CSV file given"))?;

    let reader: Box<dyn Read> = if file.as_os_str() == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(BufReader::new(File::open(&file).map_err(|e| {
            miette::miette!("Failed to open {}: {}", file.display(), e)
        })?))
    };

    let (mut rows, stats) = read_rows(reader, config.csv_delimiter(), skip_errors)?;
    debug!(
        "Processed {} from {}, {} described",
        pluralize(stats.rows_processed, "row"),
        file.display(),
        stats.described
    );

    sort_rows(&mut rows, args.sort);
    if args.reverse {
        rows.reverse();
    }
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }

    let format = match global.format.resolve(&config) {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    let mut table = Table::new(&["row", "type", "kind", "description"]);
    for row in &rows {
        table.push([
            row.row.to_string(),
            row.attrs.type_name.clone(),
            row.description.kind.to_string(),
            row.description.text.clone(),
        ]);
    }
    let rendered = table.render(format, config.csv_delimiter())?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).into_diagnostic()?;
            if !global.quiet {
                println!(
                    "{} Wrote {} to {}",
                    style("✓").green(),
                    pluralize(table.len(), "description"),
                    style(path.display()).cyan()
                );
            }
        }
        None => print!("{}", rendered),
    }

    if !global.quiet && stats.errors > 0 {
        eprintln!(
            "{} Described {}, skipped {}",
            style("!").yellow(),
            pluralize(stats.described, "row"),
            pluralize(stats.errors, "invalid row")
        );
    }

    Ok(())
}

/// Parse and describe every row of a CSV stream
pub fn read_rows<R: Read>(
    reader: R,
    delimiter: u8,
    skip_errors: bool,
) -> Result<(Vec<ImportedRow>, ImportStats)> {
    let mut stats = ImportStats::default();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);
    if lookup(&header_map, TYPE).is_none() {
        return Err(miette::miette!(
            help = "Run `catdesc import --template` for the expected columns",
            "CSV has no `type` column"
        ));
    }

    let mut rows = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        stats.rows_processed += 1;

        let parsed = result
            .map_err(RowError::from)
            .and_then(|record| parse_record(&record, &header_map));

        match parsed {
            Ok(attrs) => {
                let description = describe(&attrs);
                rows.push(ImportedRow {
                    row: row_num,
                    attrs,
                    description,
                });
                stats.described += 1;
            }
            Err(e) => {
                stats.errors += 1;
                if !skip_errors {
                    return Err(miette::Report::new(e).wrap_err(format!("Row {} is invalid", row_num)));
                }
                warn!("Skipping row {}: {}", row_num, truncate_str(&e.to_string(), 120));
            }
        }
    }

    Ok((rows, stats))
}

/// Build a map from header name to column index
pub fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

fn lookup(header_map: &HashMap<String, usize>, column: Column) -> Option<usize> {
    column.iter().find_map(|name| header_map.get(*name).copied())
}

/// Get a non-empty field value by canonical column name or alias
fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: Column,
) -> Option<String> {
    lookup(header_map, column)
        .and_then(|idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    column: Column,
    value: Option<String>,
) -> Result<Option<T>, RowError> {
    value
        .map(|v| {
            v.parse::<T>().map_err(|_| RowError::InvalidNumber {
                field: column[0],
                value: v.clone(),
            })
        })
        .transpose()
}

fn parse_enum<T: std::str::FromStr<Err = String>>(
    column: Column,
    value: Option<String>,
) -> Result<Option<T>, RowError> {
    value
        .map(|v| {
            v.parse::<T>().map_err(|message| RowError::InvalidValue {
                field: column[0],
                message,
            })
        })
        .transpose()
}

fn parse_flag(column: Column, value: Option<String>) -> Result<bool, RowError> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("false" | "no" | "n" | "0") => Ok(false),
        Some("true" | "yes" | "y" | "1") => Ok(true),
        Some(other) => Err(RowError::InvalidValue {
            field: column[0],
            message: format!("expected true or false, got '{}'", other),
        }),
    }
}

/// Turn one CSV record into a validated attribute set
pub fn parse_record(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<ComponentAttributes, RowError> {
    let field = |column: Column| get_field(record, header_map, column);

    let attrs = ComponentAttributes {
        type_name: field(TYPE).unwrap_or_default(),
        category_name: field(CATEGORY),
        ohms: parse_number(OHMS, field(OHMS))?,
        ohms_unit: field(OHMS_UNIT),
        farads: parse_number(FARADS, field(FARADS))?,
        farads_unit: field(FARADS_UNIT),
        voltage_rating: field(VOLTAGE_RATING),
        tolerance: field(TOLERANCE),
        wattage: field(WATTAGE),
        mounting_style: parse_enum(MOUNTING_STYLE, field(MOUNTING_STYLE))?,
        size_name: field(SIZE),
        manufacturer_name: field(MANUFACTURER),
        manufacturer_part_no: field(PART_NO),
        pot_taper: field(POT_TAPER).map(Into::into),
        pot_shaft_type: field(POT_SHAFT_TYPE),
        pot_shaft_material: parse_enum(POT_SHAFT_MATERIAL, field(POT_SHAFT_MATERIAL))?,
        pot_angle_type: parse_enum(POT_ANGLE_TYPE, field(POT_ANGLE_TYPE))?,
        pot_gangs: parse_number(POT_GANGS, field(POT_GANGS))?,
        pot_mounting_type: field(POT_MOUNTING_TYPE),
        pot_split_shaft: parse_flag(POT_SPLIT_SHAFT, field(POT_SPLIT_SHAFT))?,
        pot_shaft_diameter: field(POT_SHAFT_DIAMETER),
        pot_shaft_length: field(POT_SHAFT_LENGTH),
        pot_base_width: field(POT_BASE_WIDTH),
        description: None,
    };

    attrs.validate()?;
    Ok(attrs)
}

/// Electrical value in base units (ohms or farads), if any
fn base_value(attrs: &ComponentAttributes) -> Option<f64> {
    attrs
        .resistance()
        .or_else(|| attrs.capacitance())
        .and_then(|(magnitude, unit)| units::to_base(magnitude, unit))
}

fn kind_rank(kind: Kind) -> u8 {
    match kind {
        Kind::Resistor => 0,
        Kind::Capacitor => 1,
        Kind::Potentiometer => 2,
        Kind::Generic => 3,
    }
}

/// Sort rows in place; valueless rows sort after valued ones
pub fn sort_rows(rows: &mut [ImportedRow], field: SortField) {
    match field {
        SortField::Row => rows.sort_by_key(|r| r.row),
        SortField::Type => rows.sort_by(|a, b| a.attrs.type_name.cmp(&b.attrs.type_name)),
        SortField::Description => rows.sort_by(|a, b| a.description.text.cmp(&b.description.text)),
        SortField::Value => rows.sort_by(|a, b| {
            let (va, vb) = (base_value(&a.attrs), base_value(&b.attrs));
            va.is_none()
                .cmp(&vb.is_none())
                .then(kind_rank(a.description.kind).cmp(&kind_rank(b.description.kind)))
                .then(match (va, vb) {
                    (Some(x), Some(y)) => x.total_cmp(&y),
                    _ => Ordering::Equal,
                })
                .then(a.row.cmp(&b.row))
        }),
    }
}

/// Print a CSV header template with example rows
pub fn generate_template() -> Result<()> {
    let headers: Vec<&str> = COLUMNS.iter().map(|names| names[0]).collect();

    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(&headers).into_diagnostic()?;
    for example in EXAMPLE_ROWS {
        writer.write_record(*example).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    // Usage hint on stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: catdesc import --template > parts.csv",
        style("→").blue(),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Type,Category,Ohms,Ohms_Unit,Farads,Farads_Unit,Wattage,Tolerance,Manufacturer,Part_No
Resistor,Resistor,10,kΩ,,,0.5W,5%,Vishay,ABC123
Capacitor,,,,100,nF,,,,
Resistor,,470,Ω,,,,,,
Jack,Jack,,,,,,,Neutrik,JACK123
";

    #[test]
    fn test_read_rows_describes_each_row() {
        let (rows, stats) = read_rows(CSV.as_bytes(), b',', false).unwrap();
        assert_eq!(stats.rows_processed, 4);
        assert_eq!(stats.errors, 0);
        assert_eq!(rows[0].row, 2);
        assert_eq!(
            rows[0].description.text,
            "10kΩ Resistor 0.5W 5% Tolerance by Vishay (Part No: ABC123)"
        );
        assert_eq!(rows[1].description.text, "100nF Capacitor");
        assert_eq!(rows[3].description.text, "Jack by Neutrik (Part No: JACK123)");
    }

    #[test]
    fn test_sort_by_value() {
        let (mut rows, _) = read_rows(CSV.as_bytes(), b',', false).unwrap();
        sort_rows(&mut rows, SortField::Value);
        let order: Vec<usize> = rows.iter().map(|r| r.row).collect();
        // 470Ω < 10kΩ, then the capacitor, then the valueless jack
        assert_eq!(order, vec![4, 2, 3, 5]);
    }

    #[test]
    fn test_invalid_row_fails_without_skip() {
        let csv = "type,ohms\nResistor,ten\n";
        let err = read_rows(csv.as_bytes(), b',', false).unwrap_err();
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let csv = "type,ohms,ohms_unit,mounting_style\nResistor,10,,\nJack,,,th\nFuse,,,glue\n";
        let (rows, stats) = read_rows(csv.as_bytes(), b',', true).unwrap();
        assert_eq!(stats.errors, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description.text, "Jack (Through Hole)");
    }

    #[test]
    fn test_missing_type_column() {
        let csv = "category,ohms\nResistors,10\n";
        assert!(read_rows(csv.as_bytes(), b',', true).is_err());
    }

    #[test]
    fn test_potentiometer_row_with_aliases() {
        let csv = "type,ohms,ohms_unit,pot_taper,pot_split_shaft,part\nPotentiometer,250,kΩ,Linear,no,P1\n";
        let (rows, _) = read_rows(csv.as_bytes(), b',', false).unwrap();
        assert_eq!(rows[0].description.kind, Kind::Potentiometer);
        assert_eq!(rows[0].description.text, "B250K Linear (Part No: P1)");
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = "type;size;wattage\nResistor;0805;0.125\n";
        let (rows, _) = read_rows(csv.as_bytes(), b';', false).unwrap();
        assert_eq!(rows[0].description.text, "Resistor 0805 0.125W");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(POT_SPLIT_SHAFT, Some("Yes".into())).unwrap());
        assert!(!parse_flag(POT_SPLIT_SHAFT, None).unwrap());
        assert!(parse_flag(POT_SPLIT_SHAFT, Some("perhaps".into())).is_err());
    }

    #[test]
    fn test_template_header_parses_every_column() {
        let headers: Vec<&str> = COLUMNS.iter().map(|column| column[0]).collect();
        let header_map = build_header_map(&StringRecord::from(headers));
        let record = StringRecord::from(EXAMPLE_ROWS[1].to_vec());
        let attrs = parse_record(&record, &header_map).unwrap();
        assert_eq!(attrs.manufacturer_part_no.as_deref(), Some("RV16"));
        assert_eq!(attrs.pot_shaft_length.as_deref(), Some("15mm"));
        assert_eq!(attrs.pot_mounting_type.as_deref(), Some("PCB Mount"));

        // Aliases resolve to the same columns
        let header_map = build_header_map(&StringRecord::from(vec!["type_name", "part"]));
        let record = StringRecord::from(vec!["Relay", "G5V"]);
        let attrs = parse_record(&record, &header_map).unwrap();
        assert_eq!(attrs.type_name, "Relay");
        assert_eq!(attrs.manufacturer_part_no.as_deref(), Some("G5V"));
    }

    #[test]
    fn test_template_columns_match_examples() {
        for example in EXAMPLE_ROWS {
            assert_eq!(example.len(), COLUMNS.len());
        }
    }
}
