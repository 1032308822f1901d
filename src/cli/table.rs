//! Tabular output in the supported formats
//!
//! Commands build a [`Table`] of plain string cells and render it in the
//! format chosen with `--format`. `Auto` renders as TSV.

use miette::{IntoDiagnostic, Result};
use serde_json::{Map, Value};
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

/// A header row plus string cells
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing cells are rendered empty
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as JSON objects keyed by header
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let map: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.to_string(), Value::String(v.clone())))
                    .collect();
                Value::Object(map)
            })
            .collect()
    }

    /// Render the table
    pub fn render(&self, format: OutputFormat, delimiter: u8) -> Result<String> {
        match format {
            OutputFormat::Auto | OutputFormat::Tsv => Ok(self.format_tsv()),
            OutputFormat::Csv => self.format_csv(delimiter),
            OutputFormat::Md => Ok(self.format_md()),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(&self.to_records()).into_diagnostic()?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => serde_yml::to_string(&self.to_records()).into_diagnostic(),
        }
    }

    fn format_tsv(&self) -> String {
        let mut out = self.headers.join("\t");
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| c.replace(['\t', '\n'], " ")).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    fn format_csv(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        writer.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            writer.write_record(row).into_diagnostic()?;
        }
        let bytes = writer.into_inner().map_err(|e| miette::miette!("{}", e))?;
        String::from_utf8(bytes).into_diagnostic()
    }

    fn format_md(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().copied());
        for row in &self.rows {
            builder.push_record(row.iter().map(|c| c.replace('|', "\\|")));
        }
        let mut table = builder.build();
        table.with(Style::markdown());
        let mut out = table.to_string();
        out.push('\n');
        out
    }
}
