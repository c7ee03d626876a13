//! Export module for UpScale
//!
//! Writes a computed budget report in one of three formats:
//! - CSV: one row per category plus summary rows (spreadsheet-compatible)
//! - JSON: the full report with export metadata
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{UpscaleError, UpscaleResult};
use crate::services::BudgetReport;

pub use self::csv::export_budget_csv;
pub use self::json::{export_budget_json, BudgetExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_budget_yaml;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV, one row per category
    Csv,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Write `report` to any writer
pub fn write_budget_report<W: Write>(
    report: &BudgetReport,
    format: ExportFormat,
    writer: &mut W,
) -> UpscaleResult<()> {
    match format {
        ExportFormat::Csv => export_budget_csv(report, writer),
        ExportFormat::Json => export_budget_json(report, writer, true),
        ExportFormat::Yaml => export_budget_yaml(report, writer),
    }
}

/// Create `output` and write `report` into it
pub fn export_budget_to_file(
    report: &BudgetReport,
    format: ExportFormat,
    output: &Path,
) -> UpscaleResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            UpscaleError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(output).map_err(|e| {
        UpscaleError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_budget_report(report, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| UpscaleError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("budget.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out/b.yml")),
            Some(ExportFormat::Yaml)
        );
        assert_eq!(ExportFormat::from_path(&PathBuf::from("budget")), None);
    }
}
