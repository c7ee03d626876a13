//! JSON export of a budget report, with schema versioning

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{UpscaleError, UpscaleResult};
use crate::services::BudgetReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported document: the report plus metadata
#[derive(Debug, Clone, Serialize)]
pub struct BudgetExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub report: &'a BudgetReport,
}

impl<'a> BudgetExport<'a> {
    pub fn new(report: &'a BudgetReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export the report as JSON
pub fn export_budget_json<W: Write>(
    report: &BudgetReport,
    writer: &mut W,
    pretty: bool,
) -> UpscaleResult<()> {
    let export = BudgetExport::new(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| UpscaleError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| UpscaleError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetStyle;
    use crate::models::{default_reference_ranges, BudgetCategory, BudgetForm};
    use crate::services::BudgetCalculator;

    #[test]
    fn test_json_export() {
        let ranges = default_reference_ranges();
        let mut form = BudgetForm::new();
        form.set_income("2000");
        form.set(BudgetCategory::Groceries, "300");
        let report = BudgetCalculator::new(&ranges).report(&form, BudgetStyle::FiftyThirtyTwenty);

        let mut out = Vec::new();
        export_budget_json(&report, &mut out, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["report"]["style"], "50-30-20");
        assert_eq!(value["report"]["totals"]["needs"], 30000);
        assert_eq!(value["report"]["guideline"]["needs"], 100000);

        let groceries = value["report"]["lines"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["category"] == "groceries")
            .unwrap();
        assert_eq!(groceries["verdict"], "above");
    }
}
