//! YAML export of a budget report

use std::io::Write;

use crate::error::{UpscaleError, UpscaleResult};
use crate::export::json::BudgetExport;
use crate::services::BudgetReport;

/// Export the report as YAML with a short comment header
pub fn export_budget_yaml<W: Write>(report: &BudgetReport, writer: &mut W) -> UpscaleResult<()> {
    let export = BudgetExport::new(report);
    let err = |e: std::io::Error| UpscaleError::Export(e.to_string());

    writeln!(writer, "# UpScale Budget Export").map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer, "# Amounts are in cents.").map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| UpscaleError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetStyle;
    use crate::models::{default_reference_ranges, BudgetForm};
    use crate::services::BudgetCalculator;

    #[test]
    fn test_yaml_export() {
        let ranges = default_reference_ranges();
        let mut form = BudgetForm::new();
        form.set_income("500");
        let report = BudgetCalculator::new(&ranges).report(&form, BudgetStyle::Student);

        let mut out = Vec::new();
        export_budget_yaml(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# UpScale Budget Export"));
        assert!(text.contains("style: student"));

        let body: String = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let value: serde_yaml::Value = serde_yaml::from_str(&body).unwrap();
        assert_eq!(value["report"]["totals"]["income"].as_i64(), Some(50000));
    }
}
