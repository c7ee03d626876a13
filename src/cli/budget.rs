//! Budget CLI commands
//!
//! Computes a budget report from an income and `category=amount` pairs,
//! optionally exporting it.

use std::path::PathBuf;

use clap::Subcommand;

use crate::activity::ActivityKind;
use crate::config::BudgetStyle;
use crate::display::{
    format_budget_charts, format_budget_report, format_range_chart, format_reference_ranges,
};
use crate::error::UpscaleResult;
use crate::export::{export_budget_to_file, ExportFormat};
use crate::models::{BudgetCategory, BudgetForm, BudgetGroup};
use crate::services::BudgetCalculator;

use super::CliContext;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Calculate totals, verdicts and the guideline split
    #[command(alias = "calculate")]
    Calc {
        /// Monthly income (e.g., "1500" or "1500.00")
        #[arg(short, long)]
        income: Option<String>,

        /// Spending as CATEGORY=AMOUNT (e.g., housing=750 diningOut=80)
        #[arg(value_name = "CATEGORY=AMOUNT")]
        entries: Vec<String>,

        /// Budget style (defaults to the configured style)
        #[arg(short, long, value_enum)]
        style: Option<BudgetStyle>,

        /// Also print the chart data
        #[arg(long)]
        charts: bool,

        /// Write the report to this file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Export format (defaults to the file extension, then CSV)
        #[arg(short, long, value_enum, requires = "export")]
        format: Option<ExportFormat>,
    },

    /// Show the typical monthly ranges used for verdicts
    Ranges,

    /// List the budget categories and their keys
    Categories,
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &CliContext, cmd: BudgetCommands) -> UpscaleResult<()> {
    match cmd {
        BudgetCommands::Calc {
            income,
            entries,
            style,
            charts,
            export,
            format,
        } => {
            let mut form = BudgetForm::new();
            if let Some(income) = income {
                form.set_income(income);
            }
            for entry in &entries {
                form.apply_assignment(entry)?;
            }

            let style = style.unwrap_or(ctx.settings.budget_style);
            let calculator = BudgetCalculator::new(&ctx.settings.reference_ranges);
            let report = calculator.report(&form, style);
            let symbol = &ctx.settings.currency_symbol;

            print!("{}", format_budget_report(&report, symbol));

            if charts {
                println!();
                print!("{}", format_budget_charts(&report, symbol));
                if style == BudgetStyle::Student {
                    println!();
                    print!("{}", format_range_chart(&calculator.range_rows(&form)));
                }
            }

            if let Some(output) = export {
                let format = format
                    .or_else(|| ExportFormat::from_path(&output))
                    .unwrap_or(ExportFormat::Csv);
                export_budget_to_file(&report, format, &output)?;
                ctx.log.record(
                    ActivityKind::BudgetExported,
                    output.display().to_string(),
                    Some(format!("{:?}", format).to_lowercase()),
                );
                println!();
                println!("Budget exported to: {}", output.display());
            }

            Ok(())
        }

        BudgetCommands::Ranges => {
            print!("{}", format_reference_ranges(&ctx.settings.reference_ranges));
            Ok(())
        }

        BudgetCommands::Categories => {
            for group in BudgetGroup::ALL {
                println!("{}", group.label());
                for category in BudgetCategory::in_group(group) {
                    println!(
                        "  {:<16} {:<18} {}",
                        category.key(),
                        category.label(),
                        category.hint()
                    );
                }
            }
            Ok(())
        }
    }
}
