//! Budget form model
//!
//! The budget builder works on a fixed set of spending categories split into
//! needs, wants and savings. Form fields hold raw text exactly as typed; they
//! are only coerced to money when totals are derived.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::UpscaleError;

/// The three partitions a budget category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetGroup {
    Needs,
    Wants,
    Savings,
}

impl BudgetGroup {
    pub const ALL: [BudgetGroup; 3] = [Self::Needs, Self::Wants, Self::Savings];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
        }
    }

    /// Share of income the 50/30/20 guideline assigns to this group
    pub fn guideline_percent(&self) -> i64 {
        match self {
            Self::Needs => 50,
            Self::Wants => 30,
            Self::Savings => 20,
        }
    }
}

impl fmt::Display for BudgetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A budget line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetCategory {
    Housing,
    Utilities,
    Groceries,
    Transportation,
    Phone,
    Medical,
    Books,
    DiningOut,
    Entertainment,
    Subscriptions,
    Shopping,
    Emergency,
    Investing,
    SavingsGoal,
}

impl BudgetCategory {
    /// Every category in form order
    pub const ALL: [BudgetCategory; 14] = [
        Self::Housing,
        Self::Utilities,
        Self::Groceries,
        Self::Transportation,
        Self::Phone,
        Self::Medical,
        Self::Books,
        Self::DiningOut,
        Self::Entertainment,
        Self::Subscriptions,
        Self::Shopping,
        Self::Emergency,
        Self::Investing,
        Self::SavingsGoal,
    ];

    pub fn group(&self) -> BudgetGroup {
        match self {
            Self::Housing
            | Self::Utilities
            | Self::Groceries
            | Self::Transportation
            | Self::Phone
            | Self::Medical
            | Self::Books => BudgetGroup::Needs,
            Self::DiningOut | Self::Entertainment | Self::Subscriptions | Self::Shopping => {
                BudgetGroup::Wants
            }
            Self::Emergency | Self::Investing | Self::SavingsGoal => BudgetGroup::Savings,
        }
    }

    /// Categories belonging to one group, in form order
    pub fn in_group(group: BudgetGroup) -> impl Iterator<Item = BudgetCategory> {
        Self::ALL.into_iter().filter(move |c| c.group() == group)
    }

    /// Stable key used in files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Groceries => "groceries",
            Self::Transportation => "transportation",
            Self::Phone => "phone",
            Self::Medical => "medical",
            Self::Books => "books",
            Self::DiningOut => "diningOut",
            Self::Entertainment => "entertainment",
            Self::Subscriptions => "subscriptions",
            Self::Shopping => "shopping",
            Self::Emergency => "emergency",
            Self::Investing => "investing",
            Self::SavingsGoal => "savingsGoal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing (rent)",
            Self::Utilities => "Utilities",
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Phone => "Phone / Internet",
            Self::Medical => "Medical",
            Self::Books => "Books & Supplies",
            Self::DiningOut => "Dining Out",
            Self::Entertainment => "Entertainment",
            Self::Subscriptions => "Subscriptions",
            Self::Shopping => "Shopping / Misc",
            Self::Emergency => "Emergency Fund",
            Self::Investing => "Investing",
            Self::SavingsGoal => "Savings Goal",
        }
    }

    /// Short label for chart axes
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Transportation => "Transport",
            Self::Entertainment => "Fun",
            Self::Housing => "Housing",
            Self::Books => "Books",
            _ => self.label(),
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Housing => "Off-campus rent + fees",
            Self::Utilities => "Power, water, trash",
            Self::Groceries => "Food you cook",
            Self::Transportation => "Gas, bus, parking",
            Self::Phone => "Phone or internet",
            Self::Medical => "Copays, meds",
            Self::Books => "Textbooks, fees",
            Self::DiningOut => "Restaurants, coffee",
            Self::Entertainment => "Movies, events, fun",
            Self::Subscriptions => "Spotify, Netflix",
            Self::Shopping => "Clothes, random buys",
            Self::Emergency => "Start with $25-$50",
            Self::Investing => "Paper trading practice",
            Self::SavingsGoal => "Tuition, trip, laptop",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BudgetCategory {
    type Err = UpscaleError;

    /// Accepts the key in any case, with or without `-`/`_` separators
    /// ("diningOut", "dining-out", "DINING_OUT").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|c| c.key().to_lowercase() == wanted)
            .ok_or_else(|| UpscaleError::category_not_found(s))
    }
}

/// Typical spending band for a category, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBand {
    pub min: Money,
    pub max: Money,
}

impl RangeBand {
    pub const fn dollars(min: i64, max: i64) -> Self {
        Self {
            min: Money::from_dollars(min),
            max: Money::from_dollars(max),
        }
    }

    /// Width of the band, never negative
    pub fn width(&self) -> Money {
        if self.max > self.min {
            self.max - self.min
        } else {
            Money::zero()
        }
    }
}

impl fmt::Display for RangeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}-${}", self.min.dollars(), self.max.dollars())
    }
}

/// Reference table of typical student spending per category
pub type ReferenceRanges = BTreeMap<BudgetCategory, RangeBand>;

/// North Carolina student averages used by the student budget style
pub fn default_reference_ranges() -> ReferenceRanges {
    BTreeMap::from([
        (BudgetCategory::Housing, RangeBand::dollars(700, 1200)),
        (BudgetCategory::Utilities, RangeBand::dollars(0, 150)),
        (BudgetCategory::Groceries, RangeBand::dollars(20, 250)),
        (BudgetCategory::Transportation, RangeBand::dollars(25, 500)),
        (BudgetCategory::Books, RangeBand::dollars(0, 150)),
        (BudgetCategory::Entertainment, RangeBand::dollars(50, 250)),
    ])
}

/// How an entered amount compares to its reference band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeVerdict {
    /// Nothing entered, or no band for this category
    Neutral,
    Below,
    InRange,
    Above,
}

impl RangeVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Neutral => "—",
            Self::Below => "Below avg",
            Self::InRange => "In range",
            Self::Above => "Above avg",
        }
    }
}

impl fmt::Display for RangeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw budget form state: monthly income plus one text field per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetForm {
    #[serde(default)]
    pub monthly_income: String,
    #[serde(default)]
    pub fields: BTreeMap<BudgetCategory, String>,
}

impl BudgetForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw text of one field
    pub fn set(&mut self, category: BudgetCategory, raw: impl Into<String>) {
        self.fields.insert(category, raw.into());
    }

    pub fn set_income(&mut self, raw: impl Into<String>) {
        self.monthly_income = raw.into();
    }

    /// Raw text of a field, empty when never set
    pub fn raw(&self, category: BudgetCategory) -> &str {
        self.fields.get(&category).map(String::as_str).unwrap_or("")
    }

    /// Coerced amount of a field
    pub fn amount(&self, category: BudgetCategory) -> Money {
        Money::coerce(self.raw(category))
    }

    pub fn income(&self) -> Money {
        Money::coerce(&self.monthly_income)
    }

    /// Apply a `category=amount` assignment as typed on the command line
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), UpscaleError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            UpscaleError::Validation(format!(
                "Expected CATEGORY=AMOUNT, got '{}'",
                assignment
            ))
        })?;
        let category: BudgetCategory = key.trim().parse()?;
        self.set(category, value.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_partition_all_categories() {
        let needs: Vec<_> = BudgetCategory::in_group(BudgetGroup::Needs).collect();
        let wants: Vec<_> = BudgetCategory::in_group(BudgetGroup::Wants).collect();
        let savings: Vec<_> = BudgetCategory::in_group(BudgetGroup::Savings).collect();

        assert_eq!(needs.len(), 7);
        assert_eq!(wants.len(), 4);
        assert_eq!(savings.len(), 3);
        assert!(needs.contains(&BudgetCategory::Books));
        assert!(savings.contains(&BudgetCategory::SavingsGoal));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("housing".parse::<BudgetCategory>().unwrap(), BudgetCategory::Housing);
        assert_eq!("dining-out".parse::<BudgetCategory>().unwrap(), BudgetCategory::DiningOut);
        assert_eq!("SAVINGS_GOAL".parse::<BudgetCategory>().unwrap(), BudgetCategory::SavingsGoal);
        assert!("rent".parse::<BudgetCategory>().unwrap_err().is_not_found());
    }

    #[test]
    fn test_form_defaults_to_zero() {
        let form = BudgetForm::new();
        assert_eq!(form.raw(BudgetCategory::Housing), "");
        assert!(form.amount(BudgetCategory::Housing).is_zero());
        assert!(form.income().is_zero());
    }

    #[test]
    fn test_apply_assignment() {
        let mut form = BudgetForm::new();
        form.apply_assignment("groceries = 120.50").unwrap();
        assert_eq!(form.amount(BudgetCategory::Groceries).cents(), 12_050);

        assert!(form.apply_assignment("groceries").unwrap_err().is_validation());
        assert!(form.apply_assignment("yacht=5").unwrap_err().is_not_found());
    }

    #[test]
    fn test_default_ranges() {
        let ranges = default_reference_ranges();
        assert_eq!(ranges.len(), 6);
        assert_eq!(ranges[&BudgetCategory::Housing], RangeBand::dollars(700, 1200));
        assert!(!ranges.contains_key(&BudgetCategory::Phone));
        assert_eq!(ranges[&BudgetCategory::Housing].to_string(), "$700-$1200");
    }

    #[test]
    fn test_form_serializes_with_camel_case_keys() {
        let mut form = BudgetForm::new();
        form.set(BudgetCategory::DiningOut, "40");
        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains("\"diningOut\":\"40\""));
    }
}
