//! Budget calculator
//!
//! Derives totals, the 50/30/20 guideline split, per-field range verdicts and
//! chart data from a raw budget form. Every computation is total: malformed
//! fields count as zero and nothing here returns an error.

use serde::Serialize;

use crate::charts::RangeBar;
use crate::config::BudgetStyle;
use crate::models::{
    BudgetCategory, BudgetForm, BudgetGroup, Money, RangeBand, RangeVerdict, ReferenceRanges,
};

/// Categories compared against reference ranges in the chart, in display order
pub const RANGE_CHART_CATEGORIES: [BudgetCategory; 6] = [
    BudgetCategory::Housing,
    BudgetCategory::Utilities,
    BudgetCategory::Groceries,
    BudgetCategory::Transportation,
    BudgetCategory::Books,
    BudgetCategory::Entertainment,
];

/// Aggregates derived from a budget form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetTotals {
    pub needs: Money,
    pub wants: Money,
    pub savings: Money,
    pub total: Money,
    pub income: Money,
    /// Income minus total; negative when over budget
    pub leftover: Money,
}

impl BudgetTotals {
    pub fn group(&self, group: BudgetGroup) -> Money {
        match group {
            BudgetGroup::Needs => self.needs,
            BudgetGroup::Wants => self.wants,
            BudgetGroup::Savings => self.savings,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.leftover.is_negative()
    }

    /// Share of income already spent, capped at 100; zero without income
    pub fn spending_ratio(&self) -> f64 {
        if !self.income.is_positive() {
            return 0.0;
        }
        (self.total.as_f64() / self.income.as_f64() * 100.0).min(100.0)
    }
}

/// Informational 50/30/20 split of income, whole dollars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guideline {
    pub needs: Money,
    pub wants: Money,
    pub savings: Money,
}

impl Guideline {
    /// `None` unless income is positive.
    ///
    /// Each share is rounded to the nearest dollar, then capped so the three
    /// never add up to more than the whole dollars of income. The cap only
    /// bites for small incomes where three round-ups overshoot.
    pub fn for_income(income: Money) -> Option<Self> {
        if !income.is_positive() {
            return None;
        }

        let mut remaining = Money::from_dollars(income.dollars());
        let mut share = |group: BudgetGroup| -> Money {
            let rounded = income.percent_rounded_to_dollar(group.guideline_percent());
            let granted = rounded.min(remaining);
            remaining -= granted;
            granted
        };

        Some(Self {
            needs: share(BudgetGroup::Needs),
            wants: share(BudgetGroup::Wants),
            savings: share(BudgetGroup::Savings),
        })
    }

    pub fn group(&self, group: BudgetGroup) -> Money {
        match group {
            BudgetGroup::Needs => self.needs,
            BudgetGroup::Wants => self.wants,
            BudgetGroup::Savings => self.savings,
        }
    }

    pub fn sum(&self) -> Money {
        self.needs + self.wants + self.savings
    }
}

/// Compare an amount with its reference band
pub fn classify(value: Money, band: Option<&RangeBand>) -> RangeVerdict {
    let Some(band) = band else {
        return RangeVerdict::Neutral;
    };
    if value.is_zero() {
        RangeVerdict::Neutral
    } else if value < band.min {
        RangeVerdict::Below
    } else if value > band.max {
        RangeVerdict::Above
    } else {
        RangeVerdict::InRange
    }
}

/// One category line of a budget report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub category: BudgetCategory,
    pub label: &'static str,
    pub group: BudgetGroup,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeBand>,
    pub verdict: RangeVerdict,
}

/// Everything the budget page shows, ready for display or export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub style: BudgetStyle,
    pub totals: BudgetTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline: Option<Guideline>,
    pub spending_ratio: f64,
    pub lines: Vec<BudgetLine>,
}

/// Calculator over a fixed reference table
pub struct BudgetCalculator<'a> {
    ranges: &'a ReferenceRanges,
}

impl<'a> BudgetCalculator<'a> {
    pub fn new(ranges: &'a ReferenceRanges) -> Self {
        Self { ranges }
    }

    pub fn range_for(&self, category: BudgetCategory) -> Option<&'a RangeBand> {
        self.ranges.get(&category)
    }

    /// Sum each partition of the form
    pub fn totals(&self, form: &BudgetForm) -> BudgetTotals {
        let group_sum = |group: BudgetGroup| -> Money {
            BudgetCategory::in_group(group)
                .map(|category| form.amount(category))
                .sum()
        };

        let needs = group_sum(BudgetGroup::Needs);
        let wants = group_sum(BudgetGroup::Wants);
        let savings = group_sum(BudgetGroup::Savings);
        let total = needs + wants + savings;
        let income = form.income();

        BudgetTotals {
            needs,
            wants,
            savings,
            total,
            income,
            leftover: income - total,
        }
    }

    pub fn verdict(&self, form: &BudgetForm, category: BudgetCategory) -> RangeVerdict {
        classify(form.amount(category), self.range_for(category))
    }

    pub fn report(&self, form: &BudgetForm, style: BudgetStyle) -> BudgetReport {
        let totals = self.totals(form);

        let lines = BudgetCategory::ALL
            .into_iter()
            .map(|category| BudgetLine {
                category,
                label: category.label(),
                group: category.group(),
                amount: form.amount(category),
                range: self.range_for(category).copied(),
                verdict: self.verdict(form, category),
            })
            .collect();

        BudgetReport {
            style,
            totals,
            guideline: Guideline::for_income(totals.income),
            spending_ratio: totals.spending_ratio(),
            lines,
        }
    }

    /// Needs/wants/savings donut data, dollars
    pub fn group_shares(&self, totals: &BudgetTotals) -> Vec<(&'static str, f64)> {
        BudgetGroup::ALL
            .into_iter()
            .map(|group| (group.label(), totals.group(group).as_f64()))
            .collect()
    }

    /// Reference band versus entered amount for the charted categories
    pub fn range_rows(&self, form: &BudgetForm) -> Vec<RangeBar> {
        RANGE_CHART_CATEGORIES
            .into_iter()
            .map(|category| {
                let (min, max) = self
                    .range_for(category)
                    .map(|band| (band.min.as_f64(), band.max.as_f64()))
                    .unwrap_or((0.0, 0.0));
                RangeBar::new(
                    category.short_label(),
                    min,
                    max,
                    form.amount(category).as_f64(),
                )
            })
            .collect()
    }
}

/// Income, spending, and leftover (or overage) bars
pub fn spending_bars(totals: &BudgetTotals) -> Vec<(&'static str, f64)> {
    let last = if totals.is_over_budget() { "Over" } else { "Leftover" };
    vec![
        ("Income", totals.income.as_f64()),
        ("Spending", totals.total.as_f64()),
        (last, totals.leftover.abs().as_f64()),
    ]
}
