use crate::color::{MUTED_BAR_COLOR, magnitude_colors};
use crate::{DashboardResult, MonthFilter};

use sd_core::{Month, MonthlySpending, MonthlyTokens};

use serde::Serialize;

/// One bar of the monthly spending chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub month: Month,
    pub spending: f64,
    pub fill: String,
    pub is_selected: bool,
}

/// Monthly spending of one customer and year, with the current month filter
/// applied.
///
/// The bars as first built are kept aside so that selecting `all` again
/// restores every original fill.
#[derive(Debug, Clone, Default)]
pub struct SpendingChart {
    original: Vec<ChartBar>,
    bars: Vec<ChartBar>,
    /// `None` when token totals could not be loaded
    tokens: Option<Vec<(Month, u64)>>,
    filter: MonthFilter,
}

impl SpendingChart {
    /// Reshape API rows into bars, in the order the API returned them.
    pub fn build(
        spending: &[MonthlySpending],
        tokens: Option<&[MonthlyTokens]>,
    ) -> DashboardResult<Self> {
        let values: Vec<f64> = spending.iter().map(|row| row.total_spent).collect();
        let fills = magnitude_colors(&values);

        let original = spending
            .iter()
            .zip(fills)
            .map(|(row, fill)| -> DashboardResult<ChartBar> {
                Ok(ChartBar {
                    month: Month::from_year_month(&row.month)?,
                    spending: row.total_spent,
                    fill,
                    is_selected: false,
                })
            })
            .collect::<DashboardResult<Vec<_>>>()?;

        let tokens = tokens
            .map(|rows| {
                rows.iter()
                    .map(|row| -> DashboardResult<(Month, u64)> {
                        Ok((Month::from_year_month(&row.month)?, row.total_tokens))
                    })
                    .collect::<DashboardResult<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            bars: original.clone(),
            original,
            tokens,
            filter: MonthFilter::All,
        })
    }

    pub fn bars(&self) -> &[ChartBar] {
        &self.bars
    }

    pub fn filter(&self) -> MonthFilter {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Highlight one month (greying the rest) or restore every bar.
    pub fn select(&mut self, filter: MonthFilter) {
        self.filter = filter;
        self.bars = match filter {
            MonthFilter::All => self.original.clone(),
            MonthFilter::Month(month) => self
                .original
                .iter()
                .map(|bar| {
                    let is_selected = bar.month == month;
                    ChartBar {
                        fill: if is_selected {
                            bar.fill.clone()
                        } else {
                            MUTED_BAR_COLOR.to_string()
                        },
                        is_selected,
                        ..bar.clone()
                    }
                })
                .collect(),
        };
    }

    /// Spending under the current filter; 0 when the month has no bar.
    pub fn total_spending(&self) -> f64 {
        match self.filter {
            MonthFilter::All => self.original.iter().map(|bar| bar.spending).sum(),
            MonthFilter::Month(month) => self
                .original
                .iter()
                .find(|bar| bar.month == month)
                .map_or(0.0, |bar| bar.spending),
        }
    }

    /// Tokens under the current filter, narrowed like [`Self::total_spending`].
    /// `None` when token totals are unavailable.
    pub fn total_tokens(&self) -> Option<u64> {
        let tokens = self.tokens.as_ref()?;
        Some(match self.filter {
            MonthFilter::All => tokens.iter().map(|(_, tokens)| tokens).sum(),
            MonthFilter::Month(month) => tokens
                .iter()
                .find(|(m, _)| *m == month)
                .map_or(0, |(_, tokens)| *tokens),
        })
    }
}
