//! sd-dashboard
//!
//! View-model behind the spending dashboard: customer list, year and month
//! filters, chart reshaping and color mapping, and the summary texts.

mod chart;
mod color;
mod dashboard;
mod error;
mod month_filter;
mod spending_source;

#[cfg(test)]
mod tests;

pub use chart::{ChartBar, SpendingChart};
pub use color::{DEFAULT_BAR_COLOR, MUTED_BAR_COLOR, magnitude_colors};
pub use dashboard::{Dashboard, LOAD_FAILED_MESSAGE, YEAR_OPTION_COUNT};
pub use error::{DashboardError, Result as DashboardResult};
pub use month_filter::MonthFilter;
pub use spending_source::SpendingSource;
