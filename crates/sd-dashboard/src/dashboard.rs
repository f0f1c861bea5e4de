//! Dashboard controller.
//!
//! Owns the selection state (customer, year, month) and the chart built from
//! it. Load failures never escape as errors: they empty the chart and leave
//! an inline error message, the way the page shows them.

use crate::{DashboardResult, MonthFilter, SpendingChart, SpendingSource};

use std::sync::Arc;

use chrono::{Datelike, Local};
use log::{debug, info, warn};
use sd_core::{Customer, Identity};

/// Number of selectable years, counting back from the current one
pub const YEAR_OPTION_COUNT: i32 = 5;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load spending data for this customer";

const NO_DATA_TEXT: &str = "No data to display";
const NO_DATA_HINT: &str = "Please select a different customer or year";
const TOKENS_UNAVAILABLE_TEXT: &str = "Token totals unavailable";

pub struct Dashboard {
    source: Arc<dyn SpendingSource>,
    current_year: i32,
    customers: Vec<Customer>,
    /// Identity the customer list was fetched for
    customers_for: Option<Identity>,
    selected_customer: Option<i64>,
    selected_year: i32,
    chart: SpendingChart,
    error: Option<String>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn SpendingSource>, current_year: i32) -> Self {
        Self {
            source,
            current_year,
            customers: Vec::new(),
            customers_for: None,
            selected_customer: None,
            selected_year: current_year,
            chart: SpendingChart::default(),
            error: None,
        }
    }

    /// Dashboard anchored on the local calendar year.
    pub fn for_today(source: Arc<dyn SpendingSource>) -> Self {
        Self::new(source, Local::now().year())
    }

    // =========================================================================
    // Selection state
    // =========================================================================

    /// Current year first, then the previous years.
    pub fn year_options(&self) -> Vec<i32> {
        (0..YEAR_OPTION_COUNT)
            .map(|back| self.current_year - back)
            .collect()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn selected_customer(&self) -> Option<i64> {
        self.selected_customer
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn month_filter(&self) -> MonthFilter {
        self.chart.filter()
    }

    pub fn chart(&self) -> &SpendingChart {
        &self.chart
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch the customer list once per identity. Customer `0` is a
    /// placeholder and is dropped; the rest are sorted by id.
    pub async fn load_customers(&mut self, identity: &Identity) -> DashboardResult<&[Customer]> {
        if self.customers_for.as_ref() == Some(identity) {
            debug!("Customers already loaded for {}", identity);
            return Ok(&self.customers);
        }

        let mut customers = self.source.list_customers().await.map_err(|e| {
            warn!("Error fetching customers: {}", e);
            e
        })?;
        customers.retain(|c| c.customer_id != 0);
        customers.sort();
        customers.dedup();

        info!("Loaded {} customers", customers.len());
        self.customers = customers;
        self.customers_for = Some(identity.clone());
        Ok(&self.customers)
    }

    /// Select a customer and load its chart for the selected year.
    pub async fn select_customer(&mut self, customer_id: i64) {
        self.selected_customer = Some(customer_id);
        self.error = None;
        self.reload().await;
    }

    /// Change the year; reloads only when a customer is selected.
    pub async fn select_year(&mut self, year: i32) {
        self.selected_year = year;
        self.error = None;
        if self.selected_customer.is_some() {
            self.reload().await;
        }
    }

    pub fn select_month(&mut self, filter: MonthFilter) {
        self.chart.select(filter);
    }

    async fn reload(&mut self) {
        let Some(customer_id) = self.selected_customer else {
            return;
        };
        let year = self.selected_year;

        match self.fetch_chart(customer_id, year).await {
            Ok(chart) => {
                debug!(
                    "Loaded {} months for customer {} in {}",
                    chart.bars().len(),
                    customer_id,
                    year
                );
                self.chart = chart;
            }
            Err(e) => {
                warn!("Error fetching spending for customer {}: {}", customer_id, e);
                self.chart = SpendingChart::default();
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Only a spending failure fails the chart; token totals degrade to
    /// unavailable.
    async fn fetch_chart(&self, customer_id: i64, year: i32) -> DashboardResult<SpendingChart> {
        let spending = self.source.monthly_spending(customer_id, year).await?;
        let tokens = match self.source.monthly_tokens(customer_id, year).await {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                warn!("Error fetching tokens for customer {}: {}", customer_id, e);
                None
            }
        };

        match SpendingChart::build(&spending, tokens.as_deref()) {
            Err(e) if tokens.is_some() => {
                // Retry without tokens in case only their rows are malformed.
                warn!("Discarding token totals for customer {}: {}", customer_id, e);
                SpendingChart::build(&spending, None)
            }
            other => other,
        }
    }

    // =========================================================================
    // Texts
    // =========================================================================

    pub fn title(&self) -> Option<String> {
        self.selected_customer
            .map(|id| format!("Monthly Spending - Customer #{id}"))
    }

    pub fn description(&self) -> String {
        match self.month_filter() {
            MonthFilter::All => format!("Total spending by month for {}", self.selected_year),
            filter => format!("Spending for {} {}", filter.label(), self.selected_year),
        }
    }

    fn has_data(&self) -> bool {
        self.error.is_none() && !self.chart.is_empty()
    }

    pub fn summary(&self) -> String {
        if !self.has_data() {
            return NO_DATA_TEXT.to_string();
        }
        let total = self.chart.total_spending();
        match self.month_filter() {
            MonthFilter::All => format!("Total spending: ${total:.2}"),
            filter => format!("{} spending: ${total:.2}", filter.label()),
        }
    }

    pub fn token_summary(&self) -> String {
        if !self.has_data() {
            return NO_DATA_TEXT.to_string();
        }
        let Some(total) = self.chart.total_tokens() else {
            return TOKENS_UNAVAILABLE_TEXT.to_string();
        };
        match self.month_filter() {
            MonthFilter::All => format!("Total tokens: {total}"),
            filter => format!("{} tokens: {total}", filter.label()),
        }
    }

    pub fn caption(&self) -> String {
        if !self.has_data() {
            return NO_DATA_HINT.to_string();
        }
        match self.month_filter() {
            MonthFilter::All => {
                format!("Showing monthly spending data for {}", self.selected_year)
            }
            filter => format!("Showing {} {} data", filter.label(), self.selected_year),
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("selected_customer", &self.selected_customer)
            .field("selected_year", &self.selected_year)
            .field("month_filter", &self.month_filter())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
