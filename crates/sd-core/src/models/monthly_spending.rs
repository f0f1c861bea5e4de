use serde::{Deserialize, Serialize};

/// One month of spending for a customer. `month` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpending {
    pub month: String,
    pub total_spent: f64,
    pub customer_id: i64,
}
