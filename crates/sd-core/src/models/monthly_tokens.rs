use serde::{Deserialize, Serialize};

/// One month of token usage for a customer. `month` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTokens {
    pub month: String,
    pub total_tokens: u64,
    pub customer_id: i64,
}
