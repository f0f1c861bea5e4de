pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::customer::Customer;
pub use models::identity::Identity;
pub use models::month::Month;
pub use models::monthly_spending::MonthlySpending;
pub use models::monthly_tokens::MonthlyTokens;
pub use models::profile::Profile;
