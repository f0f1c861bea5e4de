pub mod customer;
pub mod identity;
pub mod month;
pub mod monthly_spending;
pub mod monthly_tokens;
pub mod profile;
