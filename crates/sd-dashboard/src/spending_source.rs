use async_trait::async_trait;
use sd_client::{Client, ClientResult};
use sd_core::{Customer, MonthlySpending, MonthlyTokens};

/// The slice of the API the dashboard reads from.
#[async_trait]
pub trait SpendingSource: Send + Sync {
    async fn list_customers(&self) -> ClientResult<Vec<Customer>>;

    async fn monthly_spending(
        &self,
        customer_id: i64,
        year: i32,
    ) -> ClientResult<Vec<MonthlySpending>>;

    async fn monthly_tokens(&self, customer_id: i64, year: i32)
    -> ClientResult<Vec<MonthlyTokens>>;
}

#[async_trait]
impl SpendingSource for Client {
    async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        Client::list_customers(self).await
    }

    async fn monthly_spending(
        &self,
        customer_id: i64,
        year: i32,
    ) -> ClientResult<Vec<MonthlySpending>> {
        Client::monthly_spending(self, customer_id, year).await
    }

    async fn monthly_tokens(
        &self,
        customer_id: i64,
        year: i32,
    ) -> ClientResult<Vec<MonthlyTokens>> {
        Client::monthly_tokens(self, customer_id, year).await
    }
}
