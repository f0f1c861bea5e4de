use crate::client::envelope::{decode_login, decode_payload};
use crate::{AuthApi, ClientError, ClientResult, LoginReply};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, Url};
use sd_core::{Customer, MonthlySpending, MonthlyTokens, Profile};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the spending API
#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:8000")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    #[track_caller]
    fn url(&self, path: &str) -> ClientResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw,
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Send a request and return the raw JSON body of a successful response.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl Serialize>,
    ) -> ClientResult<Value> {
        let path = url.path().to_string();
        debug!("{} {}", method, path);

        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                path,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::from_json)
    }

    async fn get_payload<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let body = self.execute(Method::GET, url, None::<&()>).await?;
        decode_payload(body)
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Submit credentials
    pub async fn login(&self, user_id: &str, password: &str) -> ClientResult<LoginReply> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            user_id: &'a str,
            user_password: &'a str,
        }

        let body = LoginRequest {
            user_id,
            user_password: password,
        };
        let url = self.url("/login")?;
        let reply = self.execute(Method::POST, url, Some(&body)).await?;
        decode_login(reply)
    }

    /// Fetch the profile of a user; the first record of the payload wins
    pub async fn fetch_profile(&self, user_id: &str) -> ClientResult<Option<Profile>> {
        let mut url = self.url("/get_user_details")?;
        url.query_pairs_mut().append_pair("user_id", user_id);

        let profiles: Vec<Profile> = self.get_payload(url).await?;
        Ok(profiles.into_iter().next())
    }

    // =========================================================================
    // Customer Operations
    // =========================================================================

    /// List all customers
    pub async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        let url = self.url("/list/customers")?;
        self.get_payload(url).await
    }

    /// Monthly spending totals of a customer for one year
    pub async fn monthly_spending(
        &self,
        customer_id: i64,
        year: i32,
    ) -> ClientResult<Vec<MonthlySpending>> {
        let url = self.url(&format!(
            "/total/customer/{}/month/every/{}",
            customer_id, year
        ))?;
        self.get_payload(url).await
    }

    /// Monthly token totals of a customer for one year
    pub async fn monthly_tokens(
        &self,
        customer_id: i64,
        year: i32,
    ) -> ClientResult<Vec<MonthlyTokens>> {
        let url = self.url(&format!(
            "/total/customer/{}/tokens/every/{}",
            customer_id, year
        ))?;
        self.get_payload(url).await
    }
}

#[async_trait]
impl AuthApi for Client {
    async fn login(&self, user_id: &str, password: &str) -> ClientResult<LoginReply> {
        Client::login(self, user_id, password).await
    }

    async fn fetch_profile(&self, user_id: &str) -> ClientResult<Option<Profile>> {
        Client::fetch_profile(self, user_id).await
    }
}
