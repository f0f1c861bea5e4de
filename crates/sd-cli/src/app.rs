//! Command dispatch.
//!
//! Every command first restores the persisted session, the same way a page
//! load would, then acts on it.

use crate::commands::Commands;
use crate::error::{CliError, Result as CliResult};
use crate::render;

use std::sync::Arc;

use log::{debug, info};
use sd_client::Client;
use sd_config::Config;
use sd_core::Identity;
use sd_dashboard::Dashboard;
use sd_session::{
    RestoreOutcome, RouteDecision, SessionCache, SessionPolicy, SessionStores, SystemClock,
};
use serde_json::{Value, json};

const DASHBOARD_PATH: &str = "/dashboard";

pub struct App {
    cache: SessionCache,
    client: Arc<Client>,
    pretty: bool,
}

impl App {
    /// Wire the client, stores and cache from configuration.
    pub fn new(config: &Config, pretty: bool) -> CliResult<Self> {
        let client = Arc::new(Client::new(&config.api.base_url));
        let stores = SessionStores::on_disk(&config.storage_path()?);
        let cache = SessionCache::new(
            client.clone(),
            stores,
            Arc::new(SystemClock),
            SessionPolicy::from(&config.session),
        );

        Ok(Self::from_parts(cache, client, pretty))
    }

    pub fn from_parts(cache: SessionCache, client: Arc<Client>, pretty: bool) -> Self {
        Self {
            cache,
            client,
            pretty,
        }
    }

    pub async fn run(&self, command: Commands) -> CliResult<String> {
        match command {
            Commands::Login { user_id, password } => self.login(&user_id, &password).await,
            Commands::Logout => self.logout(),
            Commands::Whoami => self.whoami().await,
            Commands::Refresh => self.refresh().await,
            Commands::Customers => self.customers().await,
            Commands::Spending {
                customer,
                year,
                month,
                json,
            } => {
                let identity = self.require_session().await?;
                let mut dashboard = Dashboard::for_today(self.client.clone());
                debug!("Loading spending for {} as {}", customer, identity);

                if let Some(year) = year {
                    dashboard.select_year(year).await;
                }
                dashboard.select_customer(customer).await;
                if let Some(message) = dashboard.error() {
                    return Err(CliError::LoadFailed {
                        message: message.to_string(),
                    });
                }
                dashboard.select_month(month);

                if json {
                    self.to_output(&render::chart_json(&dashboard))
                } else {
                    Ok(render::chart_text(&dashboard))
                }
            }
        }
    }

    async fn login(&self, user_id: &str, password: &str) -> CliResult<String> {
        let result = self.cache.login(user_id, password).await;
        if !result.success {
            return Err(CliError::LoginFailed {
                message: result.message,
            });
        }

        if let Some(navigation) = result.navigation {
            debug!(
                "Continuing to {} in {:?}",
                navigation.target, navigation.delay
            );
            tokio::time::sleep(navigation.delay).await;
        }

        self.to_output(&json!({
            "success": true,
            "message": result.message,
            "user_id": self.cache.identity().map(|i| i.user_id),
            "profile": self.cache.profile(),
        }))
    }

    fn logout(&self) -> CliResult<String> {
        let navigation = self.cache.logout()?;
        info!("Session cleared; continuing to {}", navigation.target);
        self.to_output(&json!({ "logged_out": true }))
    }

    async fn whoami(&self) -> CliResult<String> {
        let identity = self.require_session().await?;
        let profile = self.cache.profile();
        self.to_output(&json!({
            "initials": identity.initials(profile.as_ref()),
            "user_id": identity.user_id,
            "profile": profile,
        }))
    }

    async fn refresh(&self) -> CliResult<String> {
        self.require_session().await?;
        let profile = self.cache.refresh().await?;
        self.to_output(&json!({ "profile": profile }))
    }

    async fn customers(&self) -> CliResult<String> {
        let identity = self.require_session().await?;
        let mut dashboard = Dashboard::for_today(self.client.clone());
        let ids: Vec<i64> = dashboard
            .load_customers(&identity)
            .await?
            .iter()
            .map(|c| c.customer_id)
            .collect();
        self.to_output(&json!(ids))
    }

    /// Restore the session, let any background refresh land, and apply the
    /// dashboard route guard.
    async fn require_session(&self) -> CliResult<Identity> {
        let identity = match self.cache.restore().await? {
            RestoreOutcome::LoggedOut => return Err(CliError::NotLoggedIn),
            RestoreOutcome::Authenticated {
                identity, refresh, ..
            } => {
                // The process would exit before a detached refresh could land.
                if let Some(refresh) = refresh {
                    let outcome = refresh.join().await;
                    debug!("Background refresh finished: {:?}", outcome);
                }
                identity
            }
        };

        match self.cache.route(DASHBOARD_PATH)? {
            RouteDecision::Proceed => Ok(identity),
            RouteDecision::Redirect(_) => Err(CliError::NotLoggedIn),
        }
    }

    fn to_output(&self, value: &Value) -> CliResult<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}
