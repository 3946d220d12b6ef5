use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::UserClient,
    error::{ApiError, ErrorCode},
};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::AccountServiceError};

/// Remote account backend consumed by the user orchestrators.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn fetch_account(&self) -> Result<UserClient>;
    async fn fetch_user_clients(&self) -> Result<Vec<UserClient>>;
    async fn save_account(&self, account: UserClient) -> Result<UserClient>;
}

pub struct MissingAccountService;

#[async_trait]
impl AccountService for MissingAccountService {
    async fn fetch_account(&self) -> Result<UserClient> {
        Err(anyhow!("account service is unavailable"))
    }

    async fn fetch_user_clients(&self) -> Result<Vec<UserClient>> {
        Err(anyhow!("account service is unavailable"))
    }

    async fn save_account(&self, _account: UserClient) -> Result<UserClient> {
        Err(anyhow!("account service is unavailable"))
    }
}

/// JSON-over-HTTP account backend.
pub struct HttpAccountService {
    http: Client,
    base_url: Url,
}

impl HttpAccountService {
    pub fn new(base_url: &str) -> std::result::Result<Self, AccountServiceError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_settings(
        settings: &ClientSettings,
    ) -> std::result::Result<Self, AccountServiceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Self::with_client(http, &settings.api_base_url())
    }

    fn with_client(
        http: Client,
        base_url: &str,
    ) -> std::result::Result<Self, AccountServiceError> {
        let mut parsed =
            Url::parse(base_url).map_err(|source| AccountServiceError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })?;
        // Relative joins replace the last segment unless the path ends in '/'.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, AccountServiceError> {
        self.base_url
            .join(path)
            .map_err(|source| AccountServiceError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                source,
            })
    }

    async fn decode<T: DeserializeOwned>(
        res: Response,
    ) -> std::result::Result<T, AccountServiceError> {
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            let error = serde_json::from_str::<ApiError>(&body).unwrap_or_else(|_| {
                ApiError::new(ErrorCode::from_status(status.as_u16()), body.trim())
            });
            return Err(AccountServiceError::Status {
                status: status.as_u16(),
                error,
            });
        }
        serde_json::from_str(&body).map_err(AccountServiceError::Decode)
    }
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn fetch_account(&self) -> Result<UserClient> {
        let url = self.endpoint("user_client")?;
        debug!("account: GET {url}");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AccountServiceError::from)?;
        Ok(Self::decode(res).await?)
    }

    async fn fetch_user_clients(&self) -> Result<Vec<UserClient>> {
        let url = self.endpoint("user_clients")?;
        debug!("account: GET {url}");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AccountServiceError::from)?;
        Ok(Self::decode(res).await?)
    }

    async fn save_account(&self, account: UserClient) -> Result<UserClient> {
        let url = self.endpoint("user_client")?;
        debug!(client_id = %account.client_id, "account: PATCH {url}");
        let res = self
            .http
            .patch(url)
            .json(&account)
            .send()
            .await
            .map_err(AccountServiceError::from)?;
        Ok(Self::decode(res).await?)
    }
}

#[cfg(test)]
#[path = "tests/account_service_tests.rs"]
mod tests;
