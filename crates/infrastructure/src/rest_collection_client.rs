use std::env;

use gatewise_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Connection settings for the hosted table store's REST surface.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    base_url: Url,
    api_key: String,
}

impl RemoteStoreConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Loads the configuration from `REMOTE_STORE_URL` and
    /// `REMOTE_STORE_API_KEY`.
    pub fn load_from_env() -> AppResult<Self> {
        let base_url = required_env("REMOTE_STORE_URL")?;
        let base_url = Url::parse(base_url.as_str()).map_err(|error| {
            AppError::Validation(format!("REMOTE_STORE_URL is not a valid URL: {error}"))
        })?;
        let api_key = required_env("REMOTE_STORE_API_KEY")?;

        Ok(Self { base_url, api_key })
    }
}

fn required_env(name: &str) -> AppResult<String> {
    let value = env::var(name)
        .map_err(|_| AppError::Validation(format!("{name} must be set")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

/// HTTP client for named collections on the hosted store.
///
/// The store exposes each table as `rest/v1/<collection>` accepting equality
/// filters, ordering, and row limits as query parameters. Authorization and
/// row-level visibility are enforced server side; this client only shapes
/// the read.
#[derive(Clone)]
pub struct RestCollectionClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RestCollectionClient {
    /// Creates a client with the provided HTTP client and store settings.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: RemoteStoreConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }

    /// Starts a select against one named collection.
    #[must_use]
    pub fn collection<'client>(&'client self, name: &str) -> CollectionSelect<'client> {
        CollectionSelect {
            client: self,
            collection: name.to_owned(),
            filters: Vec::new(),
            order_desc: None,
            limit: None,
        }
    }
}

/// Builder for one filtered, ordered, capped collection read.
pub struct CollectionSelect<'client> {
    client: &'client RestCollectionClient,
    collection: String,
    filters: Vec<(String, String)>,
    order_desc: Option<String>,
    limit: Option<usize>,
}

impl CollectionSelect<'_> {
    /// Adds an equality predicate on a column.
    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Orders the result by a column, newest-style descending.
    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order_desc = Some(column.to_owned());
        self
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), "*".to_owned())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(column) = &self.order_desc {
            pairs.push(("order".to_owned(), format!("{column}.desc")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }

        pairs
    }

    /// Executes the read and decodes the returned row array.
    ///
    /// Transport failures, non-success statuses, and malformed payloads all
    /// surface as [`AppError::Remote`]; this layer performs no retries.
    pub async fn fetch<T: DeserializeOwned>(self) -> AppResult<Vec<T>> {
        let mut url = self.client.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Validation("remote store base URL cannot be a base".to_owned())
            })?
            .pop_if_empty()
            .extend(["rest", "v1", self.collection.as_str()]);

        debug!(collection = %self.collection, "issuing remote collection read");

        let response = self
            .client
            .http_client
            .get(url)
            .query(&self.query_pairs())
            .header("apikey", self.client.api_key.as_str())
            .bearer_auth(self.client.api_key.as_str())
            .send()
            .await
            .map_err(|error| {
                warn!(collection = %self.collection, %error, "remote collection read failed");
                AppError::Remote(format!(
                    "transport error reading '{}': {error}",
                    self.collection
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            warn!(collection = %self.collection, %status, "remote collection read rejected");
            return Err(AppError::Remote(format!(
                "reading '{}' failed with status {status}: {body}",
                self.collection
            )));
        }

        response.json::<Vec<T>>().await.map_err(|error| {
            AppError::Remote(format!(
                "malformed row payload from '{}': {error}",
                self.collection
            ))
        })
    }
}
