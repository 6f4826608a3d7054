pub mod accounts;
pub mod books;
pub(crate) mod envelope;
pub mod reading_lists;

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::errors::ApiError;

/// REST client for the catalog service.
///
/// Every call takes the fallback message that is shown when the server gives
/// no structured error of its own.
pub struct CatalogClient {
    base_url: Url,
    http: Client,
    token: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent(concat!("booklist/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_base_url(base_url: &str, token: Option<String>) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url, token)
    }

    pub fn books(&self) -> books::BooksClient<'_> {
        books::BooksClient::new(self)
    }

    pub fn reading_lists(&self) -> reading_lists::ReadingListsClient<'_> {
        reading_lists::ReadingListsClient::new(self)
    }

    pub fn accounts(&self) -> accounts::AccountsClient<'_> {
        accounts::AccountsClient::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::transport(format!("invalid API path: {path}"), err))
    }

    /// `collection/{id}`, with the id escaped as a single path segment.
    pub(crate) fn entity_endpoint(&self, collection: &str, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::transport(
                    format!("invalid API path: {collection}"),
                    "base URL cannot carry a path",
                )
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Build a request with authentication if a session token is available
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    pub(crate) async fn send<T>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let (status, bytes) = self.execute(request, fallback).await?;
        envelope::decode(status, &bytes, fallback)
    }

    pub(crate) async fn send_empty(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<(), ApiError> {
        let (status, bytes) = self.execute(request, fallback).await?;
        envelope::decode_empty(status, &bytes, fallback)
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<(u16, Vec<u8>), ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::transport(fallback, err))?;
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::transport(fallback, err))?;
        debug!(status, path = %url, len = bytes.len(), "catalog response");
        Ok((status, bytes.to_vec()))
    }
}
