//! HTTP client for the Figma REST API.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::flatten::{FlattenOptions, flatten};
use crate::http::check_response;
use crate::node::{FileResponse, ImagesResponse};
use crate::source::{RemoteItem, RemoteSource};
use crate::{Error, Result};

/// Default API root.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Maximum node ids per export request; longer lists are split.
const EXPORT_BATCH_SIZE: usize = 100;

const TOKEN_HEADER: &str = "X-Figma-Token";

/// Figma-backed [`RemoteSource`].
#[derive(Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    api_base: String,
    file_key: String,
    token: String,
    options: FlattenOptions,
}

impl std::fmt::Debug for FigmaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigmaClient")
            .field("api_base", &self.api_base)
            .field("file_key", &self.file_key)
            .field("token", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl FigmaClient {
    pub fn new(file_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            file_key: file_key.into(),
            token: token.into(),
            options: FlattenOptions::default(),
        }
    }

    /// Point the client at a different API root (proxies, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Restrict the walk to the named pages.
    pub fn with_pages(mut self, pages: Vec<String>) -> Self {
        self.options.pages = pages;
        self
    }

    fn file_url(&self) -> String {
        format!("{}/v1/files/{}", self.api_base, self.file_key)
    }

    fn images_url(&self) -> String {
        format!("{}/v1/images/{}", self.api_base, self.file_key)
    }

    async fn export_urls(&self, identifiers: &[String]) -> Result<BTreeMap<String, String>> {
        let mut urls = BTreeMap::new();

        for batch in identifiers.chunks(EXPORT_BATCH_SIZE) {
            tracing::debug!(count = batch.len(), "requesting export urls");
            let resp = self
                .http
                .get(self.images_url())
                .header(TOKEN_HEADER, &self.token)
                .query(&[("ids", batch.join(",")), ("format", "svg".to_string())])
                .send()
                .await?;
            let body: ImagesResponse = check_response(resp)
                .await?
                .json()
                .await
                .map_err(|e| Error::Parse(format!("image export response: {e}")))?;

            if let Some(err) = body.err {
                return Err(Error::Api {
                    status: 200,
                    message: err,
                });
            }

            for id in batch {
                match body.images.get(id) {
                    Some(Some(url)) => {
                        urls.insert(id.clone(), url.clone());
                    }
                    _ => return Err(Error::MissingExport { id: id.clone() }),
                }
            }
        }

        Ok(urls)
    }
}

#[async_trait]
impl RemoteSource for FigmaClient {
    async fn list_items(&self) -> Result<Vec<RemoteItem>> {
        tracing::info!(file = %self.file_key, "fetching remote document");
        let resp = self
            .http
            .get(self.file_url())
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;
        let body: FileResponse = check_response(resp)
            .await?
            .json()
            .await
            .map_err(|e| Error::Parse(format!("file response: {e}")))?;

        let items = flatten(&body.document, &self.options);
        tracing::info!(count = items.len(), "remote inventory flattened");
        Ok(items)
    }

    async fn fetch_contents(&self, identifiers: &[String]) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut contents = BTreeMap::new();
        if identifiers.is_empty() {
            return Ok(contents);
        }

        let urls = self.export_urls(identifiers).await?;
        // One download at a time
        for id in identifiers {
            let url = urls
                .get(id)
                .ok_or_else(|| Error::MissingExport { id: id.clone() })?;
            let resp = self.http.get(url).send().await?;
            let bytes = check_response(resp).await?.bytes().await?;
            tracing::debug!(%id, bytes = bytes.len(), "downloaded export");
            contents.insert(id.clone(), bytes.to_vec());
        }

        Ok(contents)
    }
}
