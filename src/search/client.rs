//! HTTP client for the footprint search backend
//!
//! The backend takes a multipart form and answers once every platform has
//! been scanned; there is no streaming progress. The progress engines run
//! alongside this call and are reconciled with its result.

use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use super::errors::{SearchError, SearchResult};
use super::types::{SearchRequest, SearchResponse};
use crate::utils::{DEFAULT_SEARCH_ENDPOINT, DEFAULT_SEARCH_TIMEOUT_SECS, truncate_with_ellipsis};

const ERROR_BODY_LOG_CHARS: usize = 200;

/// Client for the `/search` endpoint
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: String,
}

impl SearchClient {
    /// Create a client for `endpoint` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SearchResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("footprint-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SearchError::Request)?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Client for the local backend with the default timeout
    ///
    /// # Errors
    ///
    /// Same as [`SearchClient::new`].
    pub fn local() -> SearchResult<Self> {
        Self::new(
            DEFAULT_SEARCH_ENDPOINT,
            Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one search
    ///
    /// # Errors
    ///
    /// - [`SearchError::Photo`] if the photo cannot be read
    /// - [`SearchError::Connect`] or [`SearchError::Timeout`] for transport failures
    /// - [`SearchError::Server`] for a non-2xx answer
    /// - [`SearchError::InvalidFormat`] for a body without a results array
    pub async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let form = build_form(request).await?;
        let started = Instant::now();

        info!(
            endpoint = %self.endpoint,
            has_name = request.name.is_some(),
            has_photo = request.photo.is_some(),
            "Dispatching footprint search"
        );

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %truncate_with_ellipsis(&body, ERROR_BODY_LOG_CHARS),
                "Search backend returned an error"
            );
            return Err(SearchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = SearchResponse::from_body(&body)?;
        info!(
            results = parsed.results.len(),
            total = parsed.total(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Footprint search finished"
        );
        Ok(parsed)
    }
}

async fn build_form(request: &SearchRequest) -> SearchResult<Form> {
    if request.name.is_none() && request.photo.is_none() {
        return Err(SearchError::MissingInput);
    }

    let mut form = Form::new();
    if let Some(name) = &request.name {
        form = form.text("name", name.clone());
    }
    if let Some(path) = &request.photo {
        form = form.part("file", photo_part(path).await?);
    }
    Ok(form.text("use_enhanced", request.use_enhanced.to_string()))
}

async fn photo_part(path: &Path) -> SearchResult<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SearchError::Photo {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Attaching photo");

    let file_name = path
        .file_name()
        .map_or_else(|| "photo".to_string(), |name| name.to_string_lossy().into_owned());

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))
        .map_err(SearchError::Request)
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("me.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("me.png")), "image/png");
        assert_eq!(mime_for(Path::new("me")), "application/octet-stream");
    }

    #[tokio::test]
    async fn unreadable_photo_is_reported() {
        let request = SearchRequest {
            name: None,
            photo: Some("/definitely/not/here.jpg".into()),
            use_enhanced: true,
        };
        assert!(matches!(
            build_form(&request).await,
            Err(SearchError::Photo { .. })
        ));
    }
}
