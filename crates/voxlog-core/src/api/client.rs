//! API client for the transcription service.
//!
//! One `ApiClient` serves every front-end call site. Cross-cutting policy
//! lives in the hook pipeline (see [`crate::api::hooks`]) so individual
//! operations stay thin wrappers that shape payloads.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::hooks::{AuthWatch, BearerAuth, Navigator, RequestHook, ResponseHook};
use crate::api::ApiError;
use crate::auth::TokenStore;
use crate::models::{AuthPayload, Credentials, HistoryEntry, TranscriptionOutcome};

// ============================================================================
// Constants
// ============================================================================

/// Base URL for all API endpoints. The backend serves everything under one
/// `/api` root; this is fixed at build time, not configuration.
const API_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP request timeout for ordinary calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Upload timeout. The backend transcribes synchronously, so an upload can
/// legitimately take minutes.
const UPLOAD_TIMEOUT_SECS: u64 = 300;

type ApiResult<T> = Result<T, ApiError>;

/// API client for the transcription service.
/// Clone is cheap - reqwest::Client and the hooks are Arc-backed.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_hooks: Vec<Arc<dyn RequestHook>>,
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

impl ApiClient {
    /// Create a client wired to the given token store and navigator.
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> ApiResult<Self> {
        Self::with_base_url(API_BASE_URL, store, navigator)
    }

    /// Client against a non-default base URL. Exists for tests; production
    /// code goes through [`ApiClient::new`].
    pub fn with_base_url(
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            request_hooks: vec![Arc::new(BearerAuth::new(Arc::clone(&store)))],
            response_hooks: vec![Arc::new(AuthWatch::new(store, navigator))],
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run one request through the hook pipeline.
    ///
    /// Request hooks run in order before the send; response hooks run in
    /// order on the status of every received response, success or failure,
    /// before the result is surfaced. A non-success status still reaches the
    /// caller as an error - hooks observe, they never swallow.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let request = self
            .request_hooks
            .iter()
            .fold(request, |req, hook| hook.apply(req));

        let response = request.send().await?;

        let status = response.status();
        for hook in &self.response_hooks {
            hook.inspect(status);
        }

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{} in response body", e)))
    }

    // ===== Auth endpoints =====

    /// Authenticate with email and password. Returns the backend payload
    /// verbatim; the caller decides whether to open a session with the
    /// issued token.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthPayload> {
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        let response = self.execute(request).await?;
        Self::parse(response).await
    }

    /// Create an account. Does not authenticate the session.
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<AuthPayload> {
        let request = self
            .client
            .post(self.url("/auth/register"))
            .json(credentials);
        let response = self.execute(request).await?;
        Self::parse(response).await
    }

    // ===== Transcription endpoints =====

    /// Upload a single audio file for transcription and analysis.
    ///
    /// The file is read before any request is built, so a missing or
    /// unreadable path never touches the network.
    pub async fn upload_audio(&self, path: &Path) -> ApiResult<TranscriptionOutcome> {
        let bytes = std::fs::read(path)
            .map_err(|e| ApiError::InvalidInput(format!("{}: {}", path.display(), e)))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        debug!(file = %file_name, bytes = bytes.len(), "Uploading audio");

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_for(&file_name))?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .client
            .post(self.url("/transcribe"))
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .multipart(form);

        let response = self.execute(request).await?;
        Self::parse(response).await
    }

    /// Fetch past transcription records, in the order the backend returns
    /// them.
    pub async fn history(&self) -> ApiResult<Vec<HistoryEntry>> {
        let request = self.client.get(self.url("/transcribe/history"));
        let response = self.execute(request).await?;
        Self::parse(response).await
    }
}

/// Content type for an upload, guessed from the file extension. The backend
/// only needs a hint; unknown extensions fall back to a generic type.
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("meeting.mp3"), "audio/mpeg");
        assert_eq!(mime_for("MEETING.WAV"), "audio/wav");
        assert_eq!(mime_for("notes.m4a"), "audio/mp4");
        assert_eq!(mime_for("archive.tar.ogg"), "audio/ogg");
        assert_eq!(mime_for("noextension"), "application/octet-stream");
        assert_eq!(mime_for("weird.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_url_join() {
        let store: Arc<dyn crate::auth::TokenStore> =
            Arc::new(crate::auth::MemoryTokenStore::new());
        let client = ApiClient::with_base_url(
            "http://example.invalid/api",
            store,
            Arc::new(crate::api::RedirectFlag::new()),
        )
        .unwrap();
        assert_eq!(
            client.url("/transcribe/history"),
            "http://example.invalid/api/transcribe/history"
        );
    }
}
