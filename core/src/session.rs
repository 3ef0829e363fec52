//! The session collaborator: authenticated transport for endpoint calls.
//!
//! # Design
//! `Session` is the only seam that performs I/O. Endpoint dispatch hands it a
//! fully resolved URL and a parameter set; the session owns authentication
//! and moves bytes. Tests substitute an in-memory session, production code
//! uses `UreqSession`.
//!
//! `UreqSession` drives a blocking `ureq` agent from `spawn_blocking`, so an
//! outstanding call never stalls the async executor. Non-2xx statuses come
//! back as data and are interpreted by the response shapes.
//!
//! The worker thread cannot be cancelled, so the deadline travels with the
//! request instead: the agent carries the configured timeout, and a call run
//! under [`with_deadline`] gives `ureq` whatever time remains. When a call
//! times out its connection is closed, not left running.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{FileUpload, HttpMethod, HttpRequest, HttpResponse};
use crate::params::Params;

/// Authenticated transport used by every endpoint call.
#[async_trait]
pub trait Session: Send + Sync {
    /// GET with `params` as the query string.
    async fn get(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError>;

    /// POST with `params` as a form body.
    async fn post(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError>;

    /// Multipart POST with `params` as text parts and `upload` as the file part.
    async fn post_file(
        &self,
        url: &str,
        params: &Params,
        upload: &FileUpload,
    ) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Session + ?Sized> Session for Arc<T> {
    async fn get(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
        (**self).get(url, params).await
    }

    async fn post(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
        (**self).post(url, params).await
    }

    async fn post_file(
        &self,
        url: &str,
        params: &Params,
        upload: &FileUpload,
    ) -> Result<HttpResponse, ApiError> {
        (**self).post_file(url, params, upload).await
    }
}

tokio::task_local! {
    static DEADLINE: Instant;
}

/// Run `call` with `limit` as the deadline for every request it sends
/// through a `UreqSession`.
pub(crate) async fn with_deadline<F: Future>(limit: Duration, call: F) -> F::Output {
    DEADLINE.scope(Instant::now() + limit, call).await
}

fn remaining_time() -> Option<Duration> {
    DEADLINE
        .try_with(|deadline| deadline.saturating_duration_since(Instant::now()))
        .ok()
}

/// `Session` backed by a `ureq` agent with optional bearer-token auth.
#[derive(Clone)]
pub struct UreqSession {
    agent: ureq::Agent,
    bearer_token: Option<String>,
    user_agent: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for UreqSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqSession")
            .field("authenticated", &self.bearer_token.is_some())
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl UreqSession {
    pub fn new(config: &ClientConfig) -> Self {
        // Status interpretation belongs to the response shapes.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            bearer_token: config.bearer_token.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
        }
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request = request.with_header("user-agent", self.user_agent.clone());
        match &self.bearer_token {
            Some(token) => request.with_header("authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Execute `request` on the calling thread, bounded by the configured
    /// timeout.
    pub fn execute_blocking(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.send(request, None)
    }

    /// Send `request`, giving up after `limit` when one is set and the
    /// agent's own timeout otherwise.
    fn send(&self, request: HttpRequest, limit: Option<Duration>) -> Result<HttpResponse, ApiError> {
        let request = self.authorize(request);
        debug!(method = ?request.method, url = %request.url, ?limit, "sending request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(request.url.as_str());
                if let Some(limit) = limit {
                    builder = builder.config().timeout_global(Some(limit)).build();
                }
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(request.url.as_str());
                if let Some(limit) = limit {
                    builder = builder.config().timeout_global(Some(limit)).build();
                }
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(&body[..]),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| match e {
            ureq::Error::Timeout(_) => {
                ApiError::Timeout(limit.or(self.timeout).unwrap_or_default())
            }
            other => ApiError::Transport(other.to_string()),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let limit = remaining_time();
        if limit.is_some_and(|left| left.is_zero()) {
            return Err(ApiError::Timeout(Duration::ZERO));
        }
        let session = self.clone();
        tokio::task::spawn_blocking(move || session.send(request, limit))
            .await
            .map_err(|e| ApiError::Transport(format!("request worker failed: {e}")))?
    }
}

#[async_trait]
impl Session for UreqSession {
    async fn get(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
        self.execute(HttpRequest::get(url, params)).await
    }

    async fn post(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
        self.execute(HttpRequest::form(url, params)).await
    }

    async fn post_file(
        &self,
        url: &str,
        params: &Params,
        upload: &FileUpload,
    ) -> Result<HttpResponse, ApiError> {
        self.execute(HttpRequest::multipart(url, params, upload)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_adds_bearer_and_user_agent() {
        let config = ClientConfig::default().bearer_token("t0k3n");
        let session = UreqSession::new(&config);
        let req = session.authorize(HttpRequest::get("http://localhost/x", &Params::new()));
        assert!(req
            .headers
            .contains(&("authorization".to_string(), "Bearer t0k3n".to_string())));
        assert!(req.headers.iter().any(|(k, _)| k == "user-agent"));
    }

    #[test]
    fn authorize_without_token_skips_header() {
        let session = UreqSession::new(&ClientConfig::default());
        let req = session.authorize(HttpRequest::get("http://localhost/x", &Params::new()));
        assert!(req.headers.iter().all(|(k, _)| k != "authorization"));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let session = UreqSession::new(&ClientConfig::default());
        // Nothing listens on the discard port.
        let err = session
            .get("http://127.0.0.1:9/1.1/lists/list.json", &Params::new())
            .await
            .unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err:?}");
    }
}
