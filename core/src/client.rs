//! Generic endpoint dispatch.
//!
//! # Design
//! `ApiClient` holds a `Session` and a `ClientConfig` and carries no other
//! state, so one client can serve concurrent calls. A call is split into
//! `prepare` (pure: params, resolved URL, verb) and `parse` (pure: response
//! shape), with exactly one session request in between. There is no retry.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, Output, Verb};
use crate::error::ApiError;
use crate::http::{FileUpload, HttpResponse};
use crate::params::Params;
use crate::response::{ResponseShape, Success};
use crate::session::{with_deadline, Session, UreqSession};

/// Everything needed to issue one endpoint call, before any I/O.
#[derive(Debug, Clone)]
pub struct PreparedCall {
    pub endpoint: &'static str,
    pub verb: Verb,
    pub url: String,
    pub params: Params,
    pub upload: Option<FileUpload>,
}

/// Async client for the API, generic over its transport.
#[derive(Debug, Clone)]
pub struct ApiClient<S> {
    session: S,
    config: ClientConfig,
}

impl ApiClient<UreqSession> {
    /// Client backed by a `UreqSession` built from `config`.
    pub fn connect(config: ClientConfig) -> Self {
        let session = UreqSession::new(&config);
        Self::new(session, config)
    }
}

impl<S: Session> ApiClient<S> {
    pub fn new(session: S, config: ClientConfig) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Build the parameter set and resolve the URL for `endpoint`.
    pub fn prepare<E: Endpoint>(&self, endpoint: &E) -> Result<PreparedCall, ApiError> {
        let url = self.config.resolve(&endpoint.path())?;
        let upload = endpoint.upload();
        if E::SPEC.verb == Verb::PostFile && upload.is_none() {
            return Err(ApiError::InvalidRequest(format!(
                "{} requires a file upload",
                E::SPEC.name
            )));
        }
        Ok(PreparedCall {
            endpoint: E::SPEC.name,
            verb: E::SPEC.verb,
            url: url.into(),
            params: endpoint.params(),
            upload,
        })
    }

    /// Map a raw response with the endpoint's response shape.
    pub fn parse<E: Endpoint>(&self, response: HttpResponse) -> Result<Output<E>, ApiError> {
        <E::Shape as ResponseShape>::map(response)
    }

    /// Issue `endpoint`, bounded by the configured timeout.
    pub async fn call<E>(&self, endpoint: &E) -> Result<Output<E>, ApiError>
    where
        E: Endpoint + Sync,
    {
        match self.config.timeout {
            Some(limit) => self.call_with_timeout(endpoint, limit).await,
            None => self.dispatch(endpoint).await,
        }
    }

    /// Issue `endpoint`, failing with `ApiError::Timeout` after `limit`.
    ///
    /// The limit also bounds the session's request, so a timed-out call does
    /// not keep its connection open.
    pub async fn call_with_timeout<E>(
        &self,
        endpoint: &E,
        limit: Duration,
    ) -> Result<Output<E>, ApiError>
    where
        E: Endpoint + Sync,
    {
        tokio::time::timeout(limit, with_deadline(limit, self.dispatch(endpoint)))
            .await
            .map_err(|_| ApiError::Timeout(limit))?
    }

    /// Issue a boolean-outcome endpoint and collapse the result to a flag.
    ///
    /// Any failure is logged and reported as `false`.
    pub async fn perform<E>(&self, endpoint: &E) -> bool
    where
        E: Endpoint<Shape = Success> + Sync,
    {
        match self.call(endpoint).await {
            Ok(done) => done,
            Err(err) => {
                warn!(endpoint = E::SPEC.name, error = %err, "request failed");
                false
            }
        }
    }

    async fn dispatch<E: Endpoint>(&self, endpoint: &E) -> Result<Output<E>, ApiError> {
        let call = self.prepare(endpoint)?;
        debug!(
            endpoint = call.endpoint,
            verb = call.verb.as_str(),
            url = %call.url,
            params = call.params.len(),
            "dispatching"
        );
        let response = match (call.verb, &call.upload) {
            (Verb::Get, _) => self.session.get(&call.url, &call.params).await?,
            (Verb::Post, _) => self.session.post(&call.url, &call.params).await?,
            (Verb::PostFile, Some(upload)) => {
                self.session
                    .post_file(&call.url, &call.params, upload)
                    .await?
            }
            (Verb::PostFile, None) => {
                return Err(ApiError::InvalidRequest(format!(
                    "{} requires a file upload",
                    call.endpoint
                )))
            }
        };
        self.parse::<E>(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::endpoint::{ListRef, UserRef};
    use crate::lists::{AddListMember, CreateList, GetListMembers, ListMode};
    use crate::users::UpdateProfileImage;

    type Reply = fn() -> Result<HttpResponse, ApiError>;

    /// Records every request and answers with a canned reply.
    struct RecordingSession {
        calls: Mutex<Vec<(&'static str, String, Params)>>,
        reply: Reply,
    }

    impl RecordingSession {
        fn new(reply: Reply) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn record(&self, verb: &'static str, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((verb, url.to_string(), params.clone()));
            (self.reply)()
        }
    }

    #[async_trait]
    impl Session for RecordingSession {
        async fn get(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
            self.record("GET", url, params)
        }

        async fn post(&self, url: &str, params: &Params) -> Result<HttpResponse, ApiError> {
            self.record("POST", url, params)
        }

        async fn post_file(
            &self,
            url: &str,
            params: &Params,
            upload: &FileUpload,
        ) -> Result<HttpResponse, ApiError> {
            assert_eq!(upload.field, "image");
            self.record("POST_FILE", url, params)
        }
    }

    struct SlowSession;

    #[async_trait]
    impl Session for SlowSession {
        async fn get(&self, _: &str, _: &Params) -> Result<HttpResponse, ApiError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(HttpResponse::new(200, "[]"))
        }

        async fn post(&self, _: &str, _: &Params) -> Result<HttpResponse, ApiError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(HttpResponse::new(200, ""))
        }

        async fn post_file(&self, _: &str, _: &Params, _: &FileUpload) -> Result<HttpResponse, ApiError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(HttpResponse::new(200, ""))
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::with_base_url("http://localhost:3000/1.1").unwrap()
    }

    fn client(reply: Reply) -> ApiClient<RecordingSession> {
        ApiClient::new(RecordingSession::new(reply), config())
    }

    #[tokio::test]
    async fn create_list_posts_and_maps_entity() {
        let client = client(|| {
            Ok(HttpResponse::new(
                200,
                r#"{"id":42,"name":"tech","slug":"tech","mode":"public"}"#,
            ))
        });
        let list = client
            .call(&CreateList::new("tech", ListMode::Public))
            .await
            .unwrap();
        assert_eq!(list.name, "tech");

        let calls = client.session().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (verb, url, params) = &calls[0];
        assert_eq!(*verb, "POST");
        assert_eq!(url, "http://localhost:3000/1.1/lists/create.json");
        assert_eq!(params.get("name"), Some("tech"));
        assert_eq!(params.get("mode"), Some("public"));
        assert!(!params.contains_key("description"));
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    async fn get_endpoints_use_get() {
        let client = client(|| Ok(HttpResponse::new(200, r#"{"users":[],"next_cursor":0,"previous_cursor":0}"#)));
        let page = client
            .call(&GetListMembers::new(ListRef::id(7)).cursor(1234))
            .await
            .unwrap();
        assert!(page.items.is_empty());

        let calls = client.session().calls.lock().unwrap();
        assert_eq!(calls[0].0, "GET");
        assert_eq!(calls[0].1, "http://localhost:3000/1.1/lists/members.json");
        assert_eq!(calls[0].2.get("cursor"), Some("1234"));
    }

    #[tokio::test]
    async fn file_endpoints_use_post_file() {
        let client = client(|| Ok(HttpResponse::new(200, r#"{"id":1,"screen_name":"chirpdev"}"#)));
        let user = client
            .call(&UpdateProfileImage::new("me.png", vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(user.screen_name, "chirpdev");
        assert_eq!(client.session().calls.lock().unwrap()[0].0, "POST_FILE");
    }

    #[tokio::test]
    async fn perform_maps_success_to_true() {
        let client = client(|| Ok(HttpResponse::new(200, "whatever")));
        let add = AddListMember::new(ListRef::id(7), UserRef::screen_name("alice"));
        assert!(client.perform(&add).await);
    }

    #[tokio::test]
    async fn perform_maps_transport_failure_to_false() {
        let client = client(|| Err(ApiError::Transport("connection refused".into())));
        let add = AddListMember::new(ListRef::id(7), UserRef::id(2));
        assert!(!client.perform(&add).await);
    }

    #[tokio::test]
    async fn perform_maps_error_status_to_false() {
        let client = client(|| Ok(HttpResponse::new(403, r#"{"errors":[{"code":104,"message":"no"}]}"#)));
        let add = AddListMember::new(ListRef::id(7), UserRef::id(2));
        assert!(!client.perform(&add).await);
    }

    #[tokio::test]
    async fn transport_failure_is_not_mapped() {
        let client = client(|| Err(ApiError::Transport("reset".into())));
        let err = client
            .call(&CreateList::new("tech", ListMode::Public))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn malformed_payload_is_mapping_failure() {
        let client = client(|| Ok(HttpResponse::new(200, "<html>oops</html>")));
        let err = client
            .call(&CreateList::new("tech", ListMode::Public))
            .await
            .unwrap_err();
        assert!(err.is_mapping());
    }

    #[tokio::test]
    async fn call_with_timeout_gives_up() {
        let client = ApiClient::new(SlowSession, config());
        let limit = Duration::from_millis(20);
        let err = client
            .call_with_timeout(&CreateList::new("tech", ListMode::Public), limit)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout(d) if d == limit));
    }

    #[tokio::test]
    async fn configured_timeout_applies_to_call() {
        let config = config().timeout(Some(Duration::from_millis(20)));
        let client = ApiClient::new(SlowSession, config);
        let err = client
            .call(&CreateList::new("tech", ListMode::Public))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout(_)));
    }

    #[test]
    fn prepare_is_pure() {
        let client = client(|| unreachable!("prepare must not touch the session"));
        let call = client
            .prepare(&CreateList::new("tech", ListMode::Private).description("rust folks"))
            .unwrap();
        assert_eq!(call.endpoint, "create_list");
        assert_eq!(call.verb, Verb::Post);
        assert_eq!(call.params.get("mode"), Some("private"));
        assert_eq!(call.params.get("description"), Some("rust folks"));
        assert!(call.upload.is_none());
        assert!(client.session().calls.lock().unwrap().is_empty());
    }
}
