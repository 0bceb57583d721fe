// crates/i2pctl-rpc/src/session.rs
//
// Session: authenticates once against an I2PControl endpoint, caches the
// token, and attaches it to every later call.
//
// States:
//   Unauthenticated -> Authenticated   (first completed Authenticate)
// There is no way back: no logout, no expiry handling.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use i2pctl_core::protocol::{METHOD_AUTHENTICATE, PARAM_API, PARAM_PASSWORD, PARAM_TOKEN};
use i2pctl_core::{ControlError, Params, RpcRequest, RpcResponse, RpcResult};

use crate::config::{AuthPolicy, ClientConfig};
use crate::transport::{HttpTransport, Transport};

/// Authentication state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unauthenticated => write!(f, "Unauthenticated"),
            AuthState::Authenticated => write!(f, "Authenticated"),
        }
    }
}

/// Mutable part of a session. Written only when responses arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Token from the last `Authenticate` response; empty before that.
    pub token: String,
    /// Set once the first `Authenticate` response arrives.
    pub ready: bool,
    /// Sticky: set by the first response carrying an error, never cleared.
    pub error: bool,
}

struct SessionInner {
    password: String,
    api_version: u64,
    policy: AuthPolicy,
    transport: Arc<dyn Transport>,
    state: RwLock<SessionState>,
}

/// A client session for one I2PControl endpoint.
///
/// Cloning is cheap and clones share state. Overlapping calls are not
/// sequenced: their responses update the state in arrival order, so a late
/// `Authenticate` reply can replace a newer token.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_version", &self.inner.api_version)
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session over `transport` with the permissive policy.
    pub fn new(password: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                password: password.into(),
                api_version: i2pctl_core::protocol::API_VERSION,
                policy: AuthPolicy::Permissive,
                transport,
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    /// Create a session talking HTTP to the configured endpoint.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ControlError> {
        config.validate()?;
        let transport = HttpTransport::new(config.endpoint.clone());
        tracing::debug!("New session for {}", transport.endpoint());
        Ok(Self::new(config.password.clone(), Arc::new(transport))
            .with_policy(config.auth_policy)
            .with_api_version(config.api_version))
    }

    /// Set the authentication policy.
    ///
    /// If clones exist, the returned session is detached from them: it starts
    /// from a copy of the current token/ready/error state and later updates
    /// are no longer shared.
    pub fn with_policy(self, policy: AuthPolicy) -> Self {
        self.rebuild(|inner| inner.policy = policy)
    }

    /// Set the API version sent with `Authenticate`.
    pub fn with_api_version(self, api_version: u64) -> Self {
        self.rebuild(|inner| inner.api_version = api_version)
    }

    fn rebuild(self, apply: impl FnOnce(&mut SessionInner)) -> Self {
        let mut inner = match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner,
            Err(shared) => SessionInner {
                password: shared.password.clone(),
                api_version: shared.api_version,
                policy: shared.policy,
                transport: shared.transport.clone(),
                // Writers hold the lock only while recording a response.
                state: RwLock::new(
                    shared
                        .state
                        .try_read()
                        .map(|state| state.clone())
                        .unwrap_or_default(),
                ),
            },
        };
        apply(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn password(&self) -> &str {
        &self.inner.password
    }

    pub fn policy(&self) -> AuthPolicy {
        self.inner.policy
    }

    pub async fn token(&self) -> String {
        self.inner.state.read().await.token.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.inner.state.read().await.ready
    }

    pub async fn has_error(&self) -> bool {
        self.inner.state.read().await.error
    }

    pub async fn state(&self) -> AuthState {
        if self.is_ready().await {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Copy of the current token/ready/error triple.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.state.read().await.clone()
    }

    /// Send one call and wait for its outcome.
    ///
    /// The cached token, if any, is written into `params["Token"]`.
    /// Returns `Ok(None)` when the reply is not a 200 with a body; such
    /// replies are dropped. An error in the result sets the sticky error flag
    /// but the result is still returned.
    pub async fn call(
        &self,
        method: &str,
        params: Params,
    ) -> Result<Option<RpcResult>, ControlError> {
        Ok(self
            .call_envelope(method, params)
            .await?
            .map(RpcResponse::into_result))
    }

    /// Fire-and-forget form of [`Session::call`].
    ///
    /// `handler` runs at most once, with the result and this session, on the
    /// runtime's worker. Dropped replies never reach it; transport and parse
    /// failures are logged. Dropping the returned handle does not cancel the
    /// request.
    pub fn request<F>(&self, method: impl Into<String>, params: Params, handler: F) -> JoinHandle<()>
    where
        F: FnOnce(RpcResult, &Session) + Send + 'static,
    {
        let session = self.clone();
        let method = method.into();
        tokio::spawn(async move {
            match session.call(&method, params).await {
                Ok(Some(result)) => handler(result, &session),
                Ok(None) => {}
                Err(e) => tracing::warn!("I2PControl {} failed: {}", method, e),
            }
        })
    }

    /// Authenticate and wait for the outcome.
    ///
    /// Returns `Ok(true)` once the session is ready and `Ok(false)` if the
    /// reply was dropped. Under [`AuthPolicy::Strict`] a reply without a
    /// usable token is an error and leaves the session unauthenticated.
    pub async fn authenticate(&self) -> Result<bool, ControlError> {
        let mut params = Params::new();
        params.insert(PARAM_API.to_string(), Value::from(self.inner.api_version));
        params.insert(
            PARAM_PASSWORD.to_string(),
            Value::String(self.inner.password.clone()),
        );

        let Some(response) = self.call_envelope(METHOD_AUTHENTICATE, params).await? else {
            return Ok(false);
        };

        let token = match self.inner.policy {
            AuthPolicy::Permissive => token_of(response.result.as_ref()),
            AuthPolicy::Strict => validate_authentication(&response)?,
        };

        let mut state = self.inner.state.write().await;
        state.token = token;
        state.ready = true;
        tracing::info!("I2PControl session authenticated");
        Ok(true)
    }

    /// Fire-and-forget form of [`Session::authenticate`]: `on_ready` runs
    /// once when the session becomes ready.
    pub fn start<F>(&self, on_ready: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let session = self.clone();
        tokio::spawn(async move {
            match session.authenticate().await {
                Ok(true) => on_ready(),
                Ok(false) => tracing::debug!("Authenticate reply dropped"),
                Err(e) => tracing::warn!("I2PControl authentication failed: {}", e),
            }
        })
    }

    /// Like [`Session::call`], but returns the whole response envelope so
    /// the router's own `error` member stays visible.
    pub async fn call_envelope(
        &self,
        method: &str,
        mut params: Params,
    ) -> Result<Option<RpcResponse>, ControlError> {
        if method.is_empty() {
            return Err(ControlError::InvalidParams(
                "method name must not be empty".to_string(),
            ));
        }

        let token = self.token().await;
        if !token.is_empty() {
            params.insert(PARAM_TOKEN.to_string(), Value::String(token));
        }

        let body = RpcRequest::new(method, params).to_body()?;
        tracing::debug!("-> {} ({} bytes)", method, body.len());

        let reply = self.inner.transport.post_json(body).await?;
        if !reply.is_deliverable() {
            tracing::debug!(
                "<- {} dropped: status {}, {} bytes",
                method,
                reply.status,
                reply.body.len()
            );
            return Ok(None);
        }

        let response = RpcResponse::from_body(&reply.body)?;
        if response.has_error() {
            if let Some(err) = response.rpc_error() {
                tracing::warn!("<- {} reported {}", method, err);
            }
            self.inner.state.write().await.error = true;
        }
        Ok(Some(response))
    }
}

/// Check that an `Authenticate` response issued a token.
///
/// Fails if the response reports an error or carries no non-empty string
/// `Token`; otherwise returns the token.
pub fn validate_authentication(response: &RpcResponse) -> Result<String, ControlError> {
    if let Some(err) = response.rpc_error() {
        return Err(ControlError::Authentication(err.to_string()));
    }
    match response
        .result
        .as_ref()
        .and_then(|r| r.get(PARAM_TOKEN))
        .and_then(Value::as_str)
    {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ControlError::Authentication(
            "router issued no token".to_string(),
        )),
    }
}

/// Token as a permissive session stores it: strings verbatim, other values
/// as JSON text, missing or null as empty.
fn token_of(result: Option<&RpcResult>) -> String {
    match result.and_then(|r| r.get(PARAM_TOKEN)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpReply;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays scripted replies and records every request body.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpReply, String>>>,
        sent: Mutex<Vec<Value>>,
    }

    impl ScriptedTransport {
        fn with(replies: Vec<HttpReply>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().map(Ok).collect()),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<Value> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post_json(&self, body: Vec<u8>) -> Result<HttpReply, ControlError> {
            self.sent
                .lock()
                .unwrap()
                .push(serde_json::from_slice(&body).unwrap());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(e)) => Err(ControlError::Transport(e)),
                None => Err(ControlError::Transport("no scripted reply".to_string())),
            }
        }
    }

    fn params(v: Value) -> Params {
        v.as_object().cloned().unwrap()
    }

    fn authenticated_reply() -> HttpReply {
        HttpReply::ok(r#"{"id":0,"result":{"API":1,"Token":"abc123"},"jsonrpc":"2.0"}"#)
    }

    #[tokio::test]
    async fn new_session_is_unauthenticated() {
        let session = Session::new("secret", ScriptedTransport::with(vec![]));
        let state = session.snapshot().await;
        assert_eq!(state.token, "");
        assert!(!state.ready);
        assert!(!state.error);
        assert_eq!(session.state().await, AuthState::Unauthenticated);
        assert_eq!(session.password(), "secret");
    }

    #[tokio::test]
    async fn start_stores_token_and_fires_ready_once() {
        let transport = ScriptedTransport::with(vec![HttpReply::ok(r#"{"result":{"Token":"abc123"}}"#)]);
        let session = Session::new("secret", transport.clone());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        session
            .start(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.token().await, "abc123");
        assert!(session.is_ready().await);
        assert_eq!(session.state().await, AuthState::Authenticated);

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            json!({
                "id": 0,
                "method": "Authenticate",
                "params": {"API": 1, "Password": "secret"},
                "jsonrpc": "2.0"
            })
        );
    }

    #[tokio::test]
    async fn request_after_start_carries_token() {
        let transport = ScriptedTransport::with(vec![
            authenticated_reply(),
            HttpReply::ok(r#"{"result":{"i2p.router.net.status":0}}"#),
        ]);
        let session = Session::new("secret", transport.clone());
        assert!(session.authenticate().await.unwrap());

        let (tx, rx) = tokio::sync::oneshot::channel();
        session
            .request(
                "RouterInfo",
                params(json!({"i2p.router.net.status": null})),
                move |result, s| {
                    let _ = tx.send((result, s.clone()));
                },
            )
            .await
            .unwrap();

        let (result, handed) = rx.await.unwrap();
        assert_eq!(result["i2p.router.net.status"], json!(0));
        assert_eq!(handed.token().await, "abc123");

        let sent = transport.sent();
        assert_eq!(
            sent[1]["params"],
            json!({"i2p.router.net.status": null, "Token": "abc123"})
        );
    }

    #[tokio::test]
    async fn empty_params_get_only_the_token() {
        let transport = ScriptedTransport::with(vec![
            authenticated_reply(),
            HttpReply::ok(r#"{"result":{}}"#),
        ]);
        let session = Session::new("secret", transport.clone());
        session.authenticate().await.unwrap();
        session.call("RouterInfo", Params::new()).await.unwrap();
        assert_eq!(transport.sent()[1]["params"], json!({"Token": "abc123"}));
    }

    #[tokio::test]
    async fn caller_token_is_overwritten() {
        let transport = ScriptedTransport::with(vec![
            authenticated_reply(),
            HttpReply::ok(r#"{"result":{}}"#),
        ]);
        let session = Session::new("secret", transport.clone());
        session.authenticate().await.unwrap();
        session
            .call("Echo", params(json!({"Echo": "x", "Token": "stale"})))
            .await
            .unwrap();
        assert_eq!(transport.sent()[1]["params"]["Token"], json!("abc123"));
    }

    #[tokio::test]
    async fn no_token_before_authentication() {
        let transport = ScriptedTransport::with(vec![HttpReply::ok(r#"{"result":{"Result":"x"}}"#)]);
        let session = Session::new("secret", transport.clone());
        session.call("Echo", params(json!({"Echo": "x"}))).await.unwrap();
        assert_eq!(transport.sent()[0]["params"], json!({"Echo": "x"}));
    }

    #[tokio::test]
    async fn error_flag_is_sticky() {
        let transport = ScriptedTransport::with(vec![
            HttpReply::ok(r#"{"result":{"error":{"code":-1,"message":"x"}}}"#),
            HttpReply::ok(r#"{"result":{"Result":"fine"}}"#),
        ]);
        let session = Session::new("secret", transport);

        let first = session.call("Echo", Params::new()).await.unwrap().unwrap();
        assert!(first.contains_key("error"));
        assert!(session.has_error().await);

        let second = session.call("Echo", Params::new()).await.unwrap().unwrap();
        assert_eq!(second["Result"], json!("fine"));
        assert!(session.has_error().await);
    }

    #[tokio::test]
    async fn handler_sees_result_with_error() {
        let transport = ScriptedTransport::with(vec![HttpReply::ok(
            r#"{"result":{"error":{"code":-32601,"message":"Method not found."}}}"#,
        )]);
        let session = Session::new("secret", transport);
        let (tx, rx) = tokio::sync::oneshot::channel();
        session
            .request("Nope", Params::new(), move |result, _| {
                let _ = tx.send(result);
            })
            .await
            .unwrap();
        let result = rx.await.unwrap();
        assert_eq!(result["error"]["code"], json!(-32601));
    }

    #[tokio::test]
    async fn undeliverable_replies_never_reach_handler() {
        let transport = ScriptedTransport::with(vec![
            HttpReply {
                status: 500,
                body: r#"{"result":{}}"#.to_string(),
            },
            HttpReply::ok(""),
        ]);
        let session = Session::new("secret", transport);
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = calls.clone();
            session
                .request("Echo", Params::new(), move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!session.has_error().await);
    }

    #[tokio::test]
    async fn dropped_authenticate_leaves_session_unauthenticated() {
        let transport = ScriptedTransport::with(vec![HttpReply {
            status: 401,
            body: String::new(),
        }]);
        let session = Session::new("secret", transport);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        session
            .start(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!session.is_ready().await);
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let transport = ScriptedTransport::with(vec![HttpReply::ok("<html>oops</html>")]);
        let session = Session::new("secret", transport);
        match session.call("Echo", Params::new()).await {
            Err(ControlError::Parse(_)) => {}
            other => panic!("Expected Parse error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_method_is_rejected_without_sending() {
        let transport = ScriptedTransport::with(vec![]);
        let session = Session::new("secret", transport.clone());
        let err = session.call("", Params::new()).await.unwrap_err();
        assert!(matches!(err, ControlError::InvalidParams(_)));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_surfaces_from_call() {
        let transport = Arc::new(ScriptedTransport {
            replies: Mutex::new(VecDeque::from(vec![Err("connection refused".to_string())])),
            sent: Mutex::new(Vec::new()),
        });
        let session = Session::new("secret", transport);
        let err = session.call("Echo", Params::new()).await.unwrap_err();
        assert!(matches!(err, ControlError::Transport(_)));
    }

    #[tokio::test]
    async fn permissive_start_ignores_authentication_errors() {
        let transport = ScriptedTransport::with(vec![HttpReply::ok(
            r#"{"id":0,"result":{},"jsonrpc":"2.0","error":{"code":-32001,"message":"Invalid password."}}"#,
        )]);
        let session = Session::new("wrong", transport);
        assert!(session.authenticate().await.unwrap());
        let state = session.snapshot().await;
        assert!(state.ready);
        assert_eq!(state.token, "");
        assert!(state.error);
    }

    #[tokio::test]
    async fn strict_start_rejects_error_reply() {
        let transport = ScriptedTransport::with(vec![HttpReply::ok(
            r#"{"result":{"error":{"code":-32001,"message":"Invalid password."}}}"#,
        )]);
        let session = Session::new("wrong", transport).with_policy(AuthPolicy::Strict);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        session
            .start(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!session.is_ready().await);
        assert_eq!(session.token().await, "");
        assert!(session.has_error().await);
    }

    #[tokio::test]
    async fn strict_authenticate_accepts_issued_token() {
        let transport = ScriptedTransport::with(vec![authenticated_reply()]);
        let session = Session::new("secret", transport).with_policy(AuthPolicy::Strict);
        assert_eq!(session.policy(), AuthPolicy::Strict);
        assert!(session.authenticate().await.unwrap());
        assert_eq!(session.token().await, "abc123");
    }

    #[tokio::test]
    async fn rebuilding_a_shared_session_keeps_its_state() {
        let transport = ScriptedTransport::with(vec![
            authenticated_reply(),
            HttpReply::ok(r#"{"result":{"Result":"x"}}"#),
        ]);
        let session = Session::new("secret", transport.clone());
        session.authenticate().await.unwrap();
        let clone = session.clone();

        let strict = clone.with_policy(AuthPolicy::Strict).with_api_version(2);
        assert_eq!(strict.policy(), AuthPolicy::Strict);
        assert!(strict.is_ready().await);
        assert_eq!(strict.token().await, "abc123");

        strict.call("Echo", Params::new()).await.unwrap();
        assert_eq!(transport.sent()[1]["params"], json!({"Token": "abc123"}));
        // The original session is unaffected.
        assert_eq!(session.policy(), AuthPolicy::Permissive);
    }

    #[tokio::test]
    async fn api_version_is_sent_with_authenticate() {
        let transport = ScriptedTransport::with(vec![authenticated_reply()]);
        let session = Session::new("secret", transport.clone()).with_api_version(2);
        session.authenticate().await.unwrap();
        assert_eq!(transport.sent()[0]["params"]["API"], json!(2));
    }

    #[test]
    fn validation_requires_non_empty_token() {
        let ok = RpcResponse::from_body(r#"{"result":{"Token":"t"}}"#).unwrap();
        assert_eq!(validate_authentication(&ok).unwrap(), "t");

        for body in [
            r#"{"result":{}}"#,
            r#"{"result":{"Token":""}}"#,
            r#"{"result":{"Token":42}}"#,
            r#"{"result":{"Token":"t","error":{"code":-32001}}}"#,
            r#"{"result":{"Token":"t"},"error":{"code":-32001,"message":"Invalid password."}}"#,
        ] {
            let resp = RpcResponse::from_body(body).unwrap();
            assert!(
                matches!(validate_authentication(&resp), Err(ControlError::Authentication(_))),
                "accepted {}",
                body
            );
        }
    }

    #[test]
    fn permissive_token_coercion() {
        let r = |v: Value| v.as_object().cloned().unwrap();
        assert_eq!(token_of(None), "");
        assert_eq!(token_of(Some(&r(json!({"Token": null})))), "");
        assert_eq!(token_of(Some(&r(json!({"Token": "abc"})))), "abc");
        assert_eq!(token_of(Some(&r(json!({"Token": 7})))), "7");
    }
}
