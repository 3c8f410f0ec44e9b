//! In-memory transport for controller tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{json, Value};

use ems_auth::{MemoryTokenStore, Session, SessionAccess};
use ems_core::Role;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

type Reply = Result<ApiResponse, ApiError>;

/// Scripted transport: replies are queued per `(method, path)` and every
/// request is recorded.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: RefCell<HashMap<(Method, String), VecDeque<Reply>>>,
    sent: RefCell<Vec<ApiRequest>>,
    hook: RefCell<Option<Box<dyn Fn(&ApiRequest)>>>,
    stalled: RefCell<HashSet<(Method, String)>>,
}

impl MockTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.enqueue(
            method,
            path,
            Ok(ApiResponse {
                status,
                body: body.to_string().into_bytes(),
            }),
        );
    }

    pub(crate) fn fail(&self, method: Method, path: &str, err: ApiError) {
        self.enqueue(method, path, Err(err));
    }

    /// Run `f` while a request is "in flight", before its reply is returned.
    pub(crate) fn on_send(&self, f: impl Fn(&ApiRequest) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(f));
    }

    /// Requests to `(method, path)` are recorded but never answered.
    pub(crate) fn stall(&self, method: Method, path: &str) {
        self.stalled.borrow_mut().insert((method, path.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn enqueue(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(&request);
        }

        let key = (request.method, request.path.clone());
        let stalled = self.stalled.borrow().contains(&key);
        if stalled {
            std::future::pending::<()>().await;
        }

        self.replies
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(ApiError::Network(format!(
                    "no scripted reply for {:?} {}",
                    request.method, request.path
                )))
            })
    }
}

pub(crate) fn unsigned_token(role: Role) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(json!({ "role": role, "sub": "u1" }).to_string());
    format!("{header}.{body}.sig")
}

pub(crate) fn anonymous_client() -> (Rc<MockTransport>, ApiClient<Rc<MockTransport>>) {
    let mock = MockTransport::new();
    let session: Rc<dyn SessionAccess> = Rc::new(Session::new(MemoryTokenStore::new()));
    (mock.clone(), ApiClient::new(mock, session))
}

pub(crate) fn client_as(role: Role) -> (Rc<MockTransport>, ApiClient<Rc<MockTransport>>) {
    let (mock, api) = anonymous_client();
    api.session()
        .login(&unsigned_token(role))
        .expect("memory store accepts writes");
    (mock, api)
}
