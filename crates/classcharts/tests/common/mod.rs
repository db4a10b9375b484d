//! Shared fixtures: a transport that replays canned responses.

#![allow(dead_code)]

use classcharts::{ClassChartsError, Config, Result, Session, Transport};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use url::Url;

/// One request as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub token: Option<String>,
    pub form: Vec<(String, String)>,
}

/// Answers requests in order from a script and records what was asked.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<Value>>>,
    requests: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(body));
        self
    }

    pub fn fail(self, error: ClassChartsError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }

    fn next(&self, request: Request) -> Result<Value> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted request"))
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url, token: &str) -> Result<Value> {
        self.next(Request {
            method: "GET",
            url: url.to_string(),
            token: Some(token.to_string()),
            form: Vec::new(),
        })
    }

    fn post_form(&self, url: &Url, form: &[(&str, String)], token: Option<&str>) -> Result<Value> {
        self.next(Request {
            method: "POST",
            url: url.to_string(),
            token: token.map(str::to_string),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        })
    }
}

pub const API_URL: &str = "https://api.example.test/apiv2parent";

pub fn config() -> Config {
    Config::new(API_URL, "parent@example.test", "hunter2").unwrap()
}

pub fn login_ok(session_id: &str) -> Value {
    json!({
        "success": 1,
        "data": {"id": 7, "name": "Jane Parent"},
        "meta": {"session_id": session_id}
    })
}

pub fn ok(data: Value) -> Value {
    json!({"success": 1, "data": data, "meta": {}})
}

pub fn ok_with_meta(data: Value, meta: Value) -> Value {
    json!({"success": 1, "data": data, "meta": meta})
}

/// A session already logged in as `"sess-1"` over `transport`.
pub fn logged_in(transport: &ScriptedTransport) -> Session<&ScriptedTransport> {
    let mut session = Session::new(config(), transport);
    session.authenticate().unwrap();
    session
}
