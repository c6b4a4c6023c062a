//! Hand-written fakes shared by the step definitions

use std::collections::VecDeque;
use std::sync::Mutex;

use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::practicum::HomeworkApi;
use homework_bot::HomeworkBotError;
use serde_json::Value;

/// Replays canned answers and records every requested timestamp
#[derive(Debug, Default)]
pub struct ScriptedApi {
    answers: Mutex<VecDeque<homework_bot::Result<Value>>>,
    requested: Mutex<Vec<i64>>,
}

impl ScriptedApi {
    pub fn push(&self, answer: homework_bot::Result<Value>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn requested(&self) -> Vec<i64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HomeworkApi for ScriptedApi {
    async fn get_api_answer(&self, timestamp: i64) -> homework_bot::Result<Value> {
        self.requested.lock().unwrap().push(timestamp);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HomeworkBotError::ApiRequest("no answer scripted".into())))
    }
}

/// Records delivered messages; can be switched into a failing mode
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    failing: Mutex<bool>,
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, text: &str) -> homework_bot::Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(HomeworkBotError::Notifier("chat unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// HTTP client whose POST requests always answer with a fixed response
#[derive(Debug)]
pub struct FixedPostClient {
    pub status: u16,
    pub body: &'static str,
    pub posted: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FixedPostClient {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            posted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for FixedPostClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.posted.lock().unwrap().push((url.to_string(), params));
        Ok(HttpResponse {
            status: self.status,
            body: self.body.to_string(),
        })
    }
}

/// HTTP client that simulates network failure
pub struct UnreachableClient;

#[async_trait::async_trait]
impl HttpClient for UnreachableClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        Err(HomeworkBotError::Http("connection refused".to_string()))
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        Err(HomeworkBotError::Http("connection refused".to_string()))
    }
}
