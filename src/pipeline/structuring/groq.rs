use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::LlmClient;
use super::StructuringError;
use crate::config::Settings;

/// Groq HTTP client (OpenAI-compatible chat completions).
pub struct GroqClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GroqClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, StructuringError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StructuringError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, StructuringError> {
        Self::new(
            &settings.groq_base_url,
            &settings.groq_api_key,
            &settings.groq_model,
            settings.llm_timeout_secs,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body for /chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// Response body from /chat/completions (only the fields we read)
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn build_messages<'a>(prompt: &'a str, system: &'a str) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(2);
    if !system.is_empty() {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });
    messages
}

impl LlmClient for GroqClient {
    fn generate(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, StructuringError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(prompt, system),
            max_tokens,
            temperature,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens,
            prompt_chars = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    StructuringError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    StructuringError::Timeout(self.timeout_secs)
                } else {
                    StructuringError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StructuringError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| StructuringError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(StructuringError::EmptyCompletion)
    }
}

/// One `generate` call as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub system: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Mock LLM client for testing: scripted replies, optional failure and a call log.
///
/// Replies are handed out in order; once the script runs out the last reply
/// repeats.
pub struct MockLlmClient {
    replies: Vec<String>,
    fail_at: Option<usize>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self::scripted(vec![response.to_string()])
    }

    pub fn scripted(replies: Vec<String>) -> Self {
        Self {
            replies,
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make the call with this zero-based index fail with a connection error.
    pub fn failing_at(mut self, call_index: usize) -> Self {
        self.fail_at = Some(call_index);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

impl LlmClient for MockLlmClient {
    fn generate(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, StructuringError> {
        let index = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|_| StructuringError::HttpClient("mock call log poisoned".into()))?;
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                system: system.to_string(),
                max_tokens,
                temperature,
            });
            calls.len() - 1
        };

        if self.fail_at == Some(index) {
            return Err(StructuringError::Connection("mock://offline".into()));
        }

        self.replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
            .ok_or(StructuringError::EmptyCompletion)
    }
}
