//! Daily prompt generation.
//!
//! A chat-completion endpoint produces the question of the day when one
//! is configured; otherwise (or on any remote failure) a fixed local
//! list stands in, with a short simulated-latency delay so the two paths
//! feel alike to the caller.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::PromptError;
use crate::store::PromptsConfig;

const SYSTEM_MESSAGE: &str = "Write a single short reflective question for a daily journal. \
    Keep it to one sentence, suitable for self-improvement or everyday life.";
const USER_MESSAGE: &str = "Write today's question.";

/// Local prompt pool used when no endpoint is configured or the remote
/// call fails.
pub const FALLBACK_PROMPTS: &[&str] = &[
    "What were you most grateful for today?",
    "What is one thing you really want to do tomorrow?",
    "What have you learned recently?",
    "What made you laugh today?",
    "What would you like to say to the person who matters most to you?",
    "Name one of your strengths.",
    "How do you unwind when you feel stressed?",
    "What does the future you dream of look like?",
    "What was the most memorable moment of your day?",
    "What hobby or interest is distinctly yours?",
    "What book or film impressed you recently?",
    "What small things make you happy?",
    "How do you get through difficult situations?",
    "What would your friends say is your charm?",
    "What goal do you want to reach this year?",
    "Do you have your own way of letting off steam?",
    "What is a treasured memory with family or friends?",
    "Which season do you love most, and why?",
    "Is there something new you want to try soon?",
    "What small gift could you give yourself today?",
];

/// Which path produced a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSource {
    Remote,
    Fallback,
}

/// A generated question of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    pub text: String,
    pub source: PromptSource,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Chat-completion client for question generation.
pub struct RemotePrompter {
    endpoint: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    client: Client,
}

impl RemotePrompter {
    /// Build a prompter for an explicit endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self, PromptError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            api_key,
            model,
            max_tokens,
            temperature,
            client,
        })
    }

    /// Build from config. `None` when no endpoint is configured or the
    /// key environment variable is empty; the caller falls back locally.
    ///
    /// # Errors
    /// Returns an error if the configured endpoint is not a valid URL.
    pub fn from_config(config: &PromptsConfig) -> Result<Option<Self>, PromptError> {
        let Some(raw) = config.api_url.as_deref() else {
            return Ok(None);
        };
        let endpoint =
            Url::parse(raw).map_err(|_| PromptError::InvalidEndpoint(raw.to_string()))?;
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        if api_key.is_empty() {
            debug!(env = %config.api_key_env, "no API key set; using fallback prompts");
            return Ok(None);
        }
        Self::new(
            endpoint,
            api_key,
            config.model.clone(),
            config.max_tokens,
            config.temperature,
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    /// Request one question from the endpoint.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or
    /// an empty completion.
    pub async fn generate(&self) -> Result<String, PromptError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_MESSAGE.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: USER_MESSAGE.into(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(PromptError::Api {
                status: resp.status().as_u16(),
            });
        }

        let body: ChatResponse = resp.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(PromptError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }
}

/// Uniform random pick from the local pool, after a simulated delay.
pub struct FallbackPrompter {
    delay_ms: (u64, u64),
}

impl FallbackPrompter {
    pub fn new(delay_ms: (u64, u64)) -> Self {
        Self { delay_ms }
    }

    /// No delay; used by tests and non-interactive callers.
    pub fn instant() -> Self {
        Self { delay_ms: (0, 0) }
    }

    pub async fn generate(&self) -> String {
        let (lo, hi) = self.delay_ms;
        if hi > 0 {
            let wait = if hi > lo {
                rand::thread_rng().gen_range(lo..=hi)
            } else {
                hi
            };
            tokio::time::sleep(Duration::from_millis(wait)).await;
        }
        let idx = rand::thread_rng().gen_range(0..FALLBACK_PROMPTS.len());
        FALLBACK_PROMPTS[idx].to_string()
    }
}

impl Default for FallbackPrompter {
    fn default() -> Self {
        Self::new((500, 1500))
    }
}

/// The prompt provider the rest of the app talks to: remote when
/// configured, local otherwise, never failing past construction.
pub struct PromptService {
    remote: Option<RemotePrompter>,
    fallback: FallbackPrompter,
}

impl PromptService {
    pub fn new(remote: Option<RemotePrompter>, fallback: FallbackPrompter) -> Self {
        Self { remote, fallback }
    }

    /// Build from config, reading the API key from the configured
    /// environment variable.
    ///
    /// # Errors
    /// Returns an error if the configured endpoint is not a valid URL.
    pub fn from_config(config: &PromptsConfig) -> Result<Self, PromptError> {
        Ok(Self {
            remote: RemotePrompter::from_config(config)?,
            fallback: FallbackPrompter::new(config.fallback_delay_ms),
        })
    }

    /// Generate the question of the day, falling back locally on any
    /// remote failure.
    pub async fn generate(&self) -> GeneratedPrompt {
        if let Some(remote) = &self.remote {
            match remote.generate().await {
                Ok(text) => {
                    return GeneratedPrompt {
                        text,
                        source: PromptSource::Remote,
                    }
                }
                Err(e) => {
                    debug!(error = %e, "remote prompt generation failed; using fallback")
                }
            }
        }
        GeneratedPrompt {
            text: self.fallback.generate().await,
            source: PromptSource::Fallback,
        }
    }

    /// Synchronous wrapper owning its own runtime, for callers without
    /// an ambient one.
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be created.
    pub fn generate_blocking(&self) -> Result<GeneratedPrompt, PromptError> {
        let runtime = tokio::runtime::Runtime::new().map_err(PromptError::Runtime)?;
        Ok(runtime.block_on(self.generate()))
    }
}
