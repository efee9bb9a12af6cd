//! Text-generation backends for automated agents.
//!
//! OpenAI goes through `async-openai`; Anthropic and Ollama are plain JSON
//! over `reqwest`, described by an [`HttpCall`].

use crate::decision::{DecisionService, PromptContext, SYSTEM_PROMPT};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

/// Default Ollama endpoint when neither config nor `OLLAMA_HOST` names one.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Which service answers move requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI chat completions.
    OpenAI,
    /// Anthropic messages API.
    Anthropic,
    /// Local Ollama server.
    Ollama,
}

/// Connection settings for one backend.
#[derive(Debug, Clone, Getters)]
pub struct LlmConfig {
    provider: LlmProvider,
    #[getter(skip)]
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: Option<String>,
}

impl LlmConfig {
    /// Creates a backend configuration.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(
        provider: LlmProvider,
        api_key: String,
        model: String,
        max_tokens: u32,
        base_url: Option<String>,
    ) -> Self {
        debug!("Backend configured");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            base_url,
        }
    }
}

/// A JSON POST and where the reply text sits in the response.
#[derive(Debug)]
struct HttpCall {
    url: String,
    headers: Vec<(&'static str, String)>,
    body: Value,
    reply_pointer: &'static str,
}

/// Providers spoken to as plain JSON over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpProvider {
    Anthropic,
    Ollama,
}

#[derive(Debug, Clone)]
enum Backend {
    OpenAI(OpenAIClient<OpenAIConfig>),
    Http {
        http: reqwest::Client,
        provider: HttpProvider,
    },
}

/// Client for whichever provider the config names.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    backend: Backend,
}

impl LlmClient {
    /// Creates a client for `config`.
    #[instrument(skip(config), fields(provider = %config.provider, model = %config.model))]
    pub fn new(config: LlmConfig) -> Self {
        let backend = match config.provider {
            LlmProvider::OpenAI => {
                let mut openai = OpenAIConfig::new().with_api_key(config.api_key.clone());
                if let Some(base) = &config.base_url {
                    openai = openai.with_api_base(base);
                }
                Backend::OpenAI(OpenAIClient::with_config(openai))
            }
            LlmProvider::Anthropic => Backend::Http {
                http: reqwest::Client::new(),
                provider: HttpProvider::Anthropic,
            },
            LlmProvider::Ollama => Backend::Http {
                http: reqwest::Client::new(),
                provider: HttpProvider::Ollama,
            },
        };
        info!("LLM client ready");
        Self { config, backend }
    }

    /// Backend settings.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Sends one system + user exchange and returns the trimmed reply.
    #[instrument(skip_all, fields(provider = %self.config.provider, model = %self.config.model))]
    pub async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        let reply = match &self.backend {
            Backend::OpenAI(client) => self.chat_openai(client, system_prompt, user_message).await?,
            Backend::Http { http, provider } => {
                let call = self.http_call(*provider, system_prompt, user_message);
                self.post(http, call).await?
            }
        };
        info!(reply_length = reply.len(), "Reply received");
        Ok(reply.trim().to_string())
    }

    async fn chat_openai(
        &self,
        client: &OpenAIClient<OpenAIConfig>,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(|e| LlmError::new(format!("Invalid system message: {}", e)))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| LlmError::new(format!("Invalid user message: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .max_completion_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| LlmError::new(format!("Invalid chat request: {}", e)))?;

        debug!("Calling OpenAI chat completions");
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::new(format!("OpenAI request failed: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::new("OpenAI reply had no content".to_string()))
    }

    /// Request shape for the JSON-over-HTTP providers.
    fn http_call(&self, provider: HttpProvider, system_prompt: &str, user_message: &str) -> HttpCall {
        let model = &self.config.model;
        match provider {
            HttpProvider::Anthropic => HttpCall {
                url: format!(
                    "{}/v1/messages",
                    self.endpoint(DEFAULT_ANTHROPIC_URL.to_string())
                ),
                headers: vec![
                    ("x-api-key", self.config.api_key.clone()),
                    ("anthropic-version", ANTHROPIC_VERSION.to_string()),
                ],
                body: json!({
                    "model": model,
                    "max_tokens": self.config.max_tokens,
                    "system": system_prompt,
                    "messages": [{ "role": "user", "content": user_message }],
                }),
                reply_pointer: "/content/0/text",
            },
            HttpProvider::Ollama => {
                let fallback = std::env::var("OLLAMA_HOST")
                    .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
                HttpCall {
                    url: format!("{}/api/generate", self.endpoint(fallback)),
                    headers: Vec::new(),
                    body: json!({
                        "model": model,
                        "system": system_prompt,
                        "prompt": user_message,
                        "stream": false,
                    }),
                    reply_pointer: "/response",
                }
            }
        }
    }

    fn endpoint(&self, fallback: String) -> String {
        self.config
            .base_url
            .clone()
            .unwrap_or(fallback)
            .trim_end_matches('/')
            .to_string()
    }

    async fn post(&self, http: &reqwest::Client, call: HttpCall) -> Result<String, LlmError> {
        let provider = self.config.provider;
        debug!(url = %call.url, "Posting move request");

        let mut request = http.post(&call.url).json(&call.body);
        for (name, value) in call.headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::new(format!("{} request failed: {}", provider, e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::new(format!("{} reply unreadable: {}", provider, e)))?;

        if !status.is_success() {
            warn!(%status, body = %text, "Provider returned an error status");
            return Err(LlmError::new(format!("{} returned {}: {}", provider, status, text)));
        }

        let reply: Value = serde_json::from_str(&text)
            .map_err(|e| LlmError::new(format!("{} reply is not JSON: {}", provider, e)))?;
        reply
            .pointer(call.reply_pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                LlmError::new(format!(
                    "{} reply has no text at {}",
                    provider, call.reply_pointer
                ))
            })
    }
}

#[async_trait::async_trait]
impl DecisionService for LlmClient {
    async fn propose(&self, context: &PromptContext) -> Result<String, LlmError> {
        self.generate(SYSTEM_PROMPT, &context.user_message()).await
    }

    fn label(&self) -> &str {
        &self.config.model
    }
}

/// Failure talking to a text-generation backend.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// What went wrong.
    pub message: String,
    /// Line where the error was raised.
    pub line: u32,
    /// File where the error was raised.
    pub file: &'static str,
}

impl LlmError {
    /// Creates an error stamped with the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
