/// Ollama HTTP client implementation.
///
/// This module provides `OllamaClient` for making synchronous HTTP requests to the Ollama API,
/// along with error types and builder patterns for configuration.
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Model used when neither the builder nor `OLLAMA_MODEL` names one.
pub const DEFAULT_MODEL: &str = "tinyllama";

/// Endpoint used when neither the builder nor `OLLAMA_HOST` names one.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Total timeout for one generation request. Generation on small local
/// models can take a while, so this is far longer than the connect timeout.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for establishing the TCP connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Answer text substituted when a 200 reply carries no "response" field.
const NO_RESPONSE_PLACEHOLDER: &str = "No response";

/// Errors that can occur when interacting with the Ollama API.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl OllamaError {
    /// Splits a transport error into the timeout and general network cases.
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OllamaError::Timeout(err)
        } else {
            OllamaError::Network(err)
        }
    }
}

/// Body of a successful `/api/generate` reply.
///
/// Ollama sends more fields (timings, context, done flags); only the
/// generated text matters here, and it is decoded as optional so a reply
/// without it yields a fixed placeholder instead of an error.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> String {
        self.response
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string())
    }
}

/// Builder for constructing `OllamaClient` instances.
///
/// # Examples
///
/// ```
/// use pageqa::ollama::OllamaClientBuilder;
///
/// let client = OllamaClientBuilder::new()
///     .base_url("http://localhost:11434")
///     .model("tinyllama")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct OllamaClientBuilder {
    base_url: Option<String>,
    model: Option<String>,
}

impl OllamaClientBuilder {
    /// Creates a new `OllamaClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the Ollama API.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL (e.g., "http://localhost:11434")
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model name for Ollama API calls.
    ///
    /// # Arguments
    ///
    /// * `model` - The model name (e.g., "tinyllama" or "gemma3:4b")
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builds the `OllamaClient` with the configured settings.
    ///
    /// # Returns
    ///
    /// Returns `Ok(OllamaClient)` if the client was created successfully,
    /// or `Err(OllamaError)` if there was an error (e.g., invalid URL).
    ///
    /// # Environment Variables
    ///
    /// If `base_url()` was not called, this method will check the `OLLAMA_HOST`
    /// environment variable. If not set, it defaults to `http://localhost:11434`.
    ///
    /// If `model()` was not called, this method will check the `OLLAMA_MODEL`
    /// environment variable. If not set, it defaults to `"tinyllama"`.
    pub fn build(self) -> Result<OllamaClient, OllamaError> {
        // Determine base URL: use builder value, then env var, then default
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        };

        // Determine model: use builder value, then env var, then default
        let model = if let Some(m) = self.model {
            m
        } else {
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
        };

        // Validate URL
        reqwest::Url::parse(&base_url)
            .map_err(|e| OllamaError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // Create reqwest blocking client with timeout configuration
        let client = reqwest::blocking::Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(OllamaError::Network)?;

        Ok(OllamaClient {
            client,
            base_url,
            model,
        })
    }
}

/// Synchronous HTTP client for interacting with the Ollama API.
///
/// Each request is a single attempt with a bounded timeout; failures are
/// reported to the caller, never retried. It should be constructed using
/// `OllamaClientBuilder`.
pub struct OllamaClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

/// Trait for Ollama API client operations.
///
/// This trait enables mocking in unit tests and provides a clean interface
/// for interacting with the Ollama API.
pub trait OllamaClientTrait: Send + Sync {
    /// Generates text using the Ollama API.
    ///
    /// # Arguments
    ///
    /// * `model` - The name of the model to use (e.g., "tinyllama")
    /// * `prompt` - The prompt text to send to the model
    ///
    /// # Returns
    ///
    /// Returns the generated text as a `String`, or an error if the request fails.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError>;
}

impl OllamaClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name configured for this client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Lists available models from the Ollama API, sorted by size (largest first).
    ///
    /// Fetches the `/api/tags` endpoint and returns model names.
    pub fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(OllamaError::from_transport)?;

        if !response.status().is_success() {
            return Err(OllamaError::Http {
                status: response.status().as_u16(),
            });
        }

        let json: serde_json::Value = response.json().map_err(OllamaError::from_transport)?;

        let mut models: Vec<(String, u64)> = json
            .get("models")
            .and_then(|m| m.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter_map(|model| {
                        let name = model.get("name").and_then(|n| n.as_str())?;
                        let size = model.get("size").and_then(|s| s.as_u64()).unwrap_or(0);
                        Some((name.to_string(), size))
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Sort by size descending (largest first)
        models.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(models.into_iter().map(|(name, _)| name).collect())
    }

    /// Generates text using the Ollama API.
    ///
    /// This is the internal implementation that will be called by the trait method.
    fn generate_internal(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let url = format!("{}/api/generate", self.base_url);
        let request_body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": false
        });

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .map_err(OllamaError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OllamaError::Http {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().map_err(OllamaError::from_transport)?;
        Ok(body.into_text())
    }
}

impl OllamaClientTrait for OllamaClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        self.generate_internal(model, prompt)
    }
}
