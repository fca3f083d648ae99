/// Ollama HTTP client module.
///
/// This module provides a synchronous HTTP client for interacting with the
/// Ollama API, including error handling and timeout configuration for
/// single-attempt generation requests.
mod client;

pub use client::{
    DEFAULT_MODEL, OllamaClient, OllamaClientBuilder, OllamaClientTrait, OllamaError,
};
