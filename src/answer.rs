//! Question answering over scraped page text.
//!
//! This module provides the `PageAnswerer` struct which sends a user question
//! together with a truncated slice of the scraped page text to an
//! Ollama-compatible LLM and returns the generated answer.

use std::sync::Arc;

use crate::extract::truncate_chars;
use crate::ollama::{OllamaClientTrait, OllamaError};

/// Prompt template for answering questions about page content.
///
/// The page text is embedded verbatim under "Website Content:" and the user
/// question under "Question:". The trailing "Answer:" cue keeps small models
/// from restating the question.
const PROMPT_TEMPLATE: &str = r#"Based on this website content, answer the question.

Website Content:
{content}

Question: {question}

Answer:"#;

/// Maximum number of characters of page text embedded in a prompt.
///
/// Anything beyond this is dropped without word-boundary awareness, so the
/// context may end mid-word.
const MAX_CONTEXT_CHARS: usize = 6000;

/// Builder for constructing `PageAnswerer` instances.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use pageqa::answer::PageAnswererBuilder;
/// use pageqa::ollama::OllamaClientBuilder;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OllamaClientBuilder::new()
///     .base_url("http://localhost:11434")
///     .build()?;
///
/// let answerer = PageAnswererBuilder::new()
///     .client(Arc::new(client))
///     .build();
///
/// let answer = answerer.answer("tinyllama", "Hello World", "What is on the page?");
/// println!("Answer: {answer}");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct PageAnswererBuilder {
    client: Option<Arc<dyn OllamaClientTrait>>,
}

impl PageAnswererBuilder {
    /// Creates a new `PageAnswererBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Ollama client to use for answering questions.
    ///
    /// # Arguments
    ///
    /// * `client` - An Arc-wrapped implementation of `OllamaClientTrait`
    pub fn client(mut self, client: Arc<dyn OllamaClientTrait>) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the `PageAnswerer` with the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if `client()` was not called before `build()`.
    #[must_use]
    pub fn build(self) -> PageAnswerer {
        PageAnswerer {
            client: self.client.expect("client must be set via client() method"),
        }
    }
}

/// Answers questions about a page using LLM text generation.
///
/// Every failure path is folded into the returned answer string so that one
/// failed request never ends the interactive session.
pub struct PageAnswerer {
    client: Arc<dyn OllamaClientTrait>,
}

impl PageAnswerer {
    /// Creates a new `PageAnswerer` with the specified Ollama client.
    ///
    /// # Note
    ///
    /// Prefer using `PageAnswererBuilder` for more ergonomic construction.
    #[must_use]
    pub fn new(client: Arc<dyn OllamaClientTrait>) -> Self {
        Self { client }
    }

    /// Answers a question about the given page content.
    ///
    /// The first 6000 characters of `content` are embedded in the prompt as
    /// context; the rest is ignored.
    ///
    /// # Arguments
    ///
    /// * `model` - The name of the Ollama model to use (e.g., "tinyllama")
    /// * `content` - The full normalized page text
    /// * `question` - The user's question
    ///
    /// # Returns
    ///
    /// Always returns a displayable string. Generation failures are reported
    /// in-band: a non-2xx reply becomes `"Error: Status {code}"` and a
    /// transport failure becomes `"Error: {description}"`.
    pub fn answer(&self, model: &str, content: &str, question: &str) -> String {
        let prompt = build_prompt(content, question);

        match self.client.generate(model, &prompt) {
            Ok(text) => text,
            Err(OllamaError::Http { status }) => format!("Error: Status {status}"),
            Err(err) => format!("Error: {err}"),
        }
    }
}

/// Fills the prompt template with truncated page context and the question.
fn build_prompt(content: &str, question: &str) -> String {
    let context = truncate_chars(content, MAX_CONTEXT_CHARS);

    PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{content}", context)
}
