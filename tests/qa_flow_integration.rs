/// End-to-end tests for the scrape-then-ask flow.
///
/// These tests drive the extraction pipeline and the question loop with an
/// in-memory page and a mocked model client, so they run without network
/// access or a live Ollama server.
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pageqa::session::qa_loop;
use pageqa::{OllamaClientTrait, OllamaError, PageAnswererBuilder, PageContent, normalize_url};

struct MockOllamaClient {
    response: String,
    calls: AtomicUsize,
}

impl MockOllamaClient {
    fn new(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        })
    }
}

impl OllamaClientTrait for MockOllamaClient {
    fn generate(&self, _model: &str, _prompt: &str) -> Result<String, OllamaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

struct FailingMockClient;

impl OllamaClientTrait for FailingMockClient {
    fn generate(&self, _model: &str, _prompt: &str) -> Result<String, OllamaError> {
        Err(OllamaError::Http { status: 500 })
    }
}

struct RecordingClient {
    prompts: Mutex<Vec<String>>,
}

impl OllamaClientTrait for RecordingClient {
    fn generate(&self, _model: &str, prompt: &str) -> Result<String, OllamaError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("recorded".to_string())
    }
}

/// Runs the question loop over buffered input and returns the printed output.
fn drive_loop(markup: &str, input: &str, client: Arc<dyn OllamaClientTrait>) -> String {
    let content = PageContent::from_markup(markup);
    let answerer = PageAnswererBuilder::new().client(client).build();

    let mut reader = Cursor::new(input.to_string());
    let mut out = Vec::new();
    qa_loop(&mut reader, &mut out, &answerer, "tinyllama", &content)
        .expect("loop should not fail on buffered input");

    String::from_utf8(out).expect("loop output should be valid UTF-8")
}

#[test]
fn scraped_page_answers_question_end_to_end() {
    let markup = "<html><body><p>Hello World</p><script>ignored()</script></body></html>";

    let content = PageContent::from_markup(markup);
    assert_eq!(content.text(), "Hello World");

    let client = MockOllamaClient::new("Hello World is on the page.");
    let output = drive_loop(markup, "What is on the page?\nquit\n", client.clone());

    assert!(output.contains("Your question: "));
    assert!(output.contains("\nThinking...\n"));
    assert!(output.contains("Answer: Hello World is on the page.\n"));
    assert!(output.contains(&"-".repeat(80)));
    assert!(output.contains("\nGoodbye!\n"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn script_and_style_content_never_reaches_the_model() {
    let markup = "<html><head><style>body { color: red; }</style></head>\
                  <body><p>Visible text</p><script>var secret = 1;</script></body></html>";

    let client = Arc::new(RecordingClient {
        prompts: Mutex::new(Vec::new()),
    });
    drive_loop(markup, "anything?\nquit\n", client.clone());

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Visible text"));
    assert!(!prompts[0].contains("secret"));
    assert!(!prompts[0].contains("color: red"));
}

#[test]
fn server_error_is_surfaced_as_answer_and_loop_continues() {
    let markup = "<html><body><p>Some page</p></body></html>";

    let output = drive_loop(
        markup,
        "first question\nsecond question\nquit\n",
        Arc::new(FailingMockClient),
    );

    assert_eq!(output.matches("Answer: Error: Status 500\n").count(), 2);
    assert!(output.contains("\nGoodbye!\n"));
}

#[test]
fn blank_lines_and_exit_tokens_skip_the_model_entirely() {
    let markup = "<html><body><p>Some page</p></body></html>";

    let client = MockOllamaClient::new("unused");
    let output = drive_loop(markup, "\n   \nQUIT\n", client.clone());

    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    assert_eq!(output.matches("Your question: ").count(), 3);
    assert!(output.contains("\nGoodbye!\n"));
}

#[test]
fn long_page_context_is_truncated_to_6000_chars_in_prompt() {
    let markup = format!("<html><body><p>{}</p></body></html>", "x".repeat(7000));

    let client = Arc::new(RecordingClient {
        prompts: Mutex::new(Vec::new()),
    });
    drive_loop(&markup, "how long?\nquit\n", client.clone());

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);

    let prompt = &prompts[0];
    let start = prompt.find("Website Content:\n").unwrap() + "Website Content:\n".len();
    let end = prompt.find("\n\nQuestion:").unwrap();
    let context = &prompt[start..end];

    assert_eq!(context.chars().count(), 6000);
    assert!(context.chars().all(|c| c == 'x'));
}

#[test]
fn bare_domain_gets_https_scheme_before_fetch() {
    assert_eq!(normalize_url("example.com"), "https://example.com");
    assert_eq!(normalize_url("http://example.com"), "http://example.com");
    assert_eq!(normalize_url("https://example.com"), "https://example.com");
}
