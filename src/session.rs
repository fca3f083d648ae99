//! Interactive question answering session over a fetched webpage.
//!
//! Drives the full flow: prompt for a URL, fetch and extract the page text,
//! then loop reading questions and printing model answers until the user
//! quits. Inference failures never end the loop; they come back as answer
//! text and the next prompt follows.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::answer::{PageAnswerer, PageAnswererBuilder};
use crate::extract::PageContent;
use crate::fetch::{PageFetcher, normalize_url};
use crate::ollama::{OllamaClient, OllamaClientBuilder};

// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Width of the "=" and "-" separator lines.
const SEPARATOR_WIDTH: usize = 80;

/// Number of characters of page text shown in the post-scrape preview.
const PREVIEW_CHARS: usize = 300;

/// One classified line of question-loop input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QaInput {
    /// An exit token: "quit", "exit", or "q", case-insensitive.
    Quit,
    /// Blank or whitespace-only input; the loop re-prompts without
    /// contacting the model.
    Empty,
    /// A question to answer, with surrounding whitespace removed.
    Question(String),
}

/// Classifies one raw line of loop input.
pub fn parse_input(line: &str) -> QaInput {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return QaInput::Empty;
    }

    if matches!(trimmed.to_lowercase().as_str(), "quit" | "exit" | "q") {
        return QaInput::Quit;
    }

    QaInput::Question(trimmed.to_string())
}

/// Prints `prompt` without a trailing newline and reads one input line.
///
/// Returns `Ok(None)` at end of input; callers treat that like an exit
/// token so piped input ends the session cleanly.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line))
}

/// Runs the full interactive session on stdin/stdout.
///
/// Termination paths that are part of normal use (no URL entered, page could
/// not be scraped, user typed an exit token) return `Ok(())` so the process
/// exits with status 0.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    println!("{}", "=".repeat(SEPARATOR_WIDTH));
    println!("Web Content Question Answering System");
    println!("{}", "=".repeat(SEPARATOR_WIDTH));

    let Some(line) = prompt_line(&mut input, &mut out, "\nEnter website URL: ")? else {
        println!("No URL provided. Exiting.");
        return Ok(());
    };
    let url = line.trim();

    if url.is_empty() {
        println!("No URL provided. Exiting.");
        return Ok(());
    }

    let url = normalize_url(url);

    println!("\n{}", "=".repeat(SEPARATOR_WIDTH));
    println!("Scraping: {url}");

    let fetcher = PageFetcher::new().context("Failed to create HTTP client")?;
    let markup = match fetcher.fetch(&url) {
        Ok(markup) => markup,
        Err(e) => {
            println!("Error scraping {url}: {e}");
            println!("Failed to scrape content. Exiting.");
            return Ok(());
        }
    };

    let content = PageContent::from_markup(&markup);
    if content.is_empty() {
        println!("Failed to scrape content. Exiting.");
        return Ok(());
    }

    println!(
        "\u{2713} Successfully scraped {} characters",
        content.char_count()
    );
    println!("\nPreview:\n{}...", content.preview(PREVIEW_CHARS));
    println!("{}", "=".repeat(SEPARATOR_WIDTH));

    let client = Arc::new(
        OllamaClientBuilder::new()
            .build()
            .context("Failed to build Ollama client")?,
    );
    let model = client.model().to_string();

    check_ollama_ready(&client, &model);

    let answerer = PageAnswererBuilder::new().client(client).build();

    println!("\nYou can now ask questions about the content!");
    println!("Type 'quit' to exit\n");

    qa_loop(&mut input, &mut out, &answerer, &model, &content)
}

/// Reads questions and prints answers until an exit token or end of input.
///
/// Generic over the streams so the loop can be driven from buffers as well
/// as from the real terminal.
pub fn qa_loop<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    answerer: &PageAnswerer,
    model: &str,
    content: &PageContent,
) -> Result<()> {
    loop {
        let Some(line) = prompt_line(input, out, "Your question: ")? else {
            writeln!(out, "\nGoodbye!")?;
            return Ok(());
        };

        match parse_input(&line) {
            QaInput::Quit => {
                writeln!(out, "\nGoodbye!")?;
                return Ok(());
            }
            QaInput::Empty => continue,
            QaInput::Question(question) => {
                writeln!(out, "\nThinking...\n")?;

                let answer = answerer.answer(model, content.text(), &question);

                writeln!(out, "Answer: {answer}\n")?;
                writeln!(out, "{}\n", "-".repeat(SEPARATOR_WIDTH))?;
            }
        }
    }
}

/// Verifies the inference endpoint is reachable before entering the loop.
///
/// Failures print a warning and nothing else; any real problem resurfaces
/// per-question as answer text.
fn check_ollama_ready(client: &OllamaClient, model: &str) {
    match client.list_models() {
        Ok(models) if model_available(&models, model) => {}
        Ok(_) => {
            println!(
                "{}Warning: model '{}' not found on the Ollama server (try `ollama pull {}`){}",
                YELLOW, model, model, RESET
            );
        }
        Err(e) => {
            println!(
                "{}Warning: could not reach Ollama at {}: {}{}",
                YELLOW,
                client.base_url(),
                e,
                RESET
            );
        }
    }
}

/// Checks whether `model` is installed, ignoring any ":tag" suffix on
/// installed names so "tinyllama" matches "tinyllama:latest".
fn model_available(installed: &[String], model: &str) -> bool {
    installed
        .iter()
        .any(|name| name == model || name.split(':').next() == Some(model))
}
