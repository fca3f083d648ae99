//! Visible-text extraction from HTML markup.
//!
//! Parses markup into a DOM, drops `script`/`style` subtrees, concatenates
//! the remaining text nodes in document order, and collapses the result
//! into a single line of phrases. The cleanup step is a phrase-boundary
//! heuristic, not a general whitespace normalizer: it splits on line breaks
//! and on runs of two consecutive spaces, leaving single spaces and
//! interior tabs alone.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// The normalized visible text of one fetched page.
///
/// Created once per session and immutable afterwards; the interactive loop
/// owns it and lends it to the answerer on every question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    text: String,
}

impl PageContent {
    /// Extracts and normalizes the visible text of the given markup.
    pub fn from_markup(markup: &str) -> Self {
        Self {
            text: visible_text(markup),
        }
    }

    /// Returns the normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the page yielded no visible text at all.
    ///
    /// Callers treat this as a failed scrape: there is nothing to answer
    /// questions about.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters (Unicode scalar values) in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns the first `max_chars` characters of the text.
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.text, max_chars)
    }
}

/// Extracts the visible text of an HTML document as a single normalized string.
///
/// The parser recovers from malformed markup, so extraction itself cannot
/// fail; a page without visible text simply produces an empty string.
///
/// # Examples
///
/// ```
/// use pageqa::extract::visible_text;
///
/// let markup = "<html><body><p>Hello World</p><script>ignored()</script></body></html>";
/// assert_eq!(visible_text(markup), "Hello World");
/// ```
pub fn visible_text(markup: &str) -> String {
    let document = Html::parse_document(markup);

    let mut raw = String::new();
    collect_text(document.tree.root(), &mut raw);

    clean_whitespace(&raw)
}

/// Appends the text of all visible descendants of `root` to `out`,
/// in document order and without inserted separators.
///
/// The walk carries its own stack, so nesting depth is bounded by heap
/// rather than by the call stack.
fn collect_text(root: NodeRef<'_, Node>, out: &mut String) {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if is_hidden_element(element.name()) => continue,
            _ => {}
        }
        // Children go on in reverse so the first child pops first,
        // keeping document order.
        for child in node.children().rev() {
            stack.push(child);
        }
    }
}

/// Elements whose entire subtree carries no visible text.
fn is_hidden_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

/// Collapses raw extracted text into space-joined phrases.
///
/// Lines are trimmed and further split on occurrences of two consecutive
/// spaces; empty fragments are dropped and the rest joined with single
/// spaces. Runs of two-or-more spaces therefore become phrase boundaries
/// while single spaces and tabs inside a phrase survive untouched.
fn clean_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the first `max_chars` characters of `s`.
///
/// Operates on character boundaries, so multibyte text is always sliced
/// safely; truncation has no word-boundary awareness and may cut mid-word.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
