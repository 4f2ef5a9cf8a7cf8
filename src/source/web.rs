use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html};
use tracing::{debug, info};

use crate::config::WebConfig;
use crate::error::{Result, TranslyError};

#[cfg(test)]
use mockall::automock;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// Fetches a page and returns its visible text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(config: &WebConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        info!("Fetching web page: {}", url);

        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslyError::Web(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TranslyError::Web(format!("HTTP {} for {}", response.status(), url)));
        }

        let html = response.text().await
            .map_err(|e| TranslyError::Web(format!("Failed to read body: {}", e)))?;

        let text = extract_visible_text(&html);
        debug!("Extracted {} chars of text from {} bytes of HTML", text.chars().count(), html.len());
        Ok(text)
    }
}

/// Elements that start a new line in the extracted text
const BLOCK_ELEMENTS: [&str; 33] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

/// Visible text of an HTML document.
///
/// Inline markup stays part of the running text; block elements break lines.
/// Whitespace inside a line is collapsed and blank lines are dropped.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }

        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child_element.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push('\n');
        }
        collect_text(child_element, out);
        if block {
            out.push('\n');
        }
    }
}

/// First `max_chars` characters of `text`; no word-boundary handling
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_hidden_elements() {
        let html = r#"<!DOCTYPE html>
<html>
  <head><title>Title</title><style>body { color: red; }</style></head>
  <body>
    <h1>Heading</h1>
    <script>var hidden = 1;</script>
    <p>First <b>bold</b> paragraph.</p>
    <noscript>enable js</noscript>
  </body>
</html>"#;

        assert_eq!(extract_visible_text(html), "Heading\nFirst bold paragraph.");
    }

    #[test]
    fn test_inline_markup_keeps_sentences_together() {
        let html = r#"<body><p>Click <a href="x">here</a> to continue.</p><ul><li>one</li><li><em>two</em> items</li></ul>line<br>break</body>"#;
        assert_eq!(
            extract_visible_text(html),
            "Click here to continue.\none\ntwo items\nline\nbreak"
        );
    }

    #[test]
    fn test_extract_handles_fragments() {
        assert_eq!(extract_visible_text("plain text"), "plain text");
        assert_eq!(extract_visible_text(""), "");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 5), "ab");
        assert_eq!(truncate_chars("안녕하세요", 2), "안녕");
        assert_eq!(truncate_chars("", 0), "");

        let long = "가".repeat(6000);
        assert_eq!(truncate_chars(&long, 5000).chars().count(), 5000);
    }
}
