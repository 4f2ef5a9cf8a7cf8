// Text sources and sinks
//
// Stateless adapters that turn a file or a web page into plain text for the
// input buffer, and write the output buffer back to disk:
// - file: .txt / .docx / .pdf extraction and plain-text saving
// - web: page fetching and visible-text extraction

pub mod file;
pub mod web;

pub use file::{read_text, write_text, DocumentKind};
pub use web::{extract_visible_text, truncate_chars, HttpPageSource, PageSource};

#[cfg(test)]
pub use web::MockPageSource;
