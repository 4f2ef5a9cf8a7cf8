use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Document extraction error: {0}")]
    Document(String),

    #[error("Web page error: {0}")]
    Web(String),
}

pub type Result<T> = std::result::Result<T, TranslyError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/transly/config.toml")?)
    }

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        assert!(matches!(read_missing(), Err(TranslyError::Io(_))));
    }

    #[test]
    fn test_api_error_message() {
        let error = TranslyError::Api { status: 429, message: "quota exceeded".to_string() };
        assert_eq!(error.to_string(), "Gemini API error 429: quota exceeded");
    }
}
