use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// UI language (ko or en), overrides the config file
    #[arg(long)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive translation session (default)
    Interactive,

    /// Translate text or a document once
    Translate {
        /// Text to translate
        text: Option<String>,

        /// Read the text from a .txt, .docx or .pdf file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Source language name, or "auto" to detect it
        #[arg(short, long, default_value = "auto")]
        source: String,

        /// Target language name (defaults to the configured target)
        #[arg(short, long)]
        target: Option<String>,

        /// Model id (defaults to the first supported model)
        #[arg(short, long)]
        model: Option<String>,

        /// Save the translation to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect the language of text or a document
    Detect {
        /// Text to inspect
        text: Option<String>,

        /// Read the text from a .txt, .docx or .pdf file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Model id (defaults to the first supported model)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the supported models available to the API key
    Models,

    /// Translate the visible text of a web page
    Web {
        /// Page URL
        url: String,

        /// Target language name (defaults to the configured target)
        #[arg(short, long)]
        target: Option<String>,

        /// Model id (defaults to the first supported model)
        #[arg(short, long)]
        model: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_interactive() {
        let args = Args::try_parse_from(["transly", "-v", "--locale", "en"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.locale.as_deref(), Some("en"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_translate_arguments() {
        let args = Args::try_parse_from([
            "transly", "translate", "Hello world", "--target", "Korean", "-m", "gemini-2.5-pro",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Translate { text, file, source, target, model, output }) => {
                assert_eq!(text.as_deref(), Some("Hello world"));
                assert!(file.is_none());
                assert_eq!(source, "auto");
                assert_eq!(target.as_deref(), Some("Korean"));
                assert_eq!(model.as_deref(), Some("gemini-2.5-pro"));
                assert!(output.is_none());
            }
            _ => panic!("expected translate command"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        assert!(Args::try_parse_from(["transly", "detect", "hi", "--file", "a.txt"]).is_err());
        assert!(Args::try_parse_from(["transly", "web"]).is_err());
    }
}
