//! Error types for the previewer.

use miette::Diagnostic;

/// Failure reading or writing the key/value store.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage is not reachable (no window, storage disabled, ...).
    #[error("storage unavailable: {0}")]
    #[diagnostic(code(mdpreview::store::unavailable))]
    Unavailable(String),

    /// The backend refused the read.
    #[error("failed to read `{key}`: {reason}")]
    #[diagnostic(code(mdpreview::store::read))]
    Read { key: String, reason: String },

    /// The backend refused the write, usually because the quota is exhausted.
    #[error("failed to write `{key}`: {reason}")]
    #[diagnostic(
        code(mdpreview::store::write),
        help("local storage quota may be exhausted")
    )]
    Write { key: String, reason: String },
}

/// Failure converting markdown to HTML.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConvertError {
    /// The HTML writer failed mid-stream.
    #[error("failed to write html")]
    #[diagnostic(code(mdpreview::convert::render))]
    Render(#[from] std::fmt::Error),

    /// Any other converter failure.
    #[error("markdown error: {0}")]
    #[diagnostic(code(mdpreview::convert::markdown))]
    Markdown(String),
}

/// Failure parsing a configuration override.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("invalid previewer config: {0}")]
    #[diagnostic(
        code(mdpreview::config::parse),
        help("config is a JSON object, see PreviewerConfig for the recognized fields")
    )]
    Parse(#[from] serde_json::Error),
}
