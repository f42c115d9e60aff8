use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("invalid marker name: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to render markdown: {0}")]
    Render(#[source] std::io::Error),

    #[error("rendered markdown is not valid UTF-8: {0}")]
    Encoding(String),
}
