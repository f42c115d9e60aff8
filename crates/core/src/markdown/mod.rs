//! Markdown host: lower a markdown document into a tree, resolve its cards,
//! and serialize the result to HTML.

pub mod comrak;
pub mod types;

use crate::card::{CancelSignal, ResolveReport, Resolver};
use crate::document::to_html;
use crate::lookup::GameLookup;

pub use self::comrak::lower;
pub use types::MarkdownError;

/// HTML output of one document plus what the resolver did to it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    pub report: ResolveReport,
}

/// Render a markdown document to HTML with all card markers resolved.
pub async fn render_document<L: GameLookup>(
    input: &str,
    resolver: &Resolver<L>,
) -> Result<RenderedDocument, MarkdownError> {
    render_document_with_cancel(input, resolver, CancelSignal::never()).await
}

pub async fn render_document_with_cancel<L: GameLookup>(
    input: &str,
    resolver: &Resolver<L>,
    cancel: CancelSignal,
) -> Result<RenderedDocument, MarkdownError> {
    let mut tree = lower(input, &resolver.settings().markers)?;
    let report = resolver.resolve_with_cancel(&mut tree, cancel).await;
    Ok(RenderedDocument { html: to_html(&tree), report })
}
