//! Document text extraction
//!
//! Provides a parser abstraction over PDF libraries and the page walk that
//! turns a parsed document into prompt text.

pub mod pdf;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{BuddyError, BuddyResult};
use crate::input;

pub use pdf::LopdfParser;

/// A parsed document, addressed by 1-based page number
#[async_trait]
pub trait Document: Send {
    /// Total number of pages
    fn page_count(&self) -> u32;

    /// Ordered text fragments of one page
    async fn page_fragments(&mut self, page: u32) -> Result<Vec<String>>;
}

/// Trait for document parsing backends
#[async_trait]
pub trait DocumentParser: Send + Sync + std::fmt::Debug {
    /// Parse raw document bytes
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn Document>>;

    /// Get the parser name
    fn name(&self) -> &str;
}

/// Extract the text of every page, in page order.
///
/// Pages are requested one at a time; each page's fragments are awaited
/// before the next page is asked for.
pub async fn extract_text(parser: &dyn DocumentParser, bytes: Vec<u8>) -> BuddyResult<String> {
    let mut document = parser
        .open(bytes)
        .await
        .map_err(|e| BuddyError::Document(e.to_string()))?;

    let pages = document.page_count();
    info!("📄 Extracting {} page(s) with {}", pages, parser.name());

    let mut text = String::new();
    for page in 1..=pages {
        let fragments = document
            .page_fragments(page)
            .await
            .map_err(|e| BuddyError::Document(format!("page {}: {}", page, e)))?;
        debug!("Page {}: {} fragment(s)", page, fragments.len());
        input::push_page(&mut text, &fragments);
    }

    Ok(text)
}
