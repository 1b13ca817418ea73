//! PDF backend using lopdf
//!
//! Each text-showing operation (`Tj`, `TJ`, `'`) on a page becomes one
//! fragment, decoded through the encoding of the font selected by the last
//! `Tf`.

use super::{Document, DocumentParser};
use anyhow::{Context, Result};
use async_trait::async_trait;
use lopdf::{Encoding, Object, ObjectId};
use std::collections::BTreeMap;
use tracing::debug;

/// TJ kerning below this (thousandths of an em) reads as a word gap
const WORD_GAP: f32 = -100.0;

#[derive(Debug, Default)]
pub struct LopdfParser;

impl LopdfParser {
    pub fn new() -> Self {
        Self
    }
}

/// A loaded PDF; page numbers map to lopdf's own 1-based numbering
pub struct LopdfDocument {
    doc: lopdf::Document,
    pages: BTreeMap<u32, ObjectId>,
}

#[async_trait]
impl DocumentParser for LopdfParser {
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn Document>> {
        let doc = tokio::task::spawn_blocking(move || lopdf::Document::load_mem(&bytes))
            .await
            .context("PDF parser task panicked")?
            .context("Failed to parse PDF")?;

        let pages = doc.get_pages();
        debug!("Loaded PDF with {} page(s)", pages.len());
        Ok(Box::new(LopdfDocument { doc, pages }))
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

#[async_trait]
impl Document for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page_fragments(&mut self, page: u32) -> Result<Vec<String>> {
        let page_id = *self
            .pages
            .get(&page)
            .ok_or_else(|| anyhow::anyhow!("page {} out of range", page))?;
        text_runs(&self.doc, page_id)
            .with_context(|| format!("Failed to extract text from page {}", page))
    }
}

/// Text runs of one page in content-stream order
fn text_runs(doc: &lopdf::Document, page_id: ObjectId) -> lopdf::Result<Vec<String>> {
    let encodings = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(doc).map(|enc| (name, enc)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut runs = Vec::new();
    let mut encoding = None;
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                encoding = match operation.operands.first() {
                    Some(font) => encodings.get(font.as_name()?),
                    None => None,
                };
            }
            "Tj" | "TJ" | "'" => match encoding {
                Some(enc) => {
                    let mut run = String::new();
                    collect_run(&mut run, enc, &operation.operands)?;
                    push_run(&mut runs, &run);
                }
                None => debug!("Text shown with no font selected, skipping"),
            },
            _ => {}
        }
    }
    Ok(runs)
}

fn collect_run(run: &mut String, encoding: &Encoding<'_>, operands: &[Object]) -> lopdf::Result<()> {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => run.push_str(&encoding.bytes_to_string(bytes)?),
            Object::Array(items) => collect_run(run, encoding, items)?,
            Object::Integer(gap) if (*gap as f32) < WORD_GAP => run.push(' '),
            Object::Real(gap) if *gap < WORD_GAP => run.push(' '),
            _ => {}
        }
    }
    Ok(())
}

/// Keep a run if it has any visible text
fn push_run(runs: &mut Vec<String>, run: &str) {
    let run = run.trim();
    if !run.is_empty() {
        runs.push(run.to_string());
    }
}
