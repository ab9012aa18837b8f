//! PDF text extraction wrapper
//!
//! Wraps the pdf-extract crate with error handling for:
//! - Empty uploads
//! - Corrupted or non-PDF input
//! - Parser panics on malformed documents

use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Uploaded file is empty")]
    EmptyUpload,

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),
}

impl ExtractError {
    /// True when the request itself was unusable, as opposed to a document
    /// the parser could not read.
    pub fn is_client_input(&self) -> bool {
        matches!(self, ExtractError::EmptyUpload)
    }
}

/// Text pulled out of a PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub page_count: usize,
}

/// Extract the full text of a PDF held in memory.
///
/// Every page contributes its text followed by a newline, and the joined
/// result is trimmed. A document with zero pages yields empty text.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<Extraction, ExtractError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractError::EmptyUpload);
    }

    let pages = extract_pages(pdf_bytes)?;
    Ok(Extraction {
        text: join_pages(&pages),
        page_count: pages.len(),
    })
}

/// Concatenate per-page text, one newline after each page, then trim.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text.trim().to_string()
}

// pdf-extract panics on some malformed input instead of returning an error
fn extract_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
    }));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(payload) => Err(ExtractError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "malformed document".to_string()
    }
}
