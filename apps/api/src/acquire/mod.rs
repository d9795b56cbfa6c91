//! Text Acquirer — turns an uploaded resume into one plain-text string.
//!
//! PDF pages are joined with single spaces; plain-text files pass through as
//! uploaded. A document the PDF library cannot read degrades to empty text so
//! the analysis reports "no skills found" instead of failing.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::skills::normalize_whitespace;

/// Joins per-page text with single spaces. Layout line breaks inside a page are
/// flattened; empty pages contribute an empty string.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .map(|page| normalize_whitespace(page.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
pub trait TextAcquirer: Send + Sync {
    async fn acquire(&self, bytes: Bytes) -> Result<String, AppError>;
}

pub struct PdfTextAcquirer;

#[async_trait]
impl TextAcquirer for PdfTextAcquirer {
    async fn acquire(&self, bytes: Bytes) -> Result<String, AppError> {
        // pdf-extract is CPU-bound and may panic on malformed input.
        let result = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(Ok(pages)) => {
                debug!("Extracted {} PDF pages", pages.len());
                Ok(join_pages(pages))
            }
            Ok(Err(e)) => {
                warn!("PDF text extraction failed, treating document as empty: {e}");
                Ok(String::new())
            }
            Err(e) if e.is_panic() => {
                warn!("PDF text extraction panicked, treating document as empty");
                Ok(String::new())
            }
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "PDF extraction task failed: {e}"
            ))),
        }
    }
}

pub struct PlainTextAcquirer;

#[async_trait]
impl TextAcquirer for PlainTextAcquirer {
    async fn acquire(&self, bytes: Bytes) -> Result<String, AppError> {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

static PDF_ACQUIRER: PdfTextAcquirer = PdfTextAcquirer;
static PLAIN_TEXT_ACQUIRER: PlainTextAcquirer = PlainTextAcquirer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Sniffs the `%PDF` magic first, then falls back to file name and content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            return Some(DocumentKind::Pdf);
        }

        let file_name = file_name.map(str::to_lowercase).unwrap_or_default();
        let content_type = content_type.map(str::to_lowercase).unwrap_or_default();

        if file_name.ends_with(".pdf") || content_type == "application/pdf" {
            Some(DocumentKind::Pdf)
        } else if file_name.ends_with(".txt") || content_type.starts_with("text/plain") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }

    pub fn acquirer(self) -> &'static dyn TextAcquirer {
        match self {
            DocumentKind::Pdf => &PDF_ACQUIRER,
            DocumentKind::PlainText => &PLAIN_TEXT_ACQUIRER,
        }
    }
}

/// Detects the document kind and extracts its text.
pub async fn acquire_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: Bytes,
) -> Result<String, AppError> {
    let kind = DocumentKind::detect(file_name, content_type, &bytes).ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "Unsupported resume format '{}': upload a PDF or plain-text file",
            file_name.unwrap_or("unnamed")
        ))
    })?;
    kind.acquirer().acquire(bytes).await
}

/// Builds a minimal uncompressed PDF, one Helvetica text line per page.
#[cfg(test)]
pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    // 1: catalog, 2: page tree, 3: font, then a (page, content) pair per page
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        tail.push_str(&format!("{offset:010} 00000 n \n"));
    }
    tail.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(tail.as_bytes());
    pdf
}
