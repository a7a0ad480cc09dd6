//! Text Extraction: turns an uploaded PDF into plain text.
//!
//! Pages are concatenated in document order. A PDF without a text layer
//! yields an empty string, not an error.

pub mod handlers;

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded document is empty")]
    EmptyDocument,

    #[error("Error extracting text from PDF: {0}")]
    Parse(String),

    #[error("Error extracting text from PDF: the document could not be parsed")]
    Panicked,
}

/// Extracts the text of every page, in page order.
///
/// The PDF parser can panic on malformed input; that is caught and reported as
/// `ExtractionError::Panicked`.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match result {
        Ok(Ok(text)) if text.trim().is_empty() => {
            debug!("PDF of {} bytes has no text layer", bytes.len());
            Ok(String::new())
        }
        Ok(Ok(text)) => {
            debug!(
                "Extracted {} characters from {} byte PDF",
                text.chars().count(),
                bytes.len()
            );
            Ok(text)
        }
        Ok(Err(e)) => Err(ExtractionError::Parse(e.to_string())),
        Err(_) => Err(ExtractionError::Panicked),
    }
}

/// Hand-built PDF documents for extraction tests.
#[cfg(test)]
pub mod testing {
    /// Builds a PDF with one page per content stream, all pages sharing a
    /// Helvetica font as `/F1`.
    pub fn pdf_with_pages(page_streams: &[&str]) -> Vec<u8> {
        let kids: Vec<String> = (0..page_streams.len())
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_streams.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];
        for (i, content) in page_streams.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    /// A content stream drawing `text` in `/F1`.
    pub fn text_stream(text: &str) -> String {
        format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET")
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{pdf_with_pages, text_stream};
    use super::*;

    #[test]
    fn test_pages_are_concatenated_in_order() {
        let pdf = pdf_with_pages(&[&text_stream("FirstPage"), &text_stream("SecondPage")]);
        let text = extract_text(&pdf).unwrap();

        let first = text.find("FirstPage").expect("page 1 text missing");
        let second = text.find("SecondPage").expect("page 2 text missing");
        assert!(first < second, "pages out of order: {text:?}");
    }

    #[test]
    fn test_pdf_without_text_layer_yields_empty_string() {
        let pdf = pdf_with_pages(&[""]);
        assert_eq!(extract_text(&pdf).unwrap(), "");
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert!(matches!(
            extract_text(&[]),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_non_pdf_bytes_fail_without_panicking() {
        let result = extract_text(b"this is definitely not a PDF document");
        assert!(matches!(
            result,
            Err(ExtractionError::Parse(_)) | Err(ExtractionError::Panicked)
        ));
    }

    #[test]
    fn test_truncated_pdf_fails_without_panicking() {
        let result = extract_text(b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_messages_carry_prefix() {
        let err = ExtractionError::Parse("invalid file header".to_string());
        assert_eq!(
            err.to_string(),
            "Error extracting text from PDF: invalid file header"
        );
    }
}
