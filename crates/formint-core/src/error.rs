//! Error types for the formint-core library.

use thiserror::Error;

/// Main error type for the formint library.
#[derive(Error, Debug)]
pub enum FormintError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// The field-extraction pass itself has no failure modes: malformed text
/// yields fewer or no fields, never an error. Only the PDF surface can fail.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the formint library.
pub type Result<T> = std::result::Result<T, FormintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_error_converts_to_library_error() {
        let err: FormintError = PdfError::Encrypted.into();
        assert!(matches!(err, FormintError::Pdf(PdfError::Encrypted)));
        assert_eq!(err.to_string(), "PDF error: PDF is encrypted");
    }

    #[test]
    fn test_invalid_page_message() {
        assert_eq!(
            PdfError::InvalidPage(7).to_string(),
            "invalid page number: 7"
        );
    }
}
