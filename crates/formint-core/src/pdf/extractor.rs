//! PDF text extraction using pdf-extract with a lopdf fallback.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor.
///
/// Primary extraction goes through `pdf-extract`; when that fails or yields
/// too little text, extraction falls back to lopdf's content-stream text and
/// keeps whichever result is longer.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Full extracted text.
    pub text: String,
    /// Pages with their content.
    pub pages: Vec<PdfPage>,
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: 50,
        }
    }

    /// Set the minimum text length used by the fallback and scan analysis.
    pub fn with_min_text_length(mut self, length: usize) -> Self {
        self.min_text_length = length;
        self
    }

    /// Extract full text and per-page content.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("no document loaded".to_string()))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(PdfError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            let text = self.extract_page_text(number).unwrap_or_default();
            pages.push(PdfPage { number, text });
        }

        let text = self.extract_text()?;
        let pdf_type = self.analyze();

        Ok(PdfContent {
            pdf_type,
            text,
            pages,
        })
    }

    fn extract_text_fallback(&self) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("no document loaded".to_string()))?;

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        doc.extract_text(&pages)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // Save decrypted document so pdf-extract sees plain content
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();

        let pdf_type = if text.trim().len() >= self.min_text_length {
            PdfType::Text
        } else {
            PdfType::Scanned
        };

        debug!(
            "PDF analysis: {} chars of text -> {:?}",
            text.trim().len(),
            pdf_type
        );
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        match pdf_extract::extract_text_from_mem(&self.raw_data) {
            Ok(text) if text.trim().len() >= self.min_text_length => Ok(text),
            Ok(text) => {
                debug!(
                    "pdf-extract returned {} chars, trying lopdf fallback",
                    text.trim().len()
                );
                match self.extract_text_fallback() {
                    Ok(fallback) if fallback.trim().len() > text.trim().len() => Ok(fallback),
                    _ => Ok(text),
                }
            }
            Err(e) => {
                warn!("pdf-extract failed ({}), falling back to lopdf", e);
                self.extract_text_fallback()
            }
        }
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("no document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    use super::*;

    /// Build a minimal single-page PDF with one line of text.
    fn minimal_form_pdf(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.document.is_none());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"not a pdf at all");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_page_text_requires_loaded_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.extract_page_text(1),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_load_and_extract_minimal_pdf() {
        let data = minimal_form_pdf("1. Full Legal Name");
        let mut extractor = PdfExtractor::new().with_min_text_length(5);
        extractor.load(&data).unwrap();

        assert_eq!(extractor.page_count(), 1);

        let text = extractor.extract_text().unwrap();
        assert!(text.contains("Full Legal Name"));
        assert_eq!(extractor.analyze(), PdfType::Text);
    }

    #[test]
    fn test_short_text_reported_as_scanned() {
        let data = minimal_form_pdf("1. Full Legal Name");
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();

        // One short line falls below the default threshold
        assert_eq!(extractor.analyze(), PdfType::Scanned);
    }

    #[test]
    fn test_invalid_page_number() {
        let data = minimal_form_pdf("1. Full Legal Name");
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();

        assert!(matches!(
            extractor.extract_page_text(2),
            Err(PdfError::InvalidPage(2))
        ));
    }

    #[test]
    fn test_extract_all_collects_pages() {
        let data = minimal_form_pdf("1. Full Legal Name");
        let mut extractor = PdfExtractor::new().with_min_text_length(5);
        extractor.load(&data).unwrap();

        let content = extractor.extract_all().unwrap();
        assert_eq!(content.pages.len(), 1);
        assert_eq!(content.pages[0].number, 1);
        assert_eq!(content.pdf_type, PdfType::Text);
        assert!(content.text.contains("Full Legal Name"));
    }
}
