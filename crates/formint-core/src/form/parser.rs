//! Form field extraction over converted document text.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::field::{ExtractionMetadata, FormExtract, HierarchyMap, SourceType};

use super::builder::build_fields;
use super::rules::form_type::detect_form_type;
use super::rules::line::{classify_line, LineClass};
use super::FieldExtraction;

/// Result of one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted form data.
    pub form: FormExtract,

    /// Raw input text.
    pub raw_text: String,

    /// Debug trace: one free-text entry per classified line, in order.
    pub trace: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based form field parser.
///
/// Performs a single forward pass over the input lines. The pass has no
/// failure modes: text that matches nothing yields an empty field sequence.
pub struct FormParser {
    capture_trace: bool,
}

impl FormParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            capture_trace: true,
        }
    }

    /// Set whether to collect the per-line debug trace.
    pub fn with_trace(mut self, capture: bool) -> Self {
        self.capture_trace = capture;
        self
    }

    /// Extract labeled fields from converted document text.
    ///
    /// Each run owns its outputs; nothing is shared across runs or
    /// documents. An empty input is a valid input and produces an empty
    /// field sequence.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("parsing form text ({} characters)", text.len());

        let form_type = detect_form_type(text);

        let mut fields = Vec::new();
        let mut hierarchy = HierarchyMap::new();
        let mut trace = Vec::new();
        let mut warnings = Vec::new();
        let mut current_part: Option<u32> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            match classify_line(line) {
                LineClass::PartHeader { number, title } => {
                    current_part = Some(number);
                    if self.capture_trace {
                        trace.push(format!("entering part {}: '{}'", number, title));
                    }
                }
                LineClass::NumberedItem { number, label } => {
                    let expansion = build_fields(&number, &label);
                    fields.extend(expansion.fields);
                    if let Some((parent_number, entry)) = expansion.hierarchy {
                        hierarchy.insert(parent_number, entry);
                    }
                    if self.capture_trace {
                        trace.extend(expansion.trace);
                    }
                }
                LineClass::Inert => {}
            }
        }

        if fields.is_empty() {
            warnings.push("no numbered items found in input text".to_string());
        }

        debug!(
            "extraction pass complete: {} fields, {} parents, last part {:?}",
            fields.len(),
            hierarchy.len(),
            current_part
        );

        let processing_time_ms = start.elapsed().as_millis() as u64;

        ExtractionResult {
            form: FormExtract {
                form_type,
                fields,
                hierarchy,
                metadata: ExtractionMetadata {
                    source_type: SourceType::Unknown,
                    processing_time_ms: Some(processing_time_ms),
                    warnings,
                },
            },
            raw_text: text.to_string(),
            trace,
            processing_time_ms,
        }
    }
}

impl Default for FormParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtraction for FormParser {
    fn extract_fields(&self, text: &str) -> ExtractionResult {
        self.parse(text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::field::FieldType;
    use crate::form::rules::form_type::FormType;

    #[test]
    fn test_basic_form() {
        let text = "1. Full Legal Name\n2. Date of Birth\n";
        let result = FormParser::new().parse(text);

        let fields = &result.form.fields;
        assert_eq!(fields.len(), 5);

        assert_eq!(fields[0].item_number, "1");
        assert_eq!(fields[0].label, "Full Legal Name");
        assert!(fields[0].is_parent);

        assert_eq!(fields[1].item_number, "1.a");
        assert_eq!(fields[1].label, "Family Name (Last Name)");
        assert_eq!(fields[2].item_number, "1.b");
        assert_eq!(fields[2].label, "Given Name (First Name)");
        assert_eq!(fields[3].item_number, "1.c");
        assert_eq!(fields[3].label, "Middle Name");

        assert_eq!(fields[4].item_number, "2");
        assert_eq!(fields[4].label, "Date of Birth");
        assert_eq!(fields[4].field_type, FieldType::Date);
        assert!(!fields[4].is_parent);
        assert!(!fields[4].is_subfield);
    }

    #[test]
    fn test_non_matching_lines_emit_nothing() {
        let text = "USCIS Use Only\n\nRead the instructions carefully.\na. stray letter item\n";
        let result = FormParser::new().parse(text);

        assert!(result.form.fields.is_empty());
        assert!(result.form.hierarchy.is_empty());
        assert_eq!(
            result.form.metadata.warnings,
            vec!["no numbered items found in input text".to_string()]
        );
    }

    #[test]
    fn test_empty_input_degrades_without_error() {
        let result = FormParser::new().parse("");
        assert!(result.form.fields.is_empty());
        assert!(result.form.hierarchy.is_empty());
        assert_eq!(result.form.form_type, FormType::Unknown);
    }

    #[test]
    fn test_part_headers_excluded_from_fields() {
        let text = "Part 1. Information About You\n1. Alien Registration Number\n";
        let result = FormParser::new().parse(text);

        assert_eq!(result.form.fields.len(), 1);
        assert_eq!(result.form.fields[0].field_type, FieldType::Number);
        assert!(result.trace.iter().any(|t| t.contains("entering part 1")));
    }

    #[test]
    fn test_legal_name_expansion_property() {
        let text = "Form I-485\n5. Your Full Legal Name\n";
        let result = FormParser::new().parse(text);

        assert_eq!(result.form.form_type, FormType::I485);

        let parents: Vec<_> = result.form.fields.iter().filter(|f| f.is_parent).collect();
        assert_eq!(parents.len(), 1);

        let numbers: Vec<_> = result
            .form
            .fields
            .iter()
            .filter(|f| f.is_subfield)
            .map(|f| f.item_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["5.a", "5.b", "5.c"]);
    }

    #[test]
    fn test_mailing_address_property() {
        let text = "3. Mailing Address\n";
        let result = FormParser::new().parse(text);

        assert_eq!(result.form.subfield_count(), 6);
        let entry = &result.form.hierarchy["3"];
        assert_eq!(entry.label, "Mailing Address");
        assert_eq!(entry.subfields.len(), 6);
    }

    #[test]
    fn test_parents_immediately_followed_by_subfields() {
        let text = "1. Home Address\n2. Full Legal Name\n3. Email Address\n";
        let result = FormParser::new().parse(text);

        let numbers: Vec<_> = result
            .form
            .fields
            .iter()
            .map(|f| f.item_number.as_str())
            .collect();
        assert_eq!(
            numbers,
            vec!["1", "1.a", "1.b", "1.c", "1.d", "1.e", "2", "2.a", "2.b", "2.c", "3"]
        );
        assert!(result.form.validate().is_empty());
    }

    #[test]
    fn test_idempotence() {
        let text = "Form I-130\nPart 2. Relationship\n1. Full Legal Name\n2. Physical Address\n\
                    3. Date of Birth\n4. Daytime Phone\nnothing here\n";
        let first = FormParser::new().parse(text);
        let second = FormParser::new().parse(text);

        assert_eq!(first.form.fields, second.form.fields);
        assert_eq!(first.form.hierarchy, second.form.hierarchy);
        assert_eq!(first.form.form_type, second.form.form_type);
        assert_eq!(first.trace, second.trace);
    }

    #[test]
    fn test_duplicate_numbers_preserved() {
        // Conversion artifacts can repeat a number; records stay independent
        let text = "3. Date of Birth\n3. Place of Birth\n";
        let result = FormParser::new().parse(text);

        assert_eq!(result.form.fields.len(), 2);
        assert_eq!(result.form.fields[0].item_number, "3");
        assert_eq!(result.form.fields[1].item_number, "3");
        assert_eq!(result.form.fields[1].label, "Place of Birth");
    }

    #[test]
    fn test_trace_disabled() {
        let text = "Part 1. About You\n1. Full Legal Name\n";
        let result = FormParser::new().with_trace(false).parse(text);

        assert!(result.trace.is_empty());
        assert_eq!(result.form.fields.len(), 4);
    }

    #[test]
    fn test_extraction_through_trait_object() {
        let parser: &dyn FieldExtraction = &FormParser::new();
        let result = parser.extract_fields("1. Date of Birth\n");
        assert_eq!(result.form.fields.len(), 1);
    }

    #[test]
    fn test_trace_records_every_classification() {
        let text = "Part 1. About You\n1. Full Legal Name\n2. Date of Birth\n";
        let result = FormParser::new().parse(text);

        assert_eq!(result.trace.len(), 3);
        assert!(result.trace[0].contains("entering part 1"));
        assert!(result.trace[1].contains("matched trigger 'legal name'"));
        assert!(result.trace[2].contains("classified as date"));
    }
}
