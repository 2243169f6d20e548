//! Form field data models.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::form::rules::form_type::FormType;

/// Map from a parent field's item number to its label and subfield labels.
///
/// Insertion-ordered: parents appear in the order they were discovered in the
/// document. A repeated parent number replaces the entry value in place.
pub type HierarchyMap = IndexMap<String, HierarchyEntry>;

/// One extracted form-input unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Item number: a bare integer ("3") for top-level fields or a dotted
    /// letter-suffixed identifier ("3.a") for subfields.
    pub item_number: String,

    /// Human-readable caption, trimmed of leading numbering.
    pub label: String,

    /// Inferred input type; `parent` for fields that own subfields.
    pub field_type: FieldType,

    /// Whether this field owns subfields. Mutually exclusive with
    /// `is_subfield`.
    pub is_parent: bool,

    /// Whether this field was produced by expanding a parent.
    pub is_subfield: bool,

    /// Owning parent's item number. Present only on subfields; a weak
    /// reference used for lookup, never ownership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_number: Option<String>,

    /// Page the field appears on. Reserved; not populated by the heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    /// Bounding box `[x0, y0, x1, y1]`. Reserved; not populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f32; 4]>,

    /// Entered value. Reserved; not populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Choice options for radio fields. Reserved; not populated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Field {
    fn new(item_number: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            item_number: item_number.to_string(),
            label: label.to_string(),
            field_type,
            is_parent: false,
            is_subfield: false,
            parent_number: None,
            page_number: None,
            coordinates: None,
            value: None,
            options: Vec::new(),
        }
    }

    /// Create a top-level leaf field.
    pub fn top_level(item_number: &str, label: &str, field_type: FieldType) -> Self {
        Self::new(item_number, label, field_type)
    }

    /// Create a parent field. Parents carry no independent value.
    pub fn parent(item_number: &str, label: &str) -> Self {
        Self {
            is_parent: true,
            ..Self::new(item_number, label, FieldType::Parent)
        }
    }

    /// Create a subfield of `parent_number`, numbered with `letter`.
    pub fn subfield(parent_number: &str, letter: char, label: &str, field_type: FieldType) -> Self {
        Self {
            is_subfield: true,
            parent_number: Some(parent_number.to_string()),
            ..Self::new(&format!("{}.{}", parent_number, letter), label, field_type)
        }
    }
}

/// Input type of a field, assigned by keyword inference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text entry.
    #[default]
    Text,
    /// Date entry.
    Date,
    /// Telephone number entry.
    Tel,
    /// Email address entry.
    Email,
    /// Numeric entry.
    Number,
    /// Yes/no or checkbox choice.
    Radio,
    /// Owns subfields; no directly enterable value.
    Parent,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Tel => "tel",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Radio => "radio",
            FieldType::Parent => "parent",
        };
        write!(f, "{}", name)
    }
}

/// A parent field's label and the ordered labels of its subfields.
///
/// Never mutated after the parent's subfields are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    /// Parent field label.
    pub label: String,

    /// Subfield labels in template order.
    pub subfields: Vec<String>,
}

/// The complete extraction output for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormExtract {
    /// Detected form type, or `Unknown`.
    pub form_type: FormType,

    /// Flat field sequence in document order; parents are immediately
    /// followed by their subfields.
    pub fields: Vec<Field>,

    /// Parent-number-keyed hierarchy map.
    pub hierarchy: HierarchyMap,

    /// Extraction metadata.
    pub metadata: ExtractionMetadata,
}

/// Metadata about the extraction process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Source document type.
    pub source_type: SourceType,

    /// Processing time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Warnings encountered during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Source document type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Text-based PDF (native text extraction).
    TextPdf,
    /// Already-converted plain text.
    PlainText,
    /// Unknown source.
    #[default]
    Unknown,
}

impl FormExtract {
    /// Number of parent fields in the sequence.
    pub fn parent_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_parent).count()
    }

    /// Number of subfields in the sequence.
    pub fn subfield_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_subfield).count()
    }

    /// Subfields owned by the given parent number, in sequence order.
    pub fn subfields_of<'a>(&'a self, parent_number: &'a str) -> impl Iterator<Item = &'a Field> {
        self.fields
            .iter()
            .filter(move |f| f.parent_number.as_deref() == Some(parent_number))
    }

    /// Validate structural invariants and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen_parents: HashSet<&str> = HashSet::new();
        let mut seen_numbers: HashSet<&str> = HashSet::new();

        for field in &self.fields {
            if field.is_parent && field.is_subfield {
                issues.push(format!(
                    "Field {} is flagged as both parent and subfield",
                    field.item_number
                ));
            }

            if field.is_parent && field.field_type != FieldType::Parent {
                issues.push(format!(
                    "Parent field {} carries value type {}",
                    field.item_number, field.field_type
                ));
            }

            if field.is_subfield {
                match field.parent_number.as_deref() {
                    Some(parent) if seen_parents.contains(parent) => {}
                    Some(parent) => issues.push(format!(
                        "Subfield {} references parent {} that does not appear earlier",
                        field.item_number, parent
                    )),
                    None => issues.push(format!(
                        "Subfield {} has no parent reference",
                        field.item_number
                    )),
                }
            } else if field.parent_number.is_some() {
                issues.push(format!(
                    "Non-subfield {} carries a parent reference",
                    field.item_number
                ));
            }

            if !seen_numbers.insert(field.item_number.as_str()) {
                issues.push(format!("Duplicate item number {}", field.item_number));
            }

            if field.is_parent {
                seen_parents.insert(field.item_number.as_str());
            }
        }

        for (number, entry) in &self.hierarchy {
            let actual = self.subfields_of(number).count();
            if actual != entry.subfields.len() {
                issues.push(format!(
                    "Parent {} has {} subfields in sequence but {} in hierarchy",
                    number,
                    actual,
                    entry.subfields.len()
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subfield_numbering() {
        let field = Field::subfield("3", 'b', "Given Name (First Name)", FieldType::Text);
        assert_eq!(field.item_number, "3.b");
        assert_eq!(field.parent_number.as_deref(), Some("3"));
        assert!(field.is_subfield);
        assert!(!field.is_parent);
    }

    #[test]
    fn test_parent_has_no_value_type() {
        let field = Field::parent("1", "Full Legal Name");
        assert_eq!(field.field_type, FieldType::Parent);
        assert!(field.is_parent);
        assert!(field.parent_number.is_none());
    }

    #[test]
    fn test_field_serialization_skips_reserved_slots() {
        let field = Field::top_level("2", "Date of Birth", FieldType::Date);
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"field_type\":\"date\""));
        assert!(!json.contains("page_number"));
        assert!(!json.contains("coordinates"));
        assert!(!json.contains("value"));
        assert!(!json.contains("options"));
        assert!(!json.contains("parent_number"));
    }

    #[test]
    fn test_validate_detects_orphan_subfield() {
        let extract = FormExtract {
            form_type: FormType::Unknown,
            fields: vec![Field::subfield("9", 'a', "Family Name (Last Name)", FieldType::Text)],
            hierarchy: HierarchyMap::new(),
            metadata: ExtractionMetadata::default(),
        };

        let issues = extract.validate();
        assert!(issues.iter().any(|i| i.contains("does not appear earlier")));
    }

    #[test]
    fn test_validate_accepts_parent_then_subfields() {
        let mut hierarchy = HierarchyMap::new();
        hierarchy.insert(
            "1".to_string(),
            HierarchyEntry {
                label: "Full Legal Name".to_string(),
                subfields: vec!["Family Name (Last Name)".to_string()],
            },
        );

        let extract = FormExtract {
            form_type: FormType::I485,
            fields: vec![
                Field::parent("1", "Full Legal Name"),
                Field::subfield("1", 'a', "Family Name (Last Name)", FieldType::Text),
            ],
            hierarchy,
            metadata: ExtractionMetadata::default(),
        };

        assert!(extract.validate().is_empty());
    }
}
