//! Field construction from classified numbered items.

use crate::models::field::{Field, HierarchyEntry};

use super::rules::field_type::infer_field_type;
use super::rules::subfields::{matching_trigger, SubfieldRule};

/// Fields produced from one numbered item, plus the hierarchy entry when the
/// item expanded into subfields.
#[derive(Debug, Clone)]
pub struct FieldExpansion {
    /// Parent followed by its subfields, or a single regular field.
    pub fields: Vec<Field>,

    /// Hierarchy entry keyed by the parent's item number.
    pub hierarchy: Option<(String, HierarchyEntry)>,

    /// Trace entries describing the classification.
    pub trace: Vec<String>,
}

/// Build the field records for a numbered item.
///
/// A label containing an expansion trigger yields one parent field followed
/// by its template subfields numbered `{n}.a`, `{n}.b`, ...; each subfield's
/// type is inferred independently from its own canonical label. Any other
/// label yields a single field typed by keyword inference.
pub fn build_fields(item_number: &str, label: &str) -> FieldExpansion {
    let mut trace = Vec::new();

    if let Some(trigger) = matching_trigger(label) {
        let rule = SubfieldRule::select(label);
        let labels = rule.subfield_labels();

        let mut fields = Vec::with_capacity(labels.len() + 1);
        fields.push(Field::parent(item_number, label));

        let mut subfield_labels = Vec::with_capacity(labels.len());
        for (i, sub_label) in labels.iter().enumerate() {
            let letter = (b'a' + i as u8) as char;
            fields.push(Field::subfield(
                item_number,
                letter,
                sub_label,
                infer_field_type(sub_label),
            ));
            subfield_labels.push(sub_label.to_string());
        }

        trace.push(format!(
            "item {}: '{}' matched trigger '{}', expanded into {} subfields ({} template)",
            item_number,
            label,
            trigger,
            labels.len(),
            rule.name()
        ));

        let entry = HierarchyEntry {
            label: label.to_string(),
            subfields: subfield_labels,
        };

        FieldExpansion {
            fields,
            hierarchy: Some((item_number.to_string(), entry)),
            trace,
        }
    } else {
        let field_type = infer_field_type(label);
        trace.push(format!(
            "item {}: '{}' classified as {}",
            item_number, label, field_type
        ));

        FieldExpansion {
            fields: vec![Field::top_level(item_number, label, field_type)],
            hierarchy: None,
            trace,
        }
    }
}
