//! Subfield expansion triggers and label templates.

/// Phrases whose presence in a label causes subfield expansion.
/// Matched case-insensitively as substrings of the lowercased label.
pub const EXPANSION_TRIGGERS: [&str; 9] = [
    "full name",
    "legal name",
    "your name",
    "physical address",
    "mailing address",
    "home address",
    "current address",
    "phone",
    "telephone",
];

/// Canonical subfield labels for name fields.
pub const NAME_SUBFIELDS: [&str; 3] = [
    "Family Name (Last Name)",
    "Given Name (First Name)",
    "Middle Name",
];

/// Canonical subfield labels for address fields.
pub const ADDRESS_SUBFIELDS: [&str; 5] = [
    "Street Number and Name",
    "Apt. Ste. Flr. Number",
    "City or Town",
    "State",
    "ZIP Code",
];

/// Acknowledgment prepended to the address template for mailing addresses.
pub const MAILING_ACKNOWLEDGMENT: &str =
    "Is this address the same as your physical address? (Yes/No)";

/// Canonical subfield labels for phone/contact fields.
pub const PHONE_SUBFIELDS: [&str; 3] = [
    "Daytime Telephone Number",
    "Mobile Telephone Number",
    "Email Address",
];

/// Placeholder labels when no specific template applies.
pub const GENERIC_SUBFIELDS: [&str; 3] = ["Field A", "Field B", "Field C"];

/// Return the first trigger phrase found in the label, if any.
pub fn matching_trigger(label: &str) -> Option<&'static str> {
    let label = label.to_lowercase();
    EXPANSION_TRIGGERS.iter().copied().find(|t| label.contains(t))
}

/// Template selection rules, evaluated top-to-bottom.
///
/// An explicit ordered list rather than map iteration, so the dispatch
/// priority is visible and independent of any container ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubfieldRule {
    Name,
    Address,
    Mailing,
    Phone,
    Default,
}

/// Rule evaluation order. `Default` is the terminal fallback and always
/// applies.
pub const SUBFIELD_RULES: [SubfieldRule; 5] = [
    SubfieldRule::Name,
    SubfieldRule::Address,
    SubfieldRule::Mailing,
    SubfieldRule::Phone,
    SubfieldRule::Default,
];

impl SubfieldRule {
    /// Whether this rule applies to the given lowercased label.
    fn applies(&self, label: &str) -> bool {
        match self {
            SubfieldRule::Name => label.contains("name"),
            SubfieldRule::Address => label.contains("address") && !label.contains("mailing"),
            SubfieldRule::Mailing => label.contains("mailing"),
            SubfieldRule::Phone => label.contains("phone") || label.contains("telephone"),
            SubfieldRule::Default => true,
        }
    }

    /// Select the first rule that applies to the label.
    pub fn select(label: &str) -> SubfieldRule {
        let label = label.to_lowercase();
        SUBFIELD_RULES
            .iter()
            .copied()
            .find(|r| r.applies(&label))
            .unwrap_or(SubfieldRule::Default)
    }

    /// Short rule name for trace output.
    pub fn name(&self) -> &'static str {
        match self {
            SubfieldRule::Name => "name",
            SubfieldRule::Address => "address",
            SubfieldRule::Mailing => "mailing",
            SubfieldRule::Phone => "phone",
            SubfieldRule::Default => "generic",
        }
    }

    /// Subfield labels for this rule, in template order.
    pub fn subfield_labels(&self) -> Vec<&'static str> {
        match self {
            SubfieldRule::Name => NAME_SUBFIELDS.to_vec(),
            SubfieldRule::Address => ADDRESS_SUBFIELDS.to_vec(),
            SubfieldRule::Mailing => {
                let mut labels = Vec::with_capacity(ADDRESS_SUBFIELDS.len() + 1);
                labels.push(MAILING_ACKNOWLEDGMENT);
                labels.extend(ADDRESS_SUBFIELDS);
                labels
            }
            SubfieldRule::Phone => PHONE_SUBFIELDS.to_vec(),
            SubfieldRule::Default => GENERIC_SUBFIELDS.to_vec(),
        }
    }
}
