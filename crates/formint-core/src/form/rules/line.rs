//! Per-line classification of form text.

use super::patterns::{NUMBERED_ITEM, PART_HEADER};

/// Classification of a single non-empty, whitespace-trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// "Part N. Title" section header. Excluded from field output.
    PartHeader { number: u32, title: String },

    /// "N. Label" numbered item, yielding the item number and caption.
    NumberedItem { number: String, label: String },

    /// Line that contributes nothing.
    Inert,
}

/// Classify one trimmed line.
///
/// Lines are processed strictly in document order with no lookback or
/// lookahead; the caller skips blank lines before classification.
pub fn classify_line(line: &str) -> LineClass {
    if let Some(caps) = PART_HEADER.captures(line) {
        return LineClass::PartHeader {
            number: caps[1].parse().unwrap_or(0),
            title: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = NUMBERED_ITEM.captures(line) {
        return LineClass::NumberedItem {
            number: caps[1].to_string(),
            label: caps[2].trim().to_string(),
        };
    }

    LineClass::Inert
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_header() {
        assert_eq!(
            classify_line("Part 2. Application Type"),
            LineClass::PartHeader {
                number: 2,
                title: "Application Type".to_string()
            }
        );
    }

    #[test]
    fn test_numbered_item() {
        assert_eq!(
            classify_line("3. Date of Birth"),
            LineClass::NumberedItem {
                number: "3".to_string(),
                label: "Date of Birth".to_string()
            }
        );
    }

    #[test]
    fn test_part_header_wins_over_numbered_item() {
        // "Part 1. ..." must never be treated as field 1
        let class = classify_line("Part 1. Information About You");
        assert!(matches!(class, LineClass::PartHeader { number: 1, .. }));
    }

    #[test]
    fn test_inert_lines() {
        assert_eq!(classify_line("USCIS Use Only"), LineClass::Inert);
        assert_eq!(classify_line("a. Lettered continuation"), LineClass::Inert);
        assert_eq!(classify_line("(continued on next page)"), LineClass::Inert);
    }
}
