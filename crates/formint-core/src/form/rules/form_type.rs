//! Form-type detection over known immigration form codes.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::patterns::{FORM_I130, FORM_I131, FORM_I485, FORM_I765, FORM_I90, FORM_N400};

/// Known immigration form types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormType {
    #[serde(rename = "I-485")]
    I485,
    #[serde(rename = "I-130")]
    I130,
    #[serde(rename = "I-765")]
    I765,
    #[serde(rename = "I-131")]
    I131,
    #[serde(rename = "N-400")]
    N400,
    #[serde(rename = "I-90")]
    I90,
    #[serde(rename = "Unknown")]
    #[default]
    Unknown,
}

impl FormType {
    /// Official form code, or "Unknown".
    pub fn code(&self) -> &'static str {
        match self {
            FormType::I485 => "I-485",
            FormType::I130 => "I-130",
            FormType::I765 => "I-765",
            FormType::I131 => "I-131",
            FormType::N400 => "N-400",
            FormType::I90 => "I-90",
            FormType::Unknown => "Unknown",
        }
    }

    /// Official form title.
    pub fn title(&self) -> &'static str {
        match self {
            FormType::I485 => "Application to Register Permanent Residence or Adjust Status",
            FormType::I130 => "Petition for Alien Relative",
            FormType::I765 => "Application for Employment Authorization",
            FormType::I131 => "Application for Travel Document",
            FormType::N400 => "Application for Naturalization",
            FormType::I90 => "Application to Replace Permanent Resident Card",
            FormType::Unknown => "Unknown form",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Detect the form type from full document text.
///
/// The first matching pattern wins; the scan order below is fixed. Returns
/// `FormType::Unknown` when none of the known codes appear.
pub fn detect_form_type(text: &str) -> FormType {
    let known: [(FormType, &Regex); 6] = [
        (FormType::I485, &*FORM_I485),
        (FormType::I130, &*FORM_I130),
        (FormType::I765, &*FORM_I765),
        (FormType::I131, &*FORM_I131),
        (FormType::N400, &*FORM_N400),
        (FormType::I90, &*FORM_I90),
    ];

    for (form, pattern) in known {
        if pattern.is_match(text) {
            return form;
        }
    }

    FormType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_i485_anywhere_in_text() {
        let text = "USCIS\nForm I-485\nApplication to Register Permanent Residence";
        assert_eq!(detect_form_type(text), FormType::I485);

        let text = "some preamble mentioning the I-485 in passing, nothing else";
        assert_eq!(detect_form_type(text), FormType::I485);
    }

    #[test]
    fn test_detect_each_known_form() {
        assert_eq!(detect_form_type("Form I-130 petition"), FormType::I130);
        assert_eq!(detect_form_type("form i-765 application"), FormType::I765);
        assert_eq!(detect_form_type("I-131 Travel Document"), FormType::I131);
        assert_eq!(detect_form_type("N-400 Naturalization"), FormType::N400);
        assert_eq!(detect_form_type("Form I-90"), FormType::I90);
    }

    #[test]
    fn test_unknown_when_no_code_present() {
        assert_eq!(detect_form_type("W-2 Wage and Tax Statement"), FormType::Unknown);
        assert_eq!(detect_form_type(""), FormType::Unknown);
    }

    #[test]
    fn test_serde_uses_form_code() {
        let json = serde_json::to_string(&FormType::I485).unwrap();
        assert_eq!(json, "\"I-485\"");
        let parsed: FormType = serde_json::from_str("\"N-400\"").unwrap();
        assert_eq!(parsed, FormType::N400);
    }
}
