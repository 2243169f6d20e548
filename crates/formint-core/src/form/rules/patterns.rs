//! Regex patterns for form text segmentation and form identification.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Section header, e.g. "Part 2. Information About You"
    pub static ref PART_HEADER: Regex = Regex::new(
        r"(?i)^part\s+(\d+)\.\s*(.*)$"
    ).unwrap();

    // Numbered item at the start of a line, e.g. "3. Your Full Legal Name"
    pub static ref NUMBERED_ITEM: Regex = Regex::new(
        r"^(\d+)\.\s+(.+)$"
    ).unwrap();

    // Known form codes. Hyphen is optional to tolerate conversion artifacts.
    pub static ref FORM_I485: Regex = Regex::new(r"(?i)\bI[-\s]?485\b").unwrap();

    pub static ref FORM_I130: Regex = Regex::new(r"(?i)\bI[-\s]?130\b").unwrap();

    pub static ref FORM_I765: Regex = Regex::new(r"(?i)\bI[-\s]?765\b").unwrap();

    pub static ref FORM_I131: Regex = Regex::new(r"(?i)\bI[-\s]?131\b").unwrap();

    pub static ref FORM_N400: Regex = Regex::new(r"(?i)\bN[-\s]?400\b").unwrap();

    pub static ref FORM_I90: Regex = Regex::new(r"(?i)\bI[-\s]?90\b").unwrap();
}
