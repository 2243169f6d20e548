//! Rule-based heuristics for form field recovery.

pub mod field_type;
pub mod form_type;
pub mod line;
pub mod patterns;
pub mod subfields;

pub use field_type::infer_field_type;
pub use form_type::{detect_form_type, FormType};
pub use line::{classify_line, LineClass};
pub use subfields::{matching_trigger, SubfieldRule, EXPANSION_TRIGGERS};
