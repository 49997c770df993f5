//! Output writing and reference validation.

pub mod validate;
pub mod writer;

pub use validate::compare_to_reference;
pub use writer::{to_json_string, write_json};
