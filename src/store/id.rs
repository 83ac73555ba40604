//! Repository identifiers.
//!
//! Ids are random (v4) UUIDs. Incoming ids must use the canonical
//! hyphenated `8-4-4-4-12` text form; hex digits are case-insensitive.

use uuid::Uuid;

/// Length of the canonical hyphenated form.
const HYPHENATED_LEN: usize = 36;

/// Returns true if `raw` is a UUID in canonical hyphenated form.
///
/// `Uuid` also parses braced, URN and simple encodings; those are rejected here.
pub fn is_valid_id(raw: &str) -> bool {
    raw.len() == HYPHENATED_LEN && Uuid::try_parse(raw).is_ok()
}

/// Generate a fresh repository id.
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}
