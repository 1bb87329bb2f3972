//! Tag set validation
//!
//! Tag names must be non-empty, start with a letter, contain only letters,
//! digits, `_` or `-`, and be one of the well-known documentation tags.

use std::sync::LazyLock;

use regex::Regex;

use super::TagSet;
use crate::error::{DocblockError, Result};

/// Tag names accepted in a configured tag set
pub const ALLOWED_TAGS: &[&str] = &[
    "author",
    "copyright",
    "license",
    "version",
    "since",
    "package",
    "subpackage",
    "see",
    "link",
    "todo",
    "fixme",
    "deprecated",
    "internal",
    "api",
    "category",
    "example",
    "ignore",
    "uses",
    "used-by",
    "throws",
    "method",
    "property",
    "property-read",
    "property-write",
    "param",
    "return",
    "var",
    "global",
    "static",
    "final",
    "abstract",
];

static TAG_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());

/// Validate every tag name in `tags`; values are never inspected.
pub fn validate(tags: &TagSet) -> Result<()> {
    tags.names().try_for_each(validate_name)
}

/// Validate a single tag name
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DocblockError::EmptyTag(name.to_string()));
    }

    if !TAG_NAME_PATTERN.is_match(name) {
        return Err(DocblockError::InvalidTagName(name.to_string()));
    }

    if !ALLOWED_TAGS.contains(&name) {
        return Err(DocblockError::UnknownTag {
            key: name.to_string(),
            allowed: ALLOWED_TAGS.join(", "),
        });
    }

    Ok(())
}
