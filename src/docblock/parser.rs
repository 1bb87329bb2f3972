//! DocBlock parser
//!
//! Extracts `@tag value` lines from an existing block. Free text such as a
//! leading name sentence is dropped; only tags survive.

use std::sync::LazyLock;

use regex::Regex;

use crate::tags::TagSet;

/// Matches a tag line after the comment decoration is stripped.
/// Groups: 1=tag name, 2=value
static TAG_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([\w-]+)(?:\s+(.*))?$").unwrap());

/// Parse the tags of a DocBlock. Repeated tags become lists.
pub fn parse(comment: &str) -> TagSet {
    let mut tags = TagSet::new();

    for line in comment.split('\n') {
        let line = strip_decoration(line);
        let Some(caps) = TAG_LINE_PATTERN.captures(line) else {
            continue;
        };

        let value = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        tags.append(&caps[1], value.to_string());
    }

    tags
}

fn strip_decoration(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c.is_whitespace() || c == '/' || c == '*');
    let line = line.trim_end();
    line.strip_suffix("*/").unwrap_or(line).trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docblock::{render, RenderOptions};
    use crate::tags::TagValue;

    #[test]
    fn test_parse_simple_block() {
        let tags = parse("/**\n * @author John Doe\n * @license MIT\n */");
        assert_eq!(
            tags,
            TagSet::new().with("author", "John Doe").with("license", "MIT")
        );
    }

    #[test]
    fn test_repeated_tags_become_list() {
        let tags = parse("/**\n * @author A\n * @license MIT\n * @author B\n */");
        assert_eq!(tags.get("author"), Some(&TagValue::from(vec!["A", "B"])));
        assert_eq!(tags.names().collect::<Vec<_>>(), vec!["author", "license"]);
    }

    #[test]
    fn test_bare_tag_is_empty_scalar() {
        let tags = parse("/**\n * @internal\n */");
        assert_eq!(tags.get("internal"), Some(&TagValue::from("")));
    }

    #[test]
    fn test_free_text_is_ignored() {
        let tags = parse("/**\n * MyClass.\n *\n * Some prose about it.\n * @author X\n */");
        assert_eq!(tags, TagSet::new().with("author", "X"));
    }

    #[test]
    fn test_single_line_block() {
        let tags = parse("/** @license MIT */");
        assert_eq!(tags, TagSet::new().with("license", "MIT"));
    }

    #[test]
    fn test_hyphenated_tags_and_values_with_slashes() {
        let tags = parse("/**\n * @property-read int $id\n * @link https://example.com/\n */");
        assert_eq!(
            tags,
            TagSet::new()
                .with("property-read", "int $id")
                .with("link", "https://example.com/")
        );
    }

    #[test]
    fn test_crlf_lines() {
        let tags = parse("/**\r\n * @author X\r\n */");
        assert_eq!(tags, TagSet::new().with("author", "X"));
    }

    #[test]
    fn test_inline_at_sign_is_not_a_tag() {
        let tags = parse("/**\n * Mail me at x@example.com\n */");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_render_parse_round_trip() {
        let tags = TagSet::new()
            .with("author", vec!["John Doe <john@example.com>", "Jane Smith"])
            .with("license", "GPL-3.0-or-later")
            .with("used-by", "Other\\Thing")
            .with("since", "1.2.0");

        let rendered = render(&tags, "", RenderOptions::default());
        assert_eq!(parse(&rendered), tags);
    }
}
