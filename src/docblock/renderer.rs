//! DocBlock renderer
//!
//! Output depends only on the tag set's order and content. The closing
//! `*/` carries no trailing newline; spacing after the block belongs to the
//! fixer.

use crate::tags::{TagSet, TagValue};

/// The block rendered for an empty tag set without a name line
pub const EMPTY_BLOCK: &str = "/**\n */";

/// Rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Lead with a `Name.` sentence when the declaration name is known
    pub add_name: bool,
}

impl RenderOptions {
    pub fn with_name(add_name: bool) -> Self {
        Self { add_name }
    }
}

/// Render `tags` (and optionally `name`) as a DocBlock
pub fn render(tags: &TagSet, name: &str, options: RenderOptions) -> String {
    if tags.is_empty() && !options.add_name {
        return EMPTY_BLOCK.to_string();
    }

    let mut block = String::from("/**\n");

    if options.add_name && !name.is_empty() {
        block.push_str(&format!(" * {}.\n", name));

        // Blank separator line between the sentence and the tags
        if !tags.is_empty() {
            block.push_str(" *\n");
        }
    }

    for (tag, value) in tags {
        if value.is_empty() {
            block.push_str(&format!(" * @{}\n", tag));
            continue;
        }

        match value {
            TagValue::List(items) => {
                for item in items {
                    block.push_str(&format!(" * @{} {}\n", tag, item));
                }
            }
            TagValue::Scalar(item) => {
                block.push_str(&format!(" * @{} {}\n", tag, item));
            }
        }
    }

    block.push_str(" */");
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(tags: &TagSet) -> String {
        render(tags, "", RenderOptions::default())
    }

    #[test]
    fn test_empty_tags() {
        assert_eq!(plain(&TagSet::new()), "/**\n */");
    }

    #[test]
    fn test_single_tag() {
        let tags = TagSet::new().with("author", "John Doe <john@example.com>");
        assert_eq!(
            plain(&tags),
            "/**\n * @author John Doe <john@example.com>\n */"
        );
    }

    #[test]
    fn test_multiple_tags_keep_order() {
        let tags = TagSet::new()
            .with("author", "John Doe <john@example.com>")
            .with("license", "MIT")
            .with("package", "MyPackage");
        assert_eq!(
            plain(&tags),
            "/**\n * @author John Doe <john@example.com>\n * @license MIT\n * @package MyPackage\n */"
        );
    }

    #[test]
    fn test_list_value_repeats_tag() {
        let tags = TagSet::new()
            .with(
                "author",
                vec!["John Doe <john@example.com>", "Jane Smith <jane@example.com>"],
            )
            .with("license", "MIT");
        assert_eq!(
            plain(&tags),
            "/**\n * @author John Doe <john@example.com>\n * @author Jane Smith <jane@example.com>\n * @license MIT\n */"
        );
    }

    #[test]
    fn test_empty_values_render_bare() {
        let tags = TagSet::new()
            .with("deprecated", "")
            .with("author", "John Doe")
            .with("internal", TagValue::default())
            .with("license", "MIT")
            .with("api", Vec::<String>::new());
        assert_eq!(
            plain(&tags),
            "/**\n * @deprecated\n * @author John Doe\n * @internal\n * @license MIT\n * @api\n */"
        );
    }

    #[test]
    fn test_name_line_with_tags() {
        let tags = TagSet::new().with("author", "X");
        assert_eq!(
            render(&tags, "MyClass", RenderOptions::with_name(true)),
            "/**\n * MyClass.\n *\n * @author X\n */"
        );
    }

    #[test]
    fn test_name_line_without_tags() {
        assert_eq!(
            render(&TagSet::new(), "MyClass", RenderOptions::with_name(true)),
            "/**\n * MyClass.\n */"
        );
    }

    #[test]
    fn test_unknown_name_skips_sentence() {
        let tags = TagSet::new().with("author", "X");
        assert_eq!(
            render(&tags, "", RenderOptions::with_name(true)),
            "/**\n * @author X\n */"
        );
        assert_eq!(
            render(&TagSet::new(), "", RenderOptions::with_name(true)),
            EMPTY_BLOCK
        );
    }

    #[test]
    fn test_name_ignored_when_disabled() {
        let tags = TagSet::new().with("author", "X");
        assert_eq!(
            render(&tags, "MyClass", RenderOptions::default()),
            "/**\n * @author X\n */"
        );
    }
}
