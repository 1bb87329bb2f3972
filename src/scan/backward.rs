//! Backward scan with a skip set
//!
//! All three backward walks the scanner needs (anonymous-class check,
//! DocBlock lookup, insertion point) share this primitive. Whitespace is
//! always skipped, and a whole attribute group `#[ ... ]` counts as one
//! skippable unit, nested brackets included.

use crate::token::{TokenKind, TokenStream};

/// Outcome of a backward walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackwardHit {
    /// First token that is neither whitespace, skippable, nor inside an
    /// attribute group. `None` when the walk reached the start.
    pub stop: Option<usize>,
    /// Lowest position of a skipped modifier or attribute-open token
    pub furthest: Option<usize>,
}

impl BackwardHit {
    /// Position of the stop token when it has `kind`
    pub fn stopped_at(&self, tokens: &TokenStream, kind: TokenKind) -> Option<usize> {
        self.stop.filter(|&i| tokens[i].is(kind))
    }
}

/// Walk backward from just before `from`, skipping whitespace, attribute
/// groups and tokens whose kind is in `skip`.
pub fn scan_backward(tokens: &TokenStream, from: usize, skip: &[TokenKind]) -> BackwardHit {
    let mut hit = BackwardHit::default();
    let mut depth = 0usize;

    for i in (0..from.min(tokens.len())).rev() {
        let token = &tokens[i];

        if token.is_whitespace() {
            continue;
        }

        if depth > 0 {
            if token.is_close_bracket() {
                depth += 1;
            } else if token.is_open_bracket() || token.is(TokenKind::AttributeOpen) {
                depth -= 1;
                if depth == 0 {
                    if !token.is(TokenKind::AttributeOpen) {
                        // Closed by a plain `[`: that was no attribute
                        hit.stop = Some(i);
                        return hit;
                    }
                    hit.furthest = Some(i);
                }
            }
            continue;
        }

        if token.is_close_bracket() {
            depth = 1;
            continue;
        }

        if token.is(TokenKind::AttributeOpen) || token.is_any(skip) {
            hit.furthest = Some(i);
            continue;
        }

        hit.stop = Some(i);
        return hit;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODIFIERS: &[TokenKind] = &[TokenKind::Final, TokenKind::Abstract];

    fn keyword_index(tokens: &TokenStream) -> usize {
        tokens
            .iter()
            .position(|t| t.is(TokenKind::Class))
            .unwrap()
    }

    #[test]
    fn test_stops_at_first_significant_token() {
        let tokens = TokenStream::from_code("foo();\n\nclass Foo {}");
        let hit = scan_backward(&tokens, keyword_index(&tokens), MODIFIERS);

        assert_eq!(tokens[hit.stop.unwrap()].text(), ";");
        assert_eq!(hit.furthest, None);
    }

    #[test]
    fn test_reaches_start() {
        let tokens = TokenStream::from_code("  final class Foo {}");
        let hit = scan_backward(&tokens, keyword_index(&tokens), MODIFIERS);

        assert_eq!(hit.stop, None);
        assert_eq!(tokens[hit.furthest.unwrap()].text(), "final");
    }

    #[test]
    fn test_skips_attribute_groups_with_nested_brackets() {
        let tokens =
            TokenStream::from_code("/** doc */\n#[Route(['a', 'b'])]\n#[Other]\nabstract class Foo {}");
        let hit = scan_backward(&tokens, keyword_index(&tokens), MODIFIERS);

        assert_eq!(hit.stopped_at(&tokens, TokenKind::DocComment), Some(0));
        assert_eq!(tokens[hit.furthest.unwrap()].text(), "#[");
        assert_eq!(hit.furthest, Some(2));
    }

    #[test]
    fn test_plain_brackets_stop_the_walk() {
        let tokens = TokenStream::from_code("$a = [1] class Foo");
        let hit = scan_backward(&tokens, keyword_index(&tokens), MODIFIERS);

        assert_eq!(tokens[hit.stop.unwrap()].text(), "[");
    }

    #[test]
    fn test_unlisted_modifier_stops() {
        let tokens = TokenStream::from_code("readonly class Foo {}");
        let hit = scan_backward(&tokens, keyword_index(&tokens), MODIFIERS);

        assert!(hit.stopped_at(&tokens, TokenKind::Readonly).is_some());
    }
}
