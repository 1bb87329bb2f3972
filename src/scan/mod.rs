//! Declaration scanner
//!
//! Walks a token stream once, front to back, and reports every structural
//! declaration (class, interface, trait, enum) that should carry a DocBlock.
//! Anonymous classes (`new class { ... }`) are skipped.
//!
//! The [`Scanner`] keeps only a cursor, so the stream can be mutated between
//! two calls to [`Scanner::next_site`] as long as the caller reports the
//! shift through [`Scanner::advance`].

pub mod backward;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::{TokenKind, TokenStream};
pub use backward::{scan_backward, BackwardHit};

/// Modifiers allowed between a DocBlock and its declaration
pub const DECLARATION_MODIFIERS: &[TokenKind] =
    &[TokenKind::Final, TokenKind::Abstract, TokenKind::Readonly];

/// Modifiers allowed between `new` and an anonymous `class`
pub const ANONYMOUS_MODIFIERS: &[TokenKind] = &[TokenKind::Final, TokenKind::Readonly];

/// Structural declaration keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Trait,
    Enum,
}

impl DeclarationKind {
    /// Every declaration kind, in keyword order
    pub fn all() -> &'static [DeclarationKind] {
        &[
            DeclarationKind::Class,
            DeclarationKind::Interface,
            DeclarationKind::Trait,
            DeclarationKind::Enum,
        ]
    }

    pub fn token_kind(&self) -> TokenKind {
        match self {
            DeclarationKind::Class => TokenKind::Class,
            DeclarationKind::Interface => TokenKind::Interface,
            DeclarationKind::Trait => TokenKind::Trait,
            DeclarationKind::Enum => TokenKind::Enum,
        }
    }

    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Class => Some(DeclarationKind::Class),
            TokenKind::Interface => Some(DeclarationKind::Interface),
            TokenKind::Trait => Some(DeclarationKind::Trait),
            TokenKind::Enum => Some(DeclarationKind::Enum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Trait => "trait",
            DeclarationKind::Enum => "enum",
        }
    }
}

impl std::str::FromStr for DeclarationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(DeclarationKind::Class),
            "interface" => Ok(DeclarationKind::Interface),
            "trait" => Ok(DeclarationKind::Trait),
            "enum" => Ok(DeclarationKind::Enum),
            _ => Err(format!("Unknown declaration kind: {}", s)),
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    /// Position of the structural keyword
    pub keyword: usize,
    pub kind: DeclarationKind,
    /// Declared name, empty when it could not be read
    pub name: String,
    /// Position of an adjacent existing DocBlock
    pub doc_comment: Option<usize>,
    /// Where a new DocBlock goes: before any leading modifiers and attributes
    pub insert_at: usize,
}

/// Whether the stream contains any keyword worth scanning for
pub fn is_candidate(tokens: &TokenStream, kinds: &[DeclarationKind]) -> bool {
    let token_kinds: Vec<TokenKind> = kinds.iter().map(DeclarationKind::token_kind).collect();
    tokens.contains_kind(&token_kinds)
}

/// Cursor over the declarations of a stream
#[derive(Debug, Clone)]
pub struct Scanner {
    kinds: Vec<DeclarationKind>,
    cursor: usize,
}

impl Scanner {
    pub fn new(kinds: &[DeclarationKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            cursor: 0,
        }
    }

    /// Find the next declaration at or after the cursor
    pub fn next_site(&mut self, tokens: &TokenStream) -> Option<DeclarationSite> {
        while self.cursor < tokens.len() {
            let index = self.cursor;
            self.cursor += 1;

            let Some(kind) = DeclarationKind::from_token_kind(tokens[index].kind()) else {
                continue;
            };
            if !self.kinds.contains(&kind) {
                continue;
            }
            if kind == DeclarationKind::Class && is_anonymous_class(tokens, index) {
                continue;
            }

            return Some(DeclarationSite {
                keyword: index,
                kind,
                name: declaration_name(tokens, index),
                doc_comment: find_doc_comment(tokens, index),
                insert_at: insert_position(tokens, index),
            });
        }
        None
    }

    /// Account for `shift` tokens inserted at or before the last site
    pub fn advance(&mut self, shift: usize) {
        self.cursor += shift;
    }
}

/// Read-only iterator over the declarations of a stream
pub struct Scan<'a> {
    tokens: &'a TokenStream,
    scanner: Scanner,
}

impl Iterator for Scan<'_> {
    type Item = DeclarationSite;

    fn next(&mut self) -> Option<Self::Item> {
        self.scanner.next_site(self.tokens)
    }
}

/// Lazily scan `tokens` for declarations of the given kinds
pub fn scan<'a>(tokens: &'a TokenStream, kinds: &[DeclarationKind]) -> Scan<'a> {
    Scan {
        tokens,
        scanner: Scanner::new(kinds),
    }
}

/// `new class`, possibly with modifiers or attributes in between
pub fn is_anonymous_class(tokens: &TokenStream, keyword: usize) -> bool {
    scan_backward(tokens, keyword, ANONYMOUS_MODIFIERS)
        .stopped_at(tokens, TokenKind::New)
        .is_some()
}

/// First token after the keyword, if it is a name
pub fn declaration_name(tokens: &TokenStream, keyword: usize) -> String {
    tokens
        .iter()
        .skip(keyword + 1)
        .find(|t| !t.is_whitespace())
        .filter(|t| t.is(TokenKind::Identifier))
        .map(|t| t.text().to_string())
        .unwrap_or_default()
}

/// Existing DocBlock before the declaration, looking past modifiers and
/// attributes
pub fn find_doc_comment(tokens: &TokenStream, keyword: usize) -> Option<usize> {
    scan_backward(tokens, keyword, DECLARATION_MODIFIERS).stopped_at(tokens, TokenKind::DocComment)
}

/// Insertion point for a new DocBlock
pub fn insert_position(tokens: &TokenStream, keyword: usize) -> usize {
    scan_backward(tokens, keyword, DECLARATION_MODIFIERS)
        .furthest
        .unwrap_or(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(source: &str) -> Vec<DeclarationSite> {
        let tokens = TokenStream::from_code(source);
        scan(&tokens, DeclarationKind::all()).collect()
    }

    #[test]
    fn test_named_class() {
        let found = sites("<?php class Foo {}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Foo");
        assert_eq!(found[0].kind, DeclarationKind::Class);
        assert_eq!(found[0].doc_comment, None);
        assert_eq!(found[0].insert_at, found[0].keyword);
    }

    #[test]
    fn test_all_declaration_kinds() {
        let found = sites("interface A {} trait B {} enum C: string {} class D {}");
        let kinds: Vec<_> = found.iter().map(|s| s.kind).collect();
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(
            kinds,
            vec![
                DeclarationKind::Interface,
                DeclarationKind::Trait,
                DeclarationKind::Enum,
                DeclarationKind::Class
            ]
        );
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_configured_kinds_only() {
        let tokens = TokenStream::from_code("interface A {} class B {}");
        let found: Vec<_> = scan(&tokens, &[DeclarationKind::Class]).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "B");
    }

    #[test]
    fn test_anonymous_classes_are_skipped() {
        for source in [
            "$x = new class {};",
            "$x = new class(1) extends Foo {};",
            "$x = new readonly class {};",
            "$x = new final readonly class {};",
            "$x = new #[Attr] class {};",
            "$x = new #[Attr(['a' => 1])] readonly class {};",
        ] {
            assert!(sites(source).is_empty(), "{source}");
        }
    }

    #[test]
    fn test_anonymous_class_next_to_named_one() {
        let found = sites("class Foo { function x() { return new class {}; } }");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Foo");
    }

    #[test]
    fn test_class_constant_is_not_a_declaration() {
        assert!(sites("$name = Foo::class;").is_empty());
    }

    #[test]
    fn test_keyword_named_members_are_not_declarations() {
        let found = sites("class Foo { const TRAIT = 1; public function interface() {} }");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Foo");

        let found = sites("interface Bar { public static function Enum(): self; const CLASS_NAME = 'x'; }");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DeclarationKind::Interface);
    }

    #[test]
    fn test_unparsable_name_is_empty() {
        let found = sites("class /* odd */ Foo {}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "");
    }

    #[test]
    fn test_doc_comment_before_modifiers() {
        let source = "/**\n * @author X\n */\nfinal class Foo {}";
        let found = sites(source);
        assert_eq!(found[0].doc_comment, Some(0));
        assert_eq!(found[0].insert_at, 2);
    }

    #[test]
    fn test_doc_comment_before_attributes_and_modifiers() {
        let source = "/** @license MIT */\n#[Entity]\nfinal readonly class Foo {}";
        let tokens = TokenStream::from_code(source);
        let site = scan(&tokens, DeclarationKind::all()).next().unwrap();

        assert_eq!(site.doc_comment, Some(0));
        assert!(tokens[site.insert_at].is(TokenKind::AttributeOpen));
    }

    #[test]
    fn test_plain_comment_breaks_doc_lookup() {
        let found = sites("/** @license MIT */\n// note\nclass Foo {}");
        assert_eq!(found[0].doc_comment, None);
    }

    #[test]
    fn test_doc_comment_of_previous_statement_is_not_taken() {
        let found = sites("/** @var int */\n$x = 1;\nclass Foo {}");
        assert_eq!(found[0].doc_comment, None);
    }

    #[test]
    fn test_is_candidate() {
        let tokens = TokenStream::from_code("<?php class Foo {}");
        assert!(is_candidate(&tokens, DeclarationKind::all()));

        let tokens = TokenStream::from_code("<?php function foo() {}");
        assert!(!is_candidate(&tokens, DeclarationKind::all()));

        let tokens = TokenStream::from_code("<?php trait Foo {}");
        assert!(!is_candidate(&tokens, &[DeclarationKind::Class]));
    }

    #[test]
    fn test_scanner_advance_skips_inserted_tokens() {
        use crate::token::Token;

        let mut tokens = TokenStream::from_code("class A {} class B {}");
        let mut scanner = Scanner::new(DeclarationKind::all());

        let first = scanner.next_site(&tokens).unwrap();
        let shift = tokens.insert_at(
            first.insert_at,
            vec![Token::new(TokenKind::DocComment, "/** */"), Token::newline()],
        );
        scanner.advance(shift);

        let second = scanner.next_site(&tokens).unwrap();
        assert_eq!(second.name, "B");
        assert!(scanner.next_site(&tokens).is_none());
    }

    #[test]
    fn test_declaration_kind_from_str() {
        assert_eq!("Trait".parse::<DeclarationKind>(), Ok(DeclarationKind::Trait));
        assert!("struct".parse::<DeclarationKind>().is_err());
    }
}
