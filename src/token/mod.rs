//! Tokens and the mutable token stream
//!
//! A [`TokenStream`] is a flat, index-addressed arena of tokens for one
//! source unit. Insertions report how far the tokens after the insertion
//! point moved so callers can keep their own indices in step.

pub mod lexer;

use std::fmt;
use std::ops::Index;

pub use lexer::{tokenize, tokenize_code};

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<?php` or `<?=` open tag
    OpenTag,
    /// `?>` close tag, with the line break directly after it
    CloseTag,
    /// Markup outside the PHP tags
    InlineHtml,
    /// `class` keyword
    Class,
    /// `interface` keyword
    Interface,
    /// `trait` keyword
    Trait,
    /// `enum` keyword in declaration position
    Enum,
    /// `final` modifier
    Final,
    /// `abstract` modifier
    Abstract,
    /// `readonly` modifier
    Readonly,
    /// `new` keyword
    New,
    /// Bare name, including keywords without structural meaning here
    Identifier,
    /// `$name`
    Variable,
    /// Run of spaces, tabs and line breaks
    Whitespace,
    /// `/** ... */`
    DocComment,
    /// `//`, `#` or `/* ... */` comment
    Comment,
    /// `#[` opening an attribute group
    AttributeOpen,
    /// Quoted string literal, heredoc or nowdoc
    String,
    /// Numeric literal
    Number,
    /// Operators and punctuation
    Punct,
}

impl TokenKind {
    /// Parse a keyword (case-insensitive) into its kind
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word.to_ascii_lowercase().as_str() {
            "class" => Some(TokenKind::Class),
            "interface" => Some(TokenKind::Interface),
            "trait" => Some(TokenKind::Trait),
            "enum" => Some(TokenKind::Enum),
            "final" => Some(TokenKind::Final),
            "abstract" => Some(TokenKind::Abstract),
            "readonly" => Some(TokenKind::Readonly),
            "new" => Some(TokenKind::New),
            _ => None,
        }
    }
}

/// An immutable `(kind, text)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// A whitespace token holding a single line break
    pub fn newline() -> Self {
        Self::new(TokenKind::Whitespace, "\n")
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// `]` closing an attribute group (or any other bracket)
    pub fn is_close_bracket(&self) -> bool {
        self.kind == TokenKind::Punct && self.text == "]"
    }

    /// Plain `[` opening a nested bracket
    pub fn is_open_bracket(&self) -> bool {
        self.kind == TokenKind::Punct && self.text == "["
    }
}

/// Ordered, mutable token sequence for one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Tokenize a whole file; text before the first open tag is markup
    pub fn from_source(source: &str) -> Self {
        tokenize(source)
    }

    /// Tokenize a code fragment that has no open tag
    pub fn from_code(source: &str) -> Self {
        tokenize_code(source)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Whether any token has one of the given kinds
    pub fn contains_kind(&self, kinds: &[TokenKind]) -> bool {
        self.tokens.iter().any(|t| t.is_any(kinds))
    }

    /// Insert `tokens` before `index`; returns how far later tokens shifted.
    ///
    /// An `index` equal to `len()` appends.
    pub fn insert_at(&mut self, index: usize, tokens: Vec<Token>) -> usize {
        let shift = tokens.len();
        let index = index.min(self.tokens.len());
        self.tokens.splice(index..index, tokens);
        shift
    }

    /// Replace the token at `index`; positions do not move.
    pub fn replace(&mut self, index: usize, token: Token) {
        if let Some(slot) = self.tokens.get_mut(index) {
            *slot = token;
        }
    }

    /// Concatenate all token texts back into source code
    pub fn generate_code(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}
