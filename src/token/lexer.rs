//! Tokenizer for PHP-flavoured, brace-delimited source
//!
//! Only the token kinds the scanner cares about are told apart precisely;
//! everything else falls into identifiers, literals and punctuation. The
//! concatenated token texts always reproduce the input exactly.
//!
//! A file starts as markup: everything outside `<?php ... ?>` is a single
//! [`TokenKind::InlineHtml`] token, and heredoc/nowdoc bodies are one
//! [`TokenKind::String`], so keywords in either never look like code.

use super::{Token, TokenKind, TokenStream};

/// Multi-character operators emitted as a single punctuation token
const COMPOUND_PUNCT: &[&str] = &["?->", "::", "->"];

/// Words after which a keyword is just a name (`function interface()`,
/// `const TRAIT = 1`)
const NAME_INTRODUCERS: &[&str] = &["function", "const"];

/// Tokenize a whole file, starting outside the PHP tags
pub fn tokenize(source: &str) -> TokenStream {
    Lexer::new(source, false).run()
}

/// Tokenize a code fragment as if an open tag preceded it
pub fn tokenize_code(source: &str) -> TokenStream {
    Lexer::new(source, true).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    in_code: bool,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str, in_code: bool) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            in_code,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> TokenStream {
        while self.pos < self.chars.len() {
            let start = self.pos;
            let kind = if self.in_code {
                self.next_kind()
            } else {
                self.next_markup_kind()
            };
            let text: String = self.chars[start..self.pos].iter().collect();
            self.tokens.push(Token::new(kind, text));
        }
        TokenStream::new(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, literal: &str) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    fn starts_with_ignore_case(&self, literal: &str) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(i).is_some_and(|p| p.eq_ignore_ascii_case(&c)))
    }

    /// Length of the open tag at the cursor, if there is one
    fn open_tag_len(&self) -> Option<usize> {
        if self.starts_with_ignore_case("<?php") && !self.peek(5).is_some_and(|c| !is_space(c)) {
            return Some(5);
        }
        if self.starts_with("<?=") {
            return Some(3);
        }
        None
    }

    /// Consume an open tag, or markup up to the next one
    fn next_markup_kind(&mut self) -> TokenKind {
        if let Some(len) = self.open_tag_len() {
            self.pos += len;
            self.in_code = true;
            return TokenKind::OpenTag;
        }

        while self.pos < self.chars.len() && self.open_tag_len().is_none() {
            self.pos += 1;
        }
        TokenKind::InlineHtml
    }

    /// Consume one token and return its kind
    fn next_kind(&mut self) -> TokenKind {
        let c = self.chars[self.pos];

        if is_space(c) {
            while self.peek(0).is_some_and(is_space) {
                self.pos += 1;
            }
            return TokenKind::Whitespace;
        }

        if let Some(len) = self.open_tag_len() {
            self.pos += len;
            return TokenKind::OpenTag;
        }
        if self.starts_with("?>") {
            self.pos += 2;
            if self.starts_with("\r\n") {
                self.pos += 2;
            } else if self.peek(0) == Some('\n') {
                self.pos += 1;
            }
            self.in_code = false;
            return TokenKind::CloseTag;
        }

        if self.starts_with("/**") && self.peek(3).is_some_and(is_space) {
            self.consume_block_comment();
            return TokenKind::DocComment;
        }
        if self.starts_with("/*") {
            self.consume_block_comment();
            return TokenKind::Comment;
        }
        if self.starts_with("#[") {
            self.pos += 2;
            return TokenKind::AttributeOpen;
        }
        if self.starts_with("//") || c == '#' {
            // A close tag ends a line comment
            while self.peek(0).is_some_and(|c| c != '\n') && !self.starts_with("?>") {
                self.pos += 1;
            }
            return TokenKind::Comment;
        }

        if self.starts_with("<<<") && self.consume_heredoc() {
            return TokenKind::String;
        }

        if c == '\'' || c == '"' || c == '`' {
            self.consume_string(c);
            return TokenKind::String;
        }

        if c == '$' && self.peek(1).is_some_and(is_ident_start) {
            self.pos += 1;
            self.consume_ident();
            return TokenKind::Variable;
        }

        if c.is_ascii_digit() {
            while self
                .peek(0)
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            {
                self.pos += 1;
            }
            return TokenKind::Number;
        }

        if is_ident_start(c) {
            let start = self.pos;
            self.consume_ident();
            let word: String = self.chars[start..self.pos].iter().collect();
            return self.classify_word(&word);
        }

        for punct in COMPOUND_PUNCT {
            if self.starts_with(punct) {
                self.pos += punct.chars().count();
                return TokenKind::Punct;
            }
        }

        self.pos += 1;
        TokenKind::Punct
    }

    fn consume_block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.chars.len() {
            if self.starts_with("*/") {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    fn consume_string(&mut self, quote: char) {
        self.pos += 1;
        while let Some(c) = self.peek(0) {
            self.pos += 1;
            if c == '\\' {
                if self.peek(0).is_some() {
                    self.pos += 1;
                }
            } else if c == quote {
                return;
            }
        }
    }

    /// Consume `<<<ID`, `<<<"ID"` or `<<<'ID'` through the closing label.
    ///
    /// Leaves the cursor untouched and returns false when the opener is
    /// not a valid heredoc header.
    fn consume_heredoc(&mut self) -> bool {
        let mut offset = 3;
        while matches!(self.peek(offset), Some(' ' | '\t')) {
            offset += 1;
        }

        let quote = match self.peek(offset) {
            Some(q @ ('"' | '\'')) => {
                offset += 1;
                Some(q)
            }
            _ => None,
        };

        if !self.peek(offset).is_some_and(is_ident_start) {
            return false;
        }
        let label_start = self.pos + offset;
        while self.peek(offset).is_some_and(is_ident_char) {
            offset += 1;
        }
        let label: Vec<char> = self.chars[label_start..self.pos + offset].to_vec();

        if let Some(q) = quote {
            if self.peek(offset) != Some(q) {
                return false;
            }
            offset += 1;
        }

        match self.peek(offset) {
            Some('\n') => offset += 1,
            Some('\r') if self.peek(offset + 1) == Some('\n') => offset += 2,
            _ => return false,
        }
        self.pos += offset;

        // Body runs line by line until a line whose first non-blank text is
        // the label, not followed by a name character
        while self.pos < self.chars.len() {
            let mut indent = 0;
            while matches!(self.peek(indent), Some(' ' | '\t')) {
                indent += 1;
            }
            let closes = label
                .iter()
                .enumerate()
                .all(|(i, c)| self.peek(indent + i) == Some(*c))
                && !self.peek(indent + label.len()).is_some_and(is_ident_char);
            if closes {
                self.pos += indent + label.len();
                return true;
            }

            while let Some(c) = self.peek(0) {
                self.pos += 1;
                if c == '\n' {
                    break;
                }
            }
        }
        true
    }

    fn consume_ident(&mut self) {
        while self.peek(0).is_some_and(is_ident_char) {
            self.pos += 1;
        }
    }

    /// Keywords lose their meaning after member access and in name
    /// position after `function` or `const`, and `enum` is only a
    /// declaration when a name follows it.
    fn classify_word(&self, word: &str) -> TokenKind {
        let Some(kind) = TokenKind::keyword(word) else {
            return TokenKind::Identifier;
        };

        if self.after_member_access() || self.after_name_introducer() {
            return TokenKind::Identifier;
        }

        if kind == TokenKind::Enum && !self.name_follows() {
            return TokenKind::Identifier;
        }

        kind
    }

    fn after_member_access(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|t| !t.is_whitespace() && !t.is(TokenKind::Comment))
            .is_some_and(|t| t.is(TokenKind::Punct) && COMPOUND_PUNCT.contains(&t.text()))
    }

    fn after_name_introducer(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|t| {
                !t.is_whitespace() && !t.is(TokenKind::Comment) && !(t.is(TokenKind::Punct) && t.text() == "&")
            })
            .is_some_and(|t| {
                t.is(TokenKind::Identifier)
                    && NAME_INTRODUCERS
                        .iter()
                        .any(|w| t.text().eq_ignore_ascii_case(w))
            })
    }

    fn name_follows(&self) -> bool {
        let mut offset = 0;
        while self.peek(offset).is_some_and(is_space) {
            offset += 1;
        }
        offset > 0 && self.peek(offset).is_some_and(is_ident_start)
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}
