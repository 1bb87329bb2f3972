//! DocBlock fixer
//!
//! Applies the configured tags to every declaration in a token stream.
//! Each declaration ends in one of three ways:
//!
//! - no DocBlock yet: a new one is **inserted** before any modifiers and
//!   attributes
//! - DocBlock present, existing tags preserved: the tags are **merged** and
//!   the block regenerated in place
//! - DocBlock present, existing tags not preserved: the block is
//!   **replaced** by one built from the configured tags alone
//!
//! Replacing is a pure function of the declaration name and configured tags,
//! so running the fixer twice gives the same output as running it once.

use std::fmt;

use tracing::debug;

use crate::config::HeaderConfig;
use crate::docblock::{self, RenderOptions};
use crate::scan::{is_candidate, DeclarationKind, DeclarationSite, Scanner};
use crate::tags;
use crate::token::{Token, TokenKind, TokenStream};

/// What happened at one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Inserted,
    Merged,
    Replaced,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Inserted => write!(f, "inserted"),
            Outcome::Merged => write!(f, "merged"),
            Outcome::Replaced => write!(f, "replaced"),
        }
    }
}

/// Result of [`apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub outcome: Outcome,
    /// Number of tokens inserted at or before the declaration keyword
    pub shift: usize,
}

/// One declaration touched during a fix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: DeclarationKind,
    pub name: String,
    pub outcome: Outcome,
}

/// Result of fixing a whole source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    /// Regenerated source
    pub code: String,
    pub changes: Vec<Change>,
    /// Whether `code` differs from the input
    pub modified: bool,
}

/// Apply the configuration to a single declaration
pub fn apply(tokens: &mut TokenStream, site: &DeclarationSite, config: &HeaderConfig) -> Applied {
    let applied = match site.doc_comment {
        None => insert_doc_block(tokens, site, config),
        Some(index) if config.preserve_existing() => merge_doc_block(tokens, index, site, config),
        Some(index) => replace_doc_block(tokens, index, site, config),
    };

    debug!(
        kind = %site.kind,
        name = %site.name,
        outcome = %applied.outcome,
        "docblock applied"
    );

    applied
}

/// Apply the configuration to every declaration in the stream
pub fn fix_tokens(tokens: &mut TokenStream, config: &HeaderConfig) -> Vec<Change> {
    if config.is_noop() || !is_candidate(tokens, config.declarations()) {
        return Vec::new();
    }

    let mut changes = Vec::new();
    let mut scanner = Scanner::new(config.declarations());

    while let Some(site) = scanner.next_site(tokens) {
        let applied = apply(tokens, &site, config);
        scanner.advance(applied.shift);
        changes.push(Change {
            kind: site.kind,
            name: site.name,
            outcome: applied.outcome,
        });
    }

    changes
}

/// Tokenize, fix and regenerate a whole file
pub fn fix_source(source: &str, config: &HeaderConfig) -> FixReport {
    fix_stream(TokenStream::from_source(source), source, config)
}

/// Same as [`fix_source`] for a fragment without an open tag
pub fn fix_code(source: &str, config: &HeaderConfig) -> FixReport {
    fix_stream(TokenStream::from_code(source), source, config)
}

fn fix_stream(mut tokens: TokenStream, source: &str, config: &HeaderConfig) -> FixReport {
    let changes = fix_tokens(&mut tokens, config);
    let code = tokens.generate_code();

    FixReport {
        modified: code != source,
        code,
        changes,
    }
}

fn build_doc_block(tags: &tags::TagSet, site: &DeclarationSite, config: &HeaderConfig) -> Token {
    let text = docblock::render(
        tags,
        &site.name,
        RenderOptions::with_name(config.add_declaration_name()),
    );
    Token::new(TokenKind::DocComment, text)
}

fn insert_doc_block(
    tokens: &mut TokenStream,
    site: &DeclarationSite,
    config: &HeaderConfig,
) -> Applied {
    let separate = config.separate();
    let mut inserted = Vec::with_capacity(4);

    if separate.top() {
        inserted.push(Token::newline());
    }

    inserted.push(build_doc_block(config.annotations(), site, config));

    // Keeps later formatting passes from gluing the block to the declaration
    if config.ensure_spacing() {
        inserted.push(Token::newline());
    }

    if separate.bottom() && !tokens.get(site.insert_at).is_some_and(Token::is_whitespace) {
        inserted.push(Token::newline());
    }

    let shift = tokens.insert_at(site.insert_at, inserted);
    Applied {
        outcome: Outcome::Inserted,
        shift,
    }
}

fn merge_doc_block(
    tokens: &mut TokenStream,
    index: usize,
    site: &DeclarationSite,
    config: &HeaderConfig,
) -> Applied {
    let existing = docblock::parse(tokens[index].text());
    let merged = tags::merge(&existing, config.annotations());

    tokens.replace(index, build_doc_block(&merged, site, config));
    Applied {
        outcome: Outcome::Merged,
        shift: ensure_spacing_after(tokens, index, config),
    }
}

fn replace_doc_block(
    tokens: &mut TokenStream,
    index: usize,
    site: &DeclarationSite,
    config: &HeaderConfig,
) -> Applied {
    tokens.replace(index, build_doc_block(config.annotations(), site, config));
    Applied {
        outcome: Outcome::Replaced,
        shift: ensure_spacing_after(tokens, index, config),
    }
}

/// Make sure a line break follows the DocBlock at `index`
fn ensure_spacing_after(tokens: &mut TokenStream, index: usize, config: &HeaderConfig) -> usize {
    if !config.ensure_spacing() {
        return 0;
    }

    let next = index + 1;
    match tokens.get(next) {
        Some(token) if token.is_whitespace() && token.text().contains('\n') => 0,
        Some(_) => tokens.insert_at(next, vec![Token::newline()]),
        None => 0,
    }
}
