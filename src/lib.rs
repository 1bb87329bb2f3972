#![forbid(unsafe_code)]

//! # DocBlock Header
//!
//! Adds a configurable DocBlock header (author, license, version, ...) to
//! every class, interface, trait and enum declaration of a PHP source file.
//!
//! ## Features
//!
//! - **Token-level edits**: only the DocBlock and the whitespace around it
//!   change; everything else is regenerated byte for byte
//! - **Merge or replace**: existing tags are kept and overridden, or dropped
//! - **Manifest aware**: author and license can come from `composer.json`
//! - **Idempotent**: a second run over fixed code changes nothing
//!
//! ## Example
//!
//! ```rust
//! use docblock::{fix_source, HeaderConfig, TagSet};
//!
//! fn main() -> docblock::Result<()> {
//!     let tags = TagSet::new().with("license", "MIT");
//!     let config = HeaderConfig::new(tags)?.with_ensure_spacing(false);
//!
//!     let report = fix_source("<?php\nclass Foo {}", &config);
//!     assert_eq!(report.code, "<?php\n/**\n * @license MIT\n */class Foo {}");
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod docblock;
pub mod error;
pub mod files;
pub mod fixer;
pub mod manifest;
pub mod scan;
pub mod tags;
pub mod token;

// Re-exports
pub use config::{Config, HeaderConfig, Separate};
pub use docblock::{parse, render, RenderOptions};
pub use error::{DocblockError, Result};
pub use files::{find_files, fix_file, FileResult};
pub use fixer::{fix_code, fix_source, fix_tokens, Change, FixReport, Outcome};
pub use manifest::{derive_tags, read_manifest, Author, Manifest};
pub use scan::{scan, DeclarationKind, DeclarationSite, Scanner};
pub use tags::{TagSet, TagValue};
pub use token::{Token, TokenKind, TokenStream};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
