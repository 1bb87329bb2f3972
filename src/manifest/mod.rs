//! Project manifest reader
//!
//! Reads a `composer.json`-style manifest and derives the `author` and
//! `license` annotations from it. Malformed author entries are skipped;
//! a manifest that cannot be found, read or decoded is an error.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DocblockError, Result};
use crate::tags::TagSet;

/// Decoded manifest document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    pub fn new(data: Map<String, Value>) -> Self {
        Self(data)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// One entry of the manifest's `authors` list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Author {
    /// `Name <email>`, or just the name without an email
    pub fn annotation(&self) -> String {
        match &self.email {
            Some(email) => format!("{} <{}>", self.name, email),
            None => self.name.clone(),
        }
    }
}

/// Read and decode a manifest file
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DocblockError::ManifestNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| DocblockError::ManifestUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    // Bytes that are not UTF-8 are a decoding failure, not a read failure
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(data)) => Ok(Manifest(data)),
        Ok(_) => Err(DocblockError::ManifestDecode {
            path: path.to_path_buf(),
            reason: "top-level value is not an object".to_string(),
        }),
        Err(e) => Err(DocblockError::ManifestDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// License identifier; the first one when the manifest lists several
pub fn extract_license(manifest: &Manifest) -> Option<String> {
    match manifest.get("license")? {
        Value::String(license) => Some(license.clone()),
        Value::Array(licenses) => licenses.first()?.as_str().map(str::to_string),
        _ => None,
    }
}

/// Authors that carry at least a name, in manifest order
pub fn extract_authors(manifest: &Manifest) -> Vec<Author> {
    let Some(Value::Array(entries)) = manifest.get("authors") else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| Author::deserialize(entry).ok())
        .collect()
}

pub fn primary_author(manifest: &Manifest) -> Option<Author> {
    extract_authors(manifest).into_iter().next()
}

/// `author` (scalar for one author, list for several) and `license`
pub fn derive_tags(manifest: &Manifest) -> TagSet {
    let mut tags = TagSet::new();

    let authors: Vec<String> = extract_authors(manifest)
        .iter()
        .map(Author::annotation)
        .collect();
    match authors.len() {
        0 => {}
        1 => tags.insert("author", authors[0].clone()),
        _ => tags.insert("author", authors),
    }

    if let Some(license) = extract_license(manifest) {
        tags.insert("license", license);
    }

    tags
}
