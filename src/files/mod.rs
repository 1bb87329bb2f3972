//! File discovery and per-file fixing
//!
//! Walks the given roots for files matching the include/exclude patterns and
//! runs the fixer over each one. Each file is an independent token stream,
//! so callers may process files in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::info;
use walkdir::WalkDir;

use crate::config::HeaderConfig;
use crate::error::Result;
use crate::fixer::{self, FixReport};

/// Outcome of fixing one file
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub original: String,
    pub report: FixReport,
}

impl FileResult {
    pub fn modified(&self) -> bool {
        self.report.modified
    }

    /// Write the fixed code back if anything changed; returns whether it did
    pub fn write(&self) -> Result<bool> {
        if !self.modified() {
            return Ok(false);
        }
        fs::write(&self.path, &self.report.code)?;
        info!(path = %self.path.display(), changes = self.report.changes.len(), "file rewritten");
        Ok(true)
    }
}

/// Collect files under `roots` matching `include` and not `exclude`.
///
/// A root that is itself a file is taken as given. Patterns are matched
/// against paths relative to their root; invalid patterns are ignored.
pub fn find_files<P: AsRef<Path>>(roots: &[P], include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let include_patterns: Vec<_> = include.iter().filter_map(|p| Pattern::new(p).ok()).collect();
    let exclude_patterns: Vec<_> = exclude.iter().filter_map(|p| Pattern::new(p).ok()).collect();

    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let mut files = Vec::new();
    for root in roots {
        let root = root.as_ref();

        if root.is_file() {
            files.push(root.to_path_buf());
            continue;
        }

        let found = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                let relative = e
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(e.path())
                    .to_string_lossy()
                    .to_string();

                let included = include_patterns.is_empty()
                    || include_patterns.iter().any(|p| p.matches_with(&relative, match_opts));
                let excluded = exclude_patterns.iter().any(|p| p.matches_with(&relative, match_opts));

                included && !excluded
            })
            .map(|e| e.into_path());
        files.extend(found);
    }

    files
}

/// Read and fix one file without writing it
pub fn fix_file<P: AsRef<Path>>(path: P, config: &HeaderConfig) -> Result<FileResult> {
    let path = path.as_ref();
    let original = fs::read_to_string(path)?;
    let report = fixer::fix_source(&original, config);

    Ok(FileResult {
        path: path.to_path_buf(),
        original,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagSet;

    fn touch(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_find_files_respects_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/Foo.php", "");
        touch(dir.path(), "src/Bar/Baz.php", "");
        touch(dir.path(), "src/readme.md", "");
        touch(dir.path(), "vendor/lib/Lib.php", "");

        let files = find_files(
            &[dir.path()],
            &["**/*.php".to_string()],
            &["**/vendor/**".to_string()],
        );
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(relative, vec!["src/Bar/Baz.php", "src/Foo.php"]);
    }

    #[test]
    fn test_explicit_file_root_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "single.inc", "");

        let file = dir.path().join("single.inc");
        let files = find_files(&[&file], &["**/*.php".to_string()], &[]);
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_fix_file_and_write() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Foo.php", "<?php\n\nclass Foo {}\n");
        let path = dir.path().join("Foo.php");

        let config = HeaderConfig::new(TagSet::new().with("license", "MIT")).unwrap();
        let result = fix_file(&path, &config).unwrap();
        assert!(result.modified());
        assert!(result.write().unwrap());

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "<?php\n\n/**\n * @license MIT\n */\nclass Foo {}\n");

        // Second pass finds nothing to do
        let again = fix_file(&path, &config).unwrap();
        assert!(!again.modified());
        assert!(!again.write().unwrap());
    }
}
