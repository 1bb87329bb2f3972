//! Configuration
//!
//! [`HeaderConfig`] is the validated, immutable rule configuration threaded
//! through every scan. [`Config`] is the project file the CLI reads; it
//! resolves into a `HeaderConfig`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocblockError, Result};
use crate::manifest;
use crate::scan::DeclarationKind;
use crate::tags::{self, TagSet};

/// Rule name used when exporting the configuration
pub const RULE_NAME: &str = "docblock_header_comment";

/// Default project config file name
pub const DEFAULT_CONFIG_FILE: &str = ".docblock.config.json";

/// Blank-line separation around an inserted DocBlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separate {
    Top,
    Bottom,
    Both,
    #[default]
    None,
}

impl Separate {
    /// Every accepted value, in declaration order
    pub fn values() -> &'static [&'static str] {
        &["top", "bottom", "both", "none"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Separate::Top => "top",
            Separate::Bottom => "bottom",
            Separate::Both => "both",
            Separate::None => "none",
        }
    }

    /// Line break before the block
    pub fn top(&self) -> bool {
        matches!(self, Separate::Top | Separate::Both)
    }

    /// Line break after the block
    pub fn bottom(&self) -> bool {
        matches!(self, Separate::Bottom | Separate::Both)
    }
}

impl std::str::FromStr for Separate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Separate::Top),
            "bottom" => Ok(Separate::Bottom),
            "both" => Ok(Separate::Both),
            "none" => Ok(Separate::None),
            _ => Err(format!(
                "Unknown separate value: {} (expected one of: {})",
                s,
                Separate::values().join(", ")
            )),
        }
    }
}

impl fmt::Display for Separate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated rule configuration for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderConfig {
    annotations: TagSet,
    preserve_existing: bool,
    separate: Separate,
    #[serde(rename = "add_structure_name")]
    add_declaration_name: bool,
    ensure_spacing: bool,
    #[serde(skip)]
    declarations: Vec<DeclarationKind>,
}

impl HeaderConfig {
    /// Rule defaults: preserve existing tags, no separation, no name line,
    /// spacing enforced.
    pub fn new(annotations: TagSet) -> Result<Self> {
        tags::validate(&annotations)?;
        Ok(Self {
            annotations,
            preserve_existing: true,
            separate: Separate::None,
            add_declaration_name: false,
            ensure_spacing: true,
            declarations: DeclarationKind::all().to_vec(),
        })
    }

    /// Generator defaults: separate on both sides and lead with the name
    pub fn generator(annotations: TagSet) -> Result<Self> {
        Ok(Self::new(annotations)?
            .with_separate(Separate::Both)
            .with_declaration_name(true))
    }

    /// Derive author and license from a manifest, then overlay `additional`.
    ///
    /// Uses the generator defaults.
    pub fn from_manifest<P: AsRef<Path>>(path: P, additional: &TagSet) -> Result<Self> {
        let data = manifest::read_manifest(path)?;
        let derived = manifest::derive_tags(&data);
        Self::generator(tags::merge(&derived, additional))
    }

    pub fn with_preserve_existing(mut self, preserve: bool) -> Self {
        self.preserve_existing = preserve;
        self
    }

    pub fn with_separate(mut self, separate: Separate) -> Self {
        self.separate = separate;
        self
    }

    pub fn with_declaration_name(mut self, add: bool) -> Self {
        self.add_declaration_name = add;
        self
    }

    pub fn with_ensure_spacing(mut self, ensure: bool) -> Self {
        self.ensure_spacing = ensure;
        self
    }

    /// Restrict the declaration kinds that get a DocBlock
    pub fn with_declarations(mut self, kinds: &[DeclarationKind]) -> Self {
        self.declarations = kinds.to_vec();
        self
    }

    pub fn annotations(&self) -> &TagSet {
        &self.annotations
    }

    pub fn preserve_existing(&self) -> bool {
        self.preserve_existing
    }

    pub fn separate(&self) -> Separate {
        self.separate
    }

    pub fn add_declaration_name(&self) -> bool {
        self.add_declaration_name
    }

    pub fn ensure_spacing(&self) -> bool {
        self.ensure_spacing
    }

    pub fn declarations(&self) -> &[DeclarationKind] {
        &self.declarations
    }

    /// Nothing would ever be written with this configuration
    pub fn is_noop(&self) -> bool {
        self.annotations.is_empty() && !self.add_declaration_name
    }

    /// Rule options keyed by [`RULE_NAME`]
    pub fn to_rule_json(&self) -> Result<serde_json::Value> {
        let mut rule = serde_json::Map::new();
        rule.insert(RULE_NAME.to_string(), serde_json::to_value(self)?);
        Ok(serde_json::Value::Object(rule))
    }
}

fn default_true() -> bool {
    true
}

fn default_declarations() -> Vec<DeclarationKind> {
    DeclarationKind::all().to_vec()
}

fn default_include() -> Vec<String> {
    vec!["**/*.php".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/vendor/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/.git/**".to_string(),
        "**/var/cache/**".to_string(),
    ]
}

/// Project configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Tags to apply
    #[serde(default)]
    pub annotations: TagSet,

    /// Keep tags already present in an existing DocBlock
    #[serde(default = "default_true")]
    pub preserve_existing: bool,

    /// Blank-line separation around inserted blocks
    #[serde(default)]
    pub separate: Separate,

    /// Lead the block with a `Name.` sentence
    #[serde(default, alias = "addStructureName")]
    pub add_declaration_name: bool,

    /// Force a line break after the block
    #[serde(default = "default_true")]
    pub ensure_spacing: bool,

    /// Declaration kinds to annotate
    #[serde(default = "default_declarations")]
    pub declarations: Vec<DeclarationKind>,

    /// Manifest to derive author and license from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// File patterns to include (glob syntax)
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            annotations: TagSet::new(),
            preserve_existing: true,
            separate: Separate::None,
            add_declaration_name: false,
            ensure_spacing: true,
            declarations: default_declarations(),
            manifest: None,
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate and build the rule configuration.
    ///
    /// Manifest-derived tags come first; explicit annotations override them.
    /// A relative manifest path is taken relative to `base`.
    pub fn resolve(&self, base: &Path) -> Result<HeaderConfig> {
        let annotations = match &self.manifest {
            Some(path) => {
                let path = if path.is_relative() {
                    base.join(path)
                } else {
                    path.clone()
                };
                let data = manifest::read_manifest(&path)?;
                tags::merge(&manifest::derive_tags(&data), &self.annotations)
            }
            None => self.annotations.clone(),
        };

        if self.declarations.is_empty() {
            return Err(DocblockError::Other(
                "At least one declaration kind must be configured".to_string(),
            ));
        }

        Ok(HeaderConfig::new(annotations)?
            .with_preserve_existing(self.preserve_existing)
            .with_separate(self.separate)
            .with_declaration_name(self.add_declaration_name)
            .with_ensure_spacing(self.ensure_spacing)
            .with_declarations(&self.declarations))
    }
}
