//! Folder rules and the lookup table built from them.

use std::path::{Path, PathBuf};

use imgforged_common::{Dimensions, Error, Result};

use crate::config::{Config, FolderConfig};

/// Transformation policy for one configured folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Directory the rule governs (canonical once loaded from config).
    pub root: PathBuf,
    /// In-place resize target for source images.
    pub resize: Option<Dimensions>,
    /// Thumbnail target.
    pub thumbnail: Option<Dimensions>,
}

impl Rule {
    pub fn new(
        root: impl Into<PathBuf>,
        resize: Option<Dimensions>,
        thumbnail: Option<Dimensions>,
    ) -> Self {
        Self {
            root: root.into(),
            resize,
            thumbnail,
        }
    }

    /// Build a validated rule from its config entry.
    ///
    /// The root must be an existing directory and is canonicalized so that
    /// scanned paths, watcher paths and lookups agree. At least one of
    /// `size`/`thumb` must be set and every set spec must parse.
    pub fn from_folder(folder: &FolderConfig) -> Result<Self> {
        let root = folder.path.canonicalize().map_err(|e| {
            Error::invalid_rule(&folder.path, format!("folder does not exist ({})", e))
        })?;

        let (size, thumb) = (folder.size_spec(), folder.thumb_spec());
        if size.is_none() && thumb.is_none() {
            return Err(Error::invalid_rule(&folder.path, "neither size nor thumb is set"));
        }

        let parse = |spec: Option<&str>| -> Result<Option<Dimensions>> {
            spec.map(|s| {
                s.parse::<Dimensions>()
                    .map_err(|e| Error::invalid_rule(&folder.path, e.to_string()))
            })
            .transpose()
        };

        let rule = Self::new(root, parse(size)?, parse(thumb)?);
        rule.validate()?;
        Ok(rule)
    }

    /// Check the invariants that must hold before the rule is watched.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(Error::invalid_rule(&self.root, "folder does not exist"));
        }
        if self.resize.is_none() && self.thumbnail.is_none() {
            return Err(Error::invalid_rule(&self.root, "neither size nor thumb is set"));
        }
        Ok(())
    }

    /// Whether `path` is the root itself or lies beneath it.
    ///
    /// Matching is per path component, so `/photos` does not cover
    /// `/photos2/a.jpg`.
    pub fn covers(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// Immutable table of folder rules, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Wrap already-built rules without validating them.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Validate every folder in the config. The first invalid folder aborts
    /// the whole load.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rules = config
            .folders
            .iter()
            .map(Rule::from_folder)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Find the rule governing `path`.
    ///
    /// A rule whose root equals `path` wins outright; otherwise the first
    /// declared rule whose root is an ancestor of `path` is returned. With
    /// nested roots such as `/photos` and `/photos/2023`, declare the more
    /// specific one first if it should take precedence.
    pub fn rule_for(&self, path: &Path) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.root == path)
            .or_else(|| self.rules.iter().find(|rule| rule.covers(path)))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
