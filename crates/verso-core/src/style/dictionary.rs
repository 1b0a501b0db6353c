//! The style dictionary: the reference keyword sets that lyrics are
//! classified against.
//!
//! A dictionary maps each style name to a bag of representative keywords.
//! Declaration order is preserved because it breaks ties between styles
//! with equal scores. Loading accepts the JSON object format
//! (`{"style": ["keyword", ...]}`) and the equivalent TOML table
//! (`style = ["keyword", ...]`).
//!
//! # Example
//!
//! ```
//! use verso_core::style::StyleDictionary;
//!
//! let styles = StyleDictionary::from_json_str(r#"{"happy": ["joy", "sun"]}"#).unwrap();
//! assert_eq!(styles.first().name, "happy");
//! ```

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// A named style and its representative keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Style {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// The synthetic document that stands for this style in a vector-space
    /// batch: its keywords joined by spaces.
    #[must_use]
    pub fn document(&self) -> String {
        self.keywords.join(" ")
    }
}

/// A non-empty, ordered set of uniquely named styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDictionary {
    styles: Vec<Style>,
}

impl StyleDictionary {
    /// Build a dictionary, rejecting an empty list and duplicate names.
    pub fn new(styles: Vec<Style>) -> Result<Self> {
        if styles.is_empty() {
            return Err(Error::EmptyStyleDictionary);
        }
        {
            let mut seen = HashSet::with_capacity(styles.len());
            for style in &styles {
                let name = style.name.trim();
                if name.is_empty() {
                    return Err(Error::InvalidData("style name must not be empty".to_string()));
                }
                if !seen.insert(name) {
                    return Err(Error::DuplicateStyle(name.to_string()));
                }
                if style.keywords.is_empty() {
                    log::warn!("Style {} has no keywords and will never match", name);
                }
            }
        }
        Ok(Self { styles })
    }

    /// Load a dictionary from a `.json` or `.toml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, cannot be parsed, or
    /// does not describe a valid dictionary.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let dictionary = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|e| match e {
            Error::InvalidData(msg) => Error::InvalidData(format!(
                "failed to parse style dictionary from {}: {}",
                path.display(),
                msg
            )),
            other => other,
        })?;

        log::info!(
            "Loaded {} styles from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Parse the JSON object format.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).map_err(|e| Error::InvalidData(e.to_string()))?;

        let mut styles = Vec::with_capacity(map.len());
        for (name, value) in map {
            let keywords = value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(String::from))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| {
                    Error::InvalidData(format!("keywords for style {name} must be a list of strings"))
                })?;
            styles.push(Style { name, keywords });
        }
        Self::new(styles)
    }

    /// Parse the TOML table format.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| Error::InvalidData(e.to_string()))?;

        let mut styles = Vec::with_capacity(table.len());
        for (name, value) in table {
            let keywords = value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(String::from))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| {
                    Error::InvalidData(format!("keywords for style {name} must be a list of strings"))
                })?;
            styles.push(Style { name, keywords });
        }
        Self::new(styles)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Always `false`; a dictionary cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The first declared style.
    #[must_use]
    pub fn first(&self) -> &Style {
        // Non-empty by construction.
        &self.styles[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<'a> IntoIterator for &'a StyleDictionary {
    type Item = &'a Style;
    type IntoIter = std::slice::Iter<'a, Style>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.iter()
    }
}

impl Serialize for StyleDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.styles.iter().map(|s| (&s.name, &s.keywords)))
    }
}
