//! Conversion Policy
//!
//! Maps an input extension to the rule that turns the raw asset into its final
//! form. The table is data: new asset types are added through configuration,
//! the compiler never changes.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::domain::entities::RuleDecl;

/// Rule names the compiler always declares itself
pub const BUILTIN_RULES: &[&str] = &[
    "extract_archive",
    "extract_root",
    "compile_tool",
    "copy",
    "phony",
];

/// What happens to a raw asset with a given extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Rule used for the transformation edge
    pub rule: String,
    /// Extension of the final output, including the dot
    pub output_extension: String,
}

impl Conversion {
    pub fn new(rule: impl Into<String>, output_extension: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            output_extension: output_extension.into(),
        }
    }
}

/// Result of a policy lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform<'a> {
    /// Convert with a dedicated rule and change the extension
    Convert(&'a Conversion),
    /// Generic copy, extension unchanged
    Copy,
}

impl Transform<'_> {
    pub fn rule(&self) -> &str {
        match self {
            Transform::Convert(conversion) => &conversion.rule,
            Transform::Copy => "copy",
        }
    }
}

/// Invalid conversion table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("extension '{0}' must be lowercase and start with '.'")]
    InvalidExtension(String),

    #[error("conversion for '{extension}' uses undeclared rule '{rule}'")]
    UndeclaredRule { extension: String, rule: String },

    #[error("rule '{0}' shadows a built-in rule")]
    ShadowsBuiltin(String),

    #[error("output extension '{output}' for '{extension}' must start with '.'")]
    InvalidOutputExtension { extension: String, output: String },
}

/// Extension → conversion table plus the rule declarations it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPolicy {
    conversions: BTreeMap<String, Conversion>,
    rules: BTreeMap<String, RuleDecl>,
}

impl Default for ConversionPolicy {
    /// DDS textures become PNGs through ImageMagick
    fn default() -> Self {
        Self::empty()
            .with_rule(RuleDecl::new("dds_to_png", "convert $in $out", "Convert DDS: $out"))
            .with_conversion(".dds", Conversion::new("dds_to_png", ".png"))
    }
}

impl ConversionPolicy {
    /// A policy that copies everything
    pub fn empty() -> Self {
        Self {
            conversions: BTreeMap::new(),
            rules: BTreeMap::new(),
        }
    }

    /// Builder: declare a conversion rule
    pub fn with_rule(mut self, rule: RuleDecl) -> Self {
        self.rules.insert(rule.name.clone(), rule);
        self
    }

    /// Builder: map an extension to a conversion (replaces an existing mapping)
    pub fn with_conversion(mut self, extension: impl Into<String>, conversion: Conversion) -> Self {
        self.conversions.insert(extension.into(), conversion);
        self
    }

    /// Look up a lowercase extension (with its dot). Never fails.
    pub fn resolve(&self, extension: &str) -> Transform<'_> {
        match self.conversions.get(extension) {
            Some(conversion) => Transform::Convert(conversion),
            None => Transform::Copy,
        }
    }

    /// Conversion rules referenced by at least one extension, sorted by name
    pub fn rules(&self) -> impl Iterator<Item = &RuleDecl> {
        let used: BTreeSet<&str> = self.conversions.values().map(|c| c.rule.as_str()).collect();
        self.rules
            .values()
            .filter(move |rule| used.contains(rule.name.as_str()))
    }

    /// Iterate `(extension, conversion)` pairs sorted by extension
    pub fn conversions(&self) -> impl Iterator<Item = (&str, &Conversion)> {
        self.conversions.iter().map(|(ext, c)| (ext.as_str(), c))
    }

    /// Check the table is internally consistent
    pub fn validate(&self) -> Result<(), PolicyError> {
        for name in self.rules.keys() {
            if BUILTIN_RULES.contains(&name.as_str()) {
                return Err(PolicyError::ShadowsBuiltin(name.clone()));
            }
        }

        for (extension, conversion) in &self.conversions {
            if !extension.starts_with('.') || extension.to_lowercase() != *extension {
                return Err(PolicyError::InvalidExtension(extension.clone()));
            }
            if !conversion.output_extension.starts_with('.') {
                return Err(PolicyError::InvalidOutputExtension {
                    extension: extension.clone(),
                    output: conversion.output_extension.clone(),
                });
            }
            if !self.rules.contains_key(&conversion.rule) {
                return Err(PolicyError::UndeclaredRule {
                    extension: extension.clone(),
                    rule: conversion.rule.clone(),
                });
            }
        }

        Ok(())
    }
}
