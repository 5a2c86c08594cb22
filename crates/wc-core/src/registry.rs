#![forbid(unsafe_code)]

//! Element registry: maps custom tag names to definitions.
//!
//! # Invariants
//!
//! 1. A tag name is defined at most once; later `define` calls under the
//!    same name leave the first definition in place and report
//!    [`Registration::AlreadyDefined`] instead of failing.
//! 2. Tag names follow the custom element naming rules (see
//!    [`validate_tag_name`]).
//!
//! Callers wanting process-wide state keep one registry in a `OnceLock`.

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;

use crate::error::RegistryError;

const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Outcome of [`ElementRegistry::define`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Defined,
    AlreadyDefined,
}

/// Check `name` against the custom element naming rules.
pub fn validate_tag_name(name: &str) -> Result<(), RegistryError> {
    let Some(first) = name.chars().next() else {
        return Err(RegistryError::invalid(name, "empty name"));
    };
    if !first.is_ascii_lowercase() {
        return Err(RegistryError::invalid(
            name,
            "must start with a lowercase ASCII letter",
        ));
    }
    if !name.contains('-') {
        return Err(RegistryError::invalid(name, "must contain a hyphen"));
    }
    let valid_char = |c: char| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_') || !c.is_ascii()
    };
    if !name.chars().all(valid_char) {
        return Err(RegistryError::invalid(name, "contains an invalid character"));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(RegistryError::invalid(name, "reserved name"));
    }
    Ok(())
}

/// Tag name → definition map with idempotent registration.
#[derive(Debug)]
pub struct ElementRegistry<D> {
    definitions: RwLock<AHashMap<String, Arc<D>>>,
}

impl<D> Default for ElementRegistry<D> {
    fn default() -> Self {
        Self {
            definitions: RwLock::new(AHashMap::new()),
        }
    }
}

impl<D> ElementRegistry<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `definition` under `name` unless the name is taken.
    pub fn define(&self, name: &str, definition: Arc<D>) -> Result<Registration, RegistryError> {
        validate_tag_name(name)?;
        let mut definitions = self
            .definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if definitions.contains_key(name) {
            tracing::debug!(message = "registry.define.skipped", tag = name);
            return Ok(Registration::AlreadyDefined);
        }
        definitions.insert(name.to_string(), definition);
        tracing::debug!(message = "registry.define", tag = name);
        Ok(Registration::Defined)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<D>> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
