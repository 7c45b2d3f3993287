//! Name-to-scheme registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::UnknownScheme;
use crate::{ErrorCorrection, Hamming74, Identity, Parity8};

/// Maps scheme names to shared scheme instances.
///
/// A pattern records only the scheme's name; the reader resolves it here.
/// [`SchemeRegistry::with_builtins`] (also the `Default`) knows the three
/// shipped schemes; additional implementations register under their own
/// unique names.
pub struct SchemeRegistry {
    schemes: HashMap<String, Arc<dyn ErrorCorrection>>,
}

impl SchemeRegistry {
    /// A registry with no schemes at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            schemes: HashMap::new(),
        }
    }

    /// A registry holding `none`, `hamming74`, and `parity8`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(Identity));
        registry.register(Arc::new(Hamming74));
        registry.register(Arc::new(Parity8));
        registry
    }

    /// Register a scheme under its own name, replacing any previous entry.
    pub fn register(&mut self, scheme: Arc<dyn ErrorCorrection>) {
        self.schemes.insert(scheme.name().to_owned(), scheme);
    }

    /// Look up a scheme by name.
    ///
    /// # Errors
    /// Returns [`UnknownScheme`] when the name was never registered.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ErrorCorrection>, UnknownScheme> {
        self.schemes.get(name).cloned().ok_or_else(|| UnknownScheme {
            name: name.to_owned(),
        })
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
