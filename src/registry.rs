//! Algorithm registry
//!
//! Maps display names to [`Algorithm`] variants, grouped under category labels
//! for menus. Categories keep registration order; name lookup goes through a
//! hash index.

use crate::engine::errors::TraceError;
use crate::engine::ops::Element;
use crate::engine::{Algorithm, Steps};
use rustc_hash::FxHashMap;

/// A named group of algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub algorithms: Vec<Algorithm>,
}

/// Name -> algorithm lookup table
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<Category>,
    index: FxHashMap<&'static str, Algorithm>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            categories: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Registry holding every built-in engine under "Sorting"
    pub fn builtin() -> Self {
        let mut registry = Registry::new();
        for algorithm in Algorithm::ALL {
            registry.register("Sorting", algorithm);
        }
        registry
    }

    /// Add an algorithm under `category`, creating the category if needed
    pub fn register(&mut self, category: &str, algorithm: Algorithm) {
        if self.index.insert(algorithm.name(), algorithm).is_some() {
            // Re-registration moves the algorithm to the new category
            for existing in &mut self.categories {
                existing.algorithms.retain(|&a| a != algorithm);
            }
        }

        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.algorithms.push(algorithm),
            None => self.categories.push(Category {
                name: category.to_string(),
                algorithms: vec![algorithm],
            }),
        }
    }

    /// Find an algorithm by display name
    pub fn lookup(&self, name: &str) -> Result<Algorithm, TraceError> {
        self.index.get(name).copied().ok_or_else(|| {
            tracing::warn!(name, "unknown algorithm");
            TraceError::UnknownAlgorithm {
                name: name.to_string(),
            }
        })
    }

    /// Look up `name` and start a run over `input`
    pub fn run<T: Element>(&self, name: &str, input: &[T]) -> Result<Steps<T>, TraceError> {
        self.lookup(name)?.run(input)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All registered names in category order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.algorithms.iter().map(|a| a.name()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
