//! Registry of named collections loaded at startup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::collection::VectorCollection;
use crate::error::{ExascanError, Result};

/// The set of collections a service instance searches against.
///
/// Populated once at startup and read-only afterward. Every entry shares
/// the registry's configured dimension, so any loaded collection is a
/// valid target for any dimension-checked query. Collections are
/// addressable both by ordinal (registration order) and by name.
#[derive(Debug)]
pub struct CollectionRegistry {
    collections: Vec<Arc<VectorCollection>>,
    by_name: HashMap<String, usize>,
    dimension: usize,
}

impl CollectionRegistry {
    /// Create an empty registry for collections of the given dimension.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(ExascanError::invalid_parameter(
                "vector dimension must be greater than zero",
            ));
        }
        Ok(Self {
            collections: Vec::new(),
            by_name: HashMap::new(),
            dimension,
        })
    }

    /// The dimension shared by every collection in this registry.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Add a collection. Its dimension must match the registry's, and its
    /// name must be unused.
    pub fn register(&mut self, collection: VectorCollection) -> Result<()> {
        if collection.dimension() != self.dimension {
            return Err(ExascanError::dimension_mismatch(
                self.dimension,
                collection.dimension(),
            ));
        }
        if self.by_name.contains_key(collection.name()) {
            return Err(ExascanError::invalid_parameter(format!(
                "duplicate collection name: {}",
                collection.name()
            )));
        }

        self.by_name
            .insert(collection.name().to_string(), self.collections.len());
        self.collections.push(Arc::new(collection));
        Ok(())
    }

    /// Resolve a collection by its ordinal (registration order).
    pub fn by_ordinal(&self, ordinal: usize) -> Option<&Arc<VectorCollection>> {
        self.collections.get(ordinal)
    }

    /// Resolve a collection by name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<VectorCollection>> {
        self.by_name.get(name).map(|&i| &self.collections[i])
    }

    /// Names of all collections, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.collections
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Number of registered collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Check whether the registry holds no collections.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> VectorCollection {
        VectorCollection::from_vectors(name, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_registration_and_resolution() {
        let mut registry = CollectionRegistry::new(2).unwrap();
        registry.register(sample("articles")).unwrap();
        registry.register(sample("titles")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_ordinal(0).unwrap().name(), "articles");
        assert_eq!(registry.by_ordinal(1).unwrap().name(), "titles");
        assert!(registry.by_ordinal(2).is_none());
        assert_eq!(registry.by_name("titles").unwrap().name(), "titles");
        assert!(registry.by_name("missing").is_none());
        assert_eq!(registry.names(), vec!["articles", "titles"]);
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let mut registry = CollectionRegistry::new(3).unwrap();
        let result = registry.register(sample("articles"));
        assert!(matches!(
            result,
            Err(ExascanError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let mut registry = CollectionRegistry::new(2).unwrap();
        registry.register(sample("articles")).unwrap();
        let result = registry.register(sample("articles"));
        assert!(matches!(result, Err(ExascanError::InvalidParameter(_))));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        assert!(CollectionRegistry::new(0).is_err());
    }
}
