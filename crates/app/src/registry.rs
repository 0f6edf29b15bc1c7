//! In-memory component registry.

use std::collections::HashMap;

use lifematrix_domain::error::ResolutionError;
use lifematrix_domain::id::{ComponentId, ComponentKind};

use crate::ports::ComponentRegistry;

/// Registry backed by a [`HashMap`], filled once by a document loader.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    components: HashMap<ComponentId, ComponentKind>,
}

impl InMemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a sibling component.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateId`] when `id` is already declared.
    pub fn declare(&mut self, id: ComponentId, kind: ComponentKind) -> Result<(), ResolutionError> {
        if self.components.contains_key(&id) {
            return Err(ResolutionError::DuplicateId { id });
        }
        tracing::trace!(%id, %kind, "declared sibling component");
        self.components.insert(id, kind);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentRegistry for InMemoryRegistry {
    fn kind_of(&self, id: &ComponentId) -> Option<&ComponentKind> {
        self.components.get(id)
    }
}

impl FromIterator<(ComponentId, ComponentKind)> for InMemoryRegistry {
    /// Later duplicates overwrite earlier ones; use [`InMemoryRegistry::declare`]
    /// to detect them.
    fn from_iter<I: IntoIterator<Item = (ComponentId, ComponentKind)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ComponentId {
        value.parse().unwrap()
    }

    #[test]
    fn should_find_declared_component() {
        let mut registry = InMemoryRegistry::new();
        registry.declare(id("sntp_time"), ComponentKind::RealTimeClock).unwrap();

        assert_eq!(
            registry.kind_of(&id("sntp_time")),
            Some(&ComponentKind::RealTimeClock)
        );
        assert!(registry.contains(&id("sntp_time")));
        assert!(!registry.contains(&id("other")));
    }

    #[test]
    fn should_reject_duplicate_declaration() {
        let mut registry = InMemoryRegistry::new();
        registry.declare(id("matrix"), ComponentKind::Display).unwrap();

        let err = registry
            .declare(id("matrix"), ComponentKind::Font)
            .unwrap_err();
        assert_eq!(err, ResolutionError::DuplicateId { id: id("matrix") });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn should_be_empty_when_new() {
        assert!(InMemoryRegistry::new().is_empty());
    }
}
