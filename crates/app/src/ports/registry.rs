//! Registry port: sibling components declared by the surrounding device
//! configuration.

use lifematrix_domain::id::{ComponentId, ComponentKind};

/// Read access to the components already declared next to this one.
///
/// Lookups are synchronous: the registry is fully built before code
/// generation starts and never changes during it.
pub trait ComponentRegistry {
    /// Kind of the component declared as `id`, if any.
    fn kind_of(&self, id: &ComponentId) -> Option<&ComponentKind>;

    /// Whether `id` is already taken.
    fn contains(&self, id: &ComponentId) -> bool {
        self.kind_of(id).is_some()
    }
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistry for &R {
    fn kind_of(&self, id: &ComponentId) -> Option<&ComponentKind> {
        (**self).kind_of(id)
    }
}
