use crate::{Result, XcodeError};
use kiln_common::{object_key, ObjectId};
use rustc_hash::FxHashMap;

/// Every object emitted into one project file, keyed by identifier.
///
/// Identifiers are content addressed, so two objects built from the same
/// name and type would silently share an id. Registering each object as it
/// is written turns that into an error instead of a corrupt file.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: FxHashMap<ObjectId, String>,
    order: Vec<ObjectId>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the id for `name` + `isa` and record it.
    pub fn register(&mut self, name: &str, isa: &str) -> Result<ObjectId> {
        let key = object_key(name, isa);
        let id = ObjectId::for_object(name, isa);

        if let Some(first) = self.objects.get(&id) {
            return Err(XcodeError::DuplicateObject {
                id,
                first: first.clone(),
                second: key,
            });
        }

        self.objects.insert(id, key);
        self.order.push(id);
        Ok(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered objects as `(id, key)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &str)> + '_ {
        self.order
            .iter()
            .map(move |id| (*id, self.objects[id].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_returns_content_addressed_id() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register("bar.c", "PBXFileReference").unwrap();

        assert_eq!(id, ObjectId::for_object("bar.c", "PBXFileReference"));
        assert!(registry.contains(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_key_twice_is_rejected() {
        let mut registry = ObjectRegistry::new();
        registry.register("Sources", "PBXGroup").unwrap();

        match registry.register("Sources", "PBXGroup") {
            Err(XcodeError::DuplicateObject { first, second, .. }) => {
                assert_eq!(first, "SourcesPBXGroup");
                assert_eq!(second, "SourcesPBXGroup");
            }
            other => panic!("expected duplicate object, got {:?}", other),
        }
    }

    #[test]
    fn test_iter_keeps_emission_order() {
        let mut registry = ObjectRegistry::new();
        registry.register("b", "PBXGroup").unwrap();
        registry.register("a", "PBXGroup").unwrap();

        let keys: Vec<&str> = registry.iter().map(|(_, key)| key).collect();
        assert_eq!(keys, vec!["bPBXGroup", "aPBXGroup"]);
    }
}
