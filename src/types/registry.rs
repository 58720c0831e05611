//! Explicit registry of object types and capability contracts.
//!
//! The registry is filled during a startup phase (usually from a
//! [`crate::SchemaFile`]) and then shared read-only behind an `Arc`. Type
//! identity is only ever resolved through it, which makes "stable identity for
//! the process lifetime" a property of registration rather than of the host.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::error::{ReflectError, ReflectResult},
    types::type_info::{BUILTIN_VALUE_TYPES, CapabilityKey, TypeKey, TypeRef},
};

/// Registered types (builtins included) and capabilities, by name.
#[derive(Debug)]
pub struct TypeRegistry {
    types: BTreeMap<TypeKey, TypeRef>,
    capabilities: BTreeSet<CapabilityKey>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut types: BTreeMap<TypeKey, TypeRef> = BUILTIN_VALUE_TYPES
            .iter()
            .map(|key| (key.clone(), TypeRef::value(key.clone())))
            .collect();
        types.insert(TypeKey::ANY_OBJECT, TypeRef::any_object());
        Self {
            types,
            capabilities: BTreeSet::new(),
        }
    }
}

impl TypeRegistry {
    /// Registry holding only the builtin types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability contract that types can declare conformance to.
    pub fn register_capability(&mut self, key: CapabilityKey) -> ReflectResult<()> {
        if !self.capabilities.insert(key.clone()) {
            return Err(ReflectError::registration(format!(
                "capability `{key}` is already registered"
            )));
        }
        Ok(())
    }

    /// Register an object type.
    ///
    /// `parent` must already be registered and be a reference type; without a
    /// parent the type derives from `AnyObject`. Every declared capability must
    /// already be registered.
    pub fn register_type(
        &mut self,
        key: TypeKey,
        parent: Option<&str>,
        capabilities: impl IntoIterator<Item = CapabilityKey>,
    ) -> ReflectResult<TypeRef> {
        if self.types.contains_key(&key) {
            return Err(ReflectError::registration(format!(
                "type `{key}` is already registered"
            )));
        }

        let parent = match parent {
            Some(name) => {
                let parent = self.types.get(name).ok_or_else(|| {
                    ReflectError::registration(format!(
                        "type `{key}` names unknown parent `{name}`"
                    ))
                })?;
                if !parent.is_reference() {
                    return Err(ReflectError::registration(format!(
                        "type `{key}` cannot derive from value type `{name}`"
                    )));
                }
                Some(parent.clone())
            }
            None => None,
        };

        let capabilities: Vec<CapabilityKey> = capabilities.into_iter().collect();
        if let Some(unknown) = capabilities
            .iter()
            .find(|c| !self.capabilities.contains(*c))
        {
            return Err(ReflectError::registration(format!(
                "type `{key}` declares unknown capability `{unknown}`"
            )));
        }

        let ty = TypeRef::object(key.clone(), parent, capabilities);
        self.types.insert(key, ty.clone());
        tracing::debug!(ty = %ty, "registered type");
        Ok(ty)
    }

    /// Look a type up by name. Builtins are always present.
    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.types.get(name)
    }

    /// Look a capability up by name.
    pub fn capability(&self, name: &str) -> Option<&CapabilityKey> {
        self.capabilities.get(name)
    }

    /// Registered object types (builtins excluded except `AnyObject`), by name.
    pub fn object_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.values().filter(|t| t.is_reference())
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &CapabilityKey> {
        self.capabilities.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/types/registry.rs"]
mod tests;
