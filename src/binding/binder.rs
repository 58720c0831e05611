use crate::{
    catalog::{properties::PropertyCatalog, source::MemberSource, source::SchemaMembers},
    foundation::value::Value,
    path::{
        accessor::{PathAccessor, TraversalError},
        object::ObjectRef,
    },
    types::{bridge::CoercionRules, type_info::TypeKey, type_info::TypeRef},
};

/// Why a value could not be bound to a member path.
///
/// Coercion failures and structural failures stay distinct so the evaluator
/// can report them differently.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The final segment is not a bindable property of its owner.
    #[error("unknown binding `{name}` of `{owner}` in `{path}`")]
    UnknownBinding {
        name: String,
        owner: String,
        path: String,
    },

    /// The value cannot be cast to the property's type.
    #[error("`{path}` expects {expected}, got a value of type `{found}`")]
    TypeMismatch {
        path: String,
        expected: String,
        found: TypeKey,
    },

    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

/// Applies evaluated values to object members: catalog lookup, cast, then
/// path assignment.
///
/// Only properties declared below `boundary` (exclusive) are bindable.
pub struct Binder<'c, S = SchemaMembers> {
    catalog: &'c PropertyCatalog<S>,
    boundary: TypeRef,
    rules: &'c CoercionRules,
}

impl<'c, S: MemberSource> Binder<'c, S> {
    pub fn new(catalog: &'c PropertyCatalog<S>, boundary: TypeRef) -> Self {
        Self {
            catalog,
            boundary,
            rules: CoercionRules::standard(),
        }
    }

    /// Use `rules` instead of the standard bridging table.
    pub fn with_rules(mut self, rules: &'c CoercionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn boundary(&self) -> &TypeRef {
        &self.boundary
    }

    /// Cast `value` for the member at `path` below `root` and store it.
    ///
    /// Returns the value as stored.
    #[tracing::instrument(skip(self, root, value))]
    pub fn apply(&self, root: &ObjectRef, path: &str, value: Value) -> Result<Value, BindingError> {
        let (owner, name) = PathAccessor::resolve_owner(root, path)?;
        let owner_ty = owner.type_ref();
        let unknown = || BindingError::UnknownBinding {
            name: name.to_string(),
            owner: owner_ty.to_string(),
            path: path.to_string(),
        };
        if !owner_ty.is_subtype_of(&self.boundary) {
            return Err(unknown());
        }

        let properties = self.catalog.all_properties(&owner_ty, &self.boundary);
        let descriptor = properties.get(name).ok_or_else(unknown)?;
        let Some(cast) = descriptor.cast_with(&value, self.rules) else {
            tracing::debug!(expected = %descriptor, found = %value.type_key(), "cast rejected");
            return Err(BindingError::TypeMismatch {
                path: path.to_string(),
                expected: descriptor.to_string(),
                found: value.type_key(),
            });
        };

        PathAccessor::assign(&owner, name, cast.clone(), path)?;
        Ok(cast)
    }

    /// Bindable property names of `ty`, sorted. Empty for types outside the
    /// boundary.
    pub fn names(&self, ty: &TypeRef) -> Vec<String> {
        if !ty.is_subtype_of(&self.boundary) {
            return Vec::new();
        }
        self.catalog
            .all_properties(ty, &self.boundary)
            .into_keys()
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/binder.rs"]
mod tests;
