use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    catalog::{
        member::{MemberDecl, MemberType},
        source::{MemberSource, SchemaMembers},
    },
    types::{
        descriptor::TypeDescriptor,
        registry::TypeRegistry,
        type_info::{TypeKey, TypeRef},
    },
};

/// Bindable property name -> expected type.
pub type PropertyMap = BTreeMap<String, TypeDescriptor>;

/// Per-type catalog of writable properties, memoized for the catalog's
/// lifetime.
///
/// Maps are computed outside the cache lock and published with an
/// insert-if-absent, so a reader sees either no entry or a complete one. Two
/// threads racing on the first lookup of a type may both compute it; the first
/// to publish wins.
pub struct PropertyCatalog<S = SchemaMembers> {
    types: Arc<TypeRegistry>,
    source: S,
    cache: RwLock<HashMap<TypeKey, Arc<PropertyMap>>>,
}

impl<S: MemberSource> PropertyCatalog<S> {
    pub fn new(types: Arc<TypeRegistry>, source: S) -> Self {
        Self {
            types,
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Properties declared on `ty` itself.
    pub fn local_properties(&self, ty: &TypeRef) -> Arc<PropertyMap> {
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ty.key())
        {
            return Arc::clone(hit);
        }

        let computed = Arc::new(self.introspect(ty));
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(ty.key().clone()).or_insert(computed))
    }

    /// Properties of `ty` and its ancestors up to, but not including,
    /// `excluding`. Derived declarations shadow inherited ones.
    ///
    /// # Panics
    ///
    /// If `ty` is neither `excluding` nor one of its descendants.
    pub fn all_properties(&self, ty: &TypeRef, excluding: &TypeRef) -> PropertyMap {
        assert!(
            ty.is_subtype_of(excluding),
            "`{ty}` does not descend from `{excluding}`"
        );
        let mut all = PropertyMap::new();
        for owner in ty.ancestry().take_while(|t| *t != excluding) {
            for (name, descriptor) in self.local_properties(owner).iter() {
                all.entry(name.clone())
                    .or_insert_with(|| descriptor.clone());
            }
        }
        all
    }

    /// Compute and publish the local catalogs of `types` ahead of use.
    #[tracing::instrument(skip_all)]
    pub fn prime<'t>(&self, types: impl IntoIterator<Item = &'t TypeRef>) {
        for ty in types {
            let _ = self.local_properties(ty);
        }
    }

    /// Number of types with a published catalog.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[tracing::instrument(skip_all, fields(ty = %ty))]
    fn introspect(&self, ty: &TypeRef) -> PropertyMap {
        tracing::debug!("catalog cache miss");
        let mut properties = PropertyMap::new();
        for member in self.source.declared_members(ty) {
            if member.name.starts_with('_') {
                tracing::trace!(member = %member.name, "skipping private member");
                continue;
            }
            if member.readonly {
                tracing::trace!(member = %member.name, "skipping read-only member");
                continue;
            }
            let Some((name, descriptor)) = self.decode(member) else {
                continue;
            };
            properties.entry(name).or_insert(descriptor);
        }
        properties
    }

    fn decode(&self, member: MemberDecl) -> Option<(String, TypeDescriptor)> {
        let MemberDecl {
            mut name,
            ty,
            getter,
            ..
        } = member;
        let descriptor = match ty {
            MemberType::Bool => {
                if let Some(getter) = getter.filter(|g| g.starts_with("is")) {
                    name = getter;
                }
                self.builtin(TypeKey::BOOL)
            }
            MemberType::Int => self.builtin(TypeKey::INT),
            MemberType::UInt => self.builtin(TypeKey::UINT),
            MemberType::Float => self.builtin(TypeKey::FLOAT),
            MemberType::Double => self.builtin(TypeKey::DOUBLE),
            MemberType::CString => self.builtin(TypeKey::BYTES),
            MemberType::Object(Some(type_name)) => self.resolve_object(&type_name),
            MemberType::Object(None) => self.builtin(TypeKey::ANY_OBJECT),
            MemberType::Class => self.builtin(TypeKey::ANY_CLASS),
            MemberType::Selector => self.builtin(TypeKey::SELECTOR),
            MemberType::Enum(mapping) => TypeDescriptor::Enum(mapping),
            MemberType::Unsupported(code) => {
                tracing::debug!(member = %name, code = %code, "dropping member of unsupported type");
                return None;
            }
        };
        Some((name, descriptor))
    }

    // A registered type wins, then a `<capability>`, then any object.
    fn resolve_object(&self, type_name: &str) -> TypeDescriptor {
        if let Some(ty) = self.types.get(type_name) {
            return TypeDescriptor::concrete(ty.clone());
        }
        if let Some(capability) = type_name
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|name| self.types.capability(name))
        {
            return TypeDescriptor::capability(capability.clone());
        }
        tracing::trace!(type_name = %type_name, "unresolved object type, using AnyObject");
        self.builtin(TypeKey::ANY_OBJECT)
    }

    fn builtin(&self, key: TypeKey) -> TypeDescriptor {
        let ty = match self.types.get(key.as_str()) {
            Some(ty) => ty.clone(),
            None if key == TypeKey::ANY_OBJECT => TypeRef::any_object(),
            None => TypeRef::value(key),
        };
        TypeDescriptor::concrete(ty)
    }
}

impl<S> std::fmt::Debug for PropertyCatalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyCatalog")
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/properties.rs"]
mod tests;
