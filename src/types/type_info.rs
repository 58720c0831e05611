use std::borrow::{Borrow, Cow};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Canonical identity of a type.
///
/// Type identity is always compared by key; two [`TypeRef`]s with the same
/// key denote the same type.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TypeKey(Cow<'static, str>);

/// Canonical identity of a capability contract.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CapabilityKey(Cow<'static, str>);

impl TypeKey {
    pub const ANY: TypeKey = TypeKey::from_static("Any");
    pub const NULL: TypeKey = TypeKey::from_static("Null");
    pub const BOOL: TypeKey = TypeKey::from_static("Bool");
    pub const INT: TypeKey = TypeKey::from_static("Int");
    pub const UINT: TypeKey = TypeKey::from_static("UInt");
    pub const FLOAT: TypeKey = TypeKey::from_static("Float");
    pub const DOUBLE: TypeKey = TypeKey::from_static("Double");
    /// Platform-width float used for geometry scalars.
    pub const SCALAR: TypeKey = TypeKey::from_static("Scalar");
    /// Generic boxed number, the untyped numeric result of an expression.
    pub const NUMBER: TypeKey = TypeKey::from_static("Number");
    pub const STRING: TypeKey = TypeKey::from_static("String");
    pub const ATTRIBUTED_STRING: TypeKey = TypeKey::from_static("AttributedString");
    pub const BYTES: TypeKey = TypeKey::from_static("Bytes");
    pub const COLOR: TypeKey = TypeKey::from_static("Color");
    pub const PACKED_COLOR: TypeKey = TypeKey::from_static("PackedColor");
    pub const POINT: TypeKey = TypeKey::from_static("Point");
    pub const SIZE: TypeKey = TypeKey::from_static("Size");
    pub const RECT: TypeKey = TypeKey::from_static("Rect");
    /// Root of every registered reference type.
    pub const ANY_OBJECT: TypeKey = TypeKey::from_static("AnyObject");
    pub const ANY_CLASS: TypeKey = TypeKey::from_static("AnyClass");
    pub const SELECTOR: TypeKey = TypeKey::from_static("Selector");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CapabilityKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys hash and order exactly like their string, so maps can be queried by `&str`.
impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CapabilityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether values of a type are plain data or shared object references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Value,
    Reference,
}

/// Registered description of a type: identity, kind, parent and conformances.
#[derive(Debug)]
pub struct TypeInfo {
    key: TypeKey,
    kind: TypeKind,
    parent: Option<TypeRef>,
    capabilities: BTreeSet<CapabilityKey>,
}

/// Shared handle to a [`TypeInfo`].
#[derive(Clone, Debug)]
pub struct TypeRef(Arc<TypeInfo>);

/// All builtin type keys, in registration order.
pub(crate) const BUILTIN_VALUE_TYPES: &[TypeKey] = &[
    TypeKey::ANY,
    TypeKey::NULL,
    TypeKey::BOOL,
    TypeKey::INT,
    TypeKey::UINT,
    TypeKey::FLOAT,
    TypeKey::DOUBLE,
    TypeKey::SCALAR,
    TypeKey::NUMBER,
    TypeKey::STRING,
    TypeKey::ATTRIBUTED_STRING,
    TypeKey::BYTES,
    TypeKey::COLOR,
    TypeKey::PACKED_COLOR,
    TypeKey::POINT,
    TypeKey::SIZE,
    TypeKey::RECT,
    TypeKey::ANY_CLASS,
    TypeKey::SELECTOR,
];

impl TypeRef {
    /// Builtin value type with no parent.
    pub fn value(key: TypeKey) -> Self {
        Self(Arc::new(TypeInfo {
            key,
            kind: TypeKind::Value,
            parent: None,
            capabilities: BTreeSet::new(),
        }))
    }

    /// The root reference type every registered object type descends from.
    pub fn any_object() -> Self {
        Self(Arc::new(TypeInfo {
            key: TypeKey::ANY_OBJECT,
            kind: TypeKind::Reference,
            parent: None,
            capabilities: BTreeSet::new(),
        }))
    }

    /// Reference type deriving from `parent` (or directly from `AnyObject`).
    pub fn object(
        key: TypeKey,
        parent: Option<TypeRef>,
        capabilities: impl IntoIterator<Item = CapabilityKey>,
    ) -> Self {
        Self(Arc::new(TypeInfo {
            key,
            kind: TypeKind::Reference,
            parent: Some(parent.unwrap_or_else(Self::any_object)),
            capabilities: capabilities.into_iter().collect(),
        }))
    }

    pub fn key(&self) -> &TypeKey {
        &self.0.key
    }

    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    pub fn parent(&self) -> Option<&TypeRef> {
        self.0.parent.as_ref()
    }

    pub fn is_reference(&self) -> bool {
        self.0.kind == TypeKind::Reference
    }

    /// Capabilities declared directly on this type (not inherited).
    pub fn declared_capabilities(&self) -> impl Iterator<Item = &CapabilityKey> {
        self.0.capabilities.iter()
    }

    /// This type followed by each ancestor, most derived first.
    pub fn ancestry(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::successors(Some(self), |t| t.parent())
    }

    /// True when `self` is `other` or one of its descendants.
    pub fn is_subtype_of(&self, other: &TypeRef) -> bool {
        self.ancestry().any(|t| t.key() == other.key())
    }

    /// True when this type or an ancestor declares `capability`.
    pub fn conforms_to(&self, capability: &CapabilityKey) -> bool {
        self.ancestry().any(|t| t.0.capabilities.contains(capability))
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TypeRef {}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.key(), f)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/types/type_info.rs"]
mod tests;
