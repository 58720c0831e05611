use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    foundation::{
        core::AttributedString,
        error::{ReflectError, ReflectResult},
        value::Value,
    },
    types::{
        bridge::CoercionRules,
        type_info::{CapabilityKey, TypeKey, TypeRef},
    },
};

/// What a property expects: a concrete type, a capability, or one of a fixed
/// set of named values.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDescriptor {
    Concrete(TypeRef),
    Capability(CapabilityKey),
    Enum(EnumMapping),
}

/// Ordered, non-empty name -> value table with unique names.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMapping(Arc<IndexMap<String, Value>>);

impl EnumMapping {
    pub fn new<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> ReflectResult<Self> {
        let mut map = IndexMap::new();
        for (name, value) in entries {
            let name = name.into();
            if map.contains_key(&name) {
                return Err(ReflectError::registration(format!(
                    "enum mapping repeats name `{name}`"
                )));
            }
            map.insert(name, value);
        }
        if map.is_empty() {
            return Err(ReflectError::registration("enum mapping must not be empty"));
        }
        Ok(Self(Arc::new(map)))
    }

    /// First entry's value; its type is the mapping's value type.
    pub fn representative(&self) -> &Value {
        // Construction guarantees at least one entry.
        &self.0[0]
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TypeDescriptor {
    pub fn concrete(ty: TypeRef) -> Self {
        Self::Concrete(ty)
    }

    pub fn capability(key: CapabilityKey) -> Self {
        Self::Capability(key)
    }

    pub fn enumeration<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, Value)>,
    ) -> ReflectResult<Self> {
        EnumMapping::new(entries).map(Self::Enum)
    }

    /// Coerce `value` into the described type using the standard bridging rules.
    ///
    /// `None` means the value cannot be used for a property of this type; it is
    /// a validation failure, not an error.
    pub fn cast(&self, value: &Value) -> Option<Value> {
        self.cast_with(value, CoercionRules::standard())
    }

    /// [`TypeDescriptor::cast`] with an explicit bridging table.
    pub fn cast_with(&self, value: &Value, rules: &CoercionRules) -> Option<Value> {
        match self {
            TypeDescriptor::Concrete(ty) => cast_concrete(ty, value, rules),
            TypeDescriptor::Capability(capability) => match value {
                Value::Object(object) if object.type_ref().conforms_to(capability) => {
                    Some(value.clone())
                }
                _ => None,
            },
            TypeDescriptor::Enum(mapping) => cast_enum(mapping, value),
        }
    }

    /// Type-level compatibility: is `candidate` usable where this descriptor's
    /// type is expected? Capabilities and enums only check values, so they never
    /// match a type.
    pub fn matches_type(&self, candidate: &TypeRef) -> bool {
        match self {
            TypeDescriptor::Concrete(ty) if ty.is_reference() && candidate.is_reference() => {
                candidate.is_subtype_of(ty)
            }
            TypeDescriptor::Concrete(ty) => candidate.key() == ty.key(),
            TypeDescriptor::Capability(_) | TypeDescriptor::Enum(_) => false,
        }
    }

    /// Value-level compatibility; always equal to `cast(value).is_some()`.
    pub fn matches_value(&self, value: &Value) -> bool {
        self.cast(value).is_some()
    }
}

fn cast_concrete(ty: &TypeRef, value: &Value, rules: &CoercionRules) -> Option<Value> {
    let key = ty.key();
    if let Some(bridged) = rules.apply(value, key) {
        return bridged;
    }

    match key {
        k if *k == TypeKey::INT => match value {
            Value::Int(_) => Some(value.clone()),
            Value::Number(n) => number_to_i64(n).map(Value::Int),
            _ => None,
        },
        k if *k == TypeKey::UINT => match value {
            Value::UInt(_) => Some(value.clone()),
            Value::Number(n) => number_to_u64(n).map(Value::UInt),
            _ => None,
        },
        k if *k == TypeKey::FLOAT => match value {
            Value::Float(_) => Some(value.clone()),
            Value::Number(n) => n.as_f64().map(|f| Value::Float(f as f32)),
            _ => None,
        },
        k if *k == TypeKey::DOUBLE => match value {
            Value::Double(_) => Some(value.clone()),
            Value::Number(n) => n.as_f64().map(Value::Double),
            _ => None,
        },
        k if *k == TypeKey::SCALAR => match value {
            Value::Scalar(_) => Some(value.clone()),
            Value::Number(n) => n.as_f64().map(Value::Scalar),
            _ => None,
        },
        k if *k == TypeKey::BOOL => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
            _ => None,
        },
        k if *k == TypeKey::STRING => match value {
            Value::String(_) => Some(value.clone()),
            other => Some(Value::String(other.to_string())),
        },
        k if *k == TypeKey::ATTRIBUTED_STRING => match value {
            Value::AttributedString(_) => Some(value.clone()),
            other => Some(Value::AttributedString(AttributedString::plain(
                other.to_string(),
            ))),
        },
        _ if ty.is_reference() => match value {
            Value::Object(object) if object.type_ref().is_subtype_of(ty) => Some(value.clone()),
            _ => None,
        },
        k if *k == TypeKey::ANY => Some(value.clone()),
        _ => (value.type_key() == *key).then(|| value.clone()),
    }
}

// Fractions truncate toward zero; values that do not fit, and non-finite
// values, do not convert.
fn number_to_i64(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    let t = n.as_f64()?.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn number_to_u64(n: &serde_json::Number) -> Option<u64> {
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    if n.is_i64() {
        return None;
    }
    let t = n.as_f64()?.trunc();
    (t.is_finite() && t >= 0.0 && t < u64::MAX as f64).then_some(t as u64)
}

fn cast_enum(mapping: &EnumMapping, value: &Value) -> Option<Value> {
    if let Value::String(name) = value {
        if let Some(mapped) = mapping.get(name) {
            return Some(mapped.clone());
        }
    }
    if mapping.representative().type_key() != value.type_key() {
        return None;
    }
    mapping
        .values()
        .find(|candidate| same_case(candidate, value))
        .cloned()
}

// Boxed numbers compare by numeric value, so `1.0` selects a case stored as `1`.
fn same_case(candidate: &Value, value: &Value) -> bool {
    match (candidate, value) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(a), Some(b)) => a == b,
                _ => a.as_f64().zip(b.as_f64()).is_some_and(|(a, b)| a == b),
            },
        },
        _ => candidate == value,
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Concrete(ty) => write!(f, "{ty}"),
            TypeDescriptor::Capability(capability) => write!(f, "<{capability}>"),
            TypeDescriptor::Enum(mapping) => {
                f.write_str("enum(")?;
                for (i, name) in mapping.names().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    f.write_str(name)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Serialized as its display form.
impl serde::Serialize for TypeDescriptor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/types/descriptor.rs"]
mod tests;
