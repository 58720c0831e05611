use std::collections::BTreeMap;

use crate::{foundation::value::Value, path::object::FieldError};

/// Reads one field of `T`.
pub type Getter<T> = fn(&T) -> Value;

/// Stores one field of `T`; hands the value back when its type is not stored.
pub type Setter<T> = fn(&mut T, Value) -> Result<(), Value>;

struct Field<T> {
    get: Getter<T>,
    set: Option<Setter<T>>,
}

/// Field-dispatch table for a domain object type.
///
/// Built once per type (typically in a `LazyLock`) and consulted by the
/// object's [`crate::Reflect`] implementation. Every name resolves through a
/// single lookup; alternate spellings such as `isHidden` for `hidden` are
/// registered with [`FieldTable::alias`].
pub struct FieldTable<T> {
    fields: BTreeMap<&'static str, Field<T>>,
    aliases: BTreeMap<&'static str, &'static str>,
}

impl<T> Default for FieldTable<T> {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl<T> FieldTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a readable and writable field.
    pub fn field(mut self, name: &'static str, get: Getter<T>, set: Setter<T>) -> Self {
        self.fields.insert(
            name,
            Field {
                get,
                set: Some(set),
            },
        );
        self
    }

    /// Register a field without a setter.
    pub fn read_only(mut self, name: &'static str, get: Getter<T>) -> Self {
        self.fields.insert(name, Field { get, set: None });
        self
    }

    /// Make `alias` resolve to the already registered field `target`.
    ///
    /// Aliases never chain: an alias pointing at another alias resolves to nothing.
    pub fn alias(mut self, alias: &'static str, target: &'static str) -> Self {
        self.aliases.insert(alias, target);
        self
    }

    fn resolve(&self, name: &str) -> Option<&Field<T>> {
        self.fields
            .get(name)
            .or_else(|| self.aliases.get(name).and_then(|target| self.fields.get(target)))
    }

    /// True when `name` (or an alias of it) is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn get(&self, object: &T, name: &str) -> Option<Value> {
        self.resolve(name).map(|field| (field.get)(object))
    }

    pub fn set(&self, object: &mut T, name: &str, value: Value) -> Result<(), FieldError> {
        let field = self.resolve(name).ok_or(FieldError::Missing)?;
        let set = field.set.ok_or(FieldError::ReadOnly)?;
        set(object, value).map_err(FieldError::Rejected)
    }

    /// Registered field names (aliases excluded), in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/fields.rs"]
mod tests;
