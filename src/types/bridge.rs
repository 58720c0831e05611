use std::collections::HashMap;
use std::sync::LazyLock;

use crate::{foundation::value::Value, types::type_info::TypeKey};

/// Converts a value of the rule's source type into the rule's target type.
pub type Converter = fn(&Value) -> Option<Value>;

/// Table of bridging conversions consulted before the builtin coercions.
///
/// A rule is keyed by (source type, target type). When a rule matches, its
/// result is the outcome of the cast.
#[derive(Clone, Default)]
pub struct CoercionRules {
    rules: HashMap<(TypeKey, TypeKey), Converter>,
}

static STANDARD: LazyLock<CoercionRules> = LazyLock::new(|| {
    let mut rules = CoercionRules::empty();
    rules.register(TypeKey::COLOR, TypeKey::PACKED_COLOR, |value| match value {
        Value::Color(c) => Some(Value::PackedColor(c.to_premul())),
        _ => None,
    });
    rules
});

impl CoercionRules {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rules every descriptor uses by default: source colors bridge into
    /// packed color storage.
    pub fn standard() -> &'static CoercionRules {
        &STANDARD
    }

    /// Add or replace the rule for `from -> to`.
    pub fn register(&mut self, from: TypeKey, to: TypeKey, convert: Converter) {
        self.rules.insert((from, to), convert);
    }

    /// `None` when no rule applies, otherwise the rule's result.
    pub(crate) fn apply(&self, value: &Value, target: &TypeKey) -> Option<Option<Value>> {
        self.rules
            .get(&(value.type_key(), target.clone()))
            .map(|convert| convert(value))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for CoercionRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}
