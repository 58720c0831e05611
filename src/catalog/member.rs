use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    foundation::{
        error::{ReflectError, ReflectResult},
        value::Value,
    },
    types::descriptor::EnumMapping,
};

/// Storage type of a declared member, as reported by a [`crate::MemberSource`].
///
/// Parsed from compact type codes:
///
/// | code | meaning |
/// |------|---------|
/// | `B` | bool |
/// | `c i s l q` | signed integers |
/// | `C I S L Q` | unsigned integers |
/// | `f` / `d` | float / double |
/// | `*` | byte pointer |
/// | `@`, `@"Name"`, `@"<Name>"` | object, named type, capability |
/// | `#` | class |
/// | `:` | selector |
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "MemberTypeRepr")]
pub enum MemberType {
    Bool,
    Int,
    UInt,
    Float,
    Double,
    CString,
    /// Object member, optionally naming its type or a `<capability>`.
    Object(Option<String>),
    Class,
    Selector,
    Enum(EnumMapping),
    /// Any code not listed above; such members are not bindable.
    Unsupported(String),
}

impl MemberType {
    pub fn parse(code: &str) -> Self {
        match code {
            "B" => MemberType::Bool,
            "c" | "i" | "s" | "l" | "q" => MemberType::Int,
            "C" | "I" | "S" | "L" | "Q" => MemberType::UInt,
            "f" => MemberType::Float,
            "d" => MemberType::Double,
            "*" => MemberType::CString,
            "#" => MemberType::Class,
            ":" => MemberType::Selector,
            _ if code.starts_with('@') => MemberType::Object(
                code.strip_prefix("@\"")
                    .and_then(|rest| rest.strip_suffix('"'))
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            ),
            other => MemberType::Unsupported(other.to_string()),
        }
    }

    /// Enum member from JSON scalars.
    pub fn enumeration(
        entries: impl IntoIterator<Item = (String, serde_json::Value)>,
    ) -> ReflectResult<Self> {
        let entries = entries
            .into_iter()
            .map(|(name, json)| match Value::from_json(json) {
                Some(value) => Ok((name, value)),
                None => Err(ReflectError::schema(format!(
                    "enum case `{name}` must map to a JSON scalar"
                ))),
            })
            .collect::<ReflectResult<Vec<_>>>()?;
        EnumMapping::new(entries).map(MemberType::Enum)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MemberTypeRepr {
    Code(String),
    Enum {
        #[serde(rename = "enum")]
        cases: IndexMap<String, serde_json::Value>,
    },
}

impl TryFrom<MemberTypeRepr> for MemberType {
    type Error = ReflectError;

    fn try_from(repr: MemberTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            MemberTypeRepr::Code(code) => Ok(MemberType::parse(&code)),
            MemberTypeRepr::Enum { cases } => MemberType::enumeration(cases),
        }
    }
}

/// One member as declared on a type (own members only).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: MemberType,
    #[serde(default)]
    pub readonly: bool,
    /// Custom getter name, e.g. `isHidden` for `hidden`.
    #[serde(default)]
    pub getter: Option<String>,
}

impl MemberDecl {
    pub fn new(name: impl Into<String>, ty: MemberType) -> Self {
        Self {
            name: name.into(),
            ty,
            readonly: false,
            getter: None,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn with_getter(mut self, getter: impl Into<String>) -> Self {
        self.getter = Some(getter.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/member.rs"]
mod tests;
