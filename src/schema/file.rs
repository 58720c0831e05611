use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use anyhow::Context as _;
use serde::Deserialize;

use crate::{
    catalog::{member::MemberDecl, properties::PropertyCatalog, source::SchemaMembers},
    foundation::error::{ReflectError, ReflectResult},
    types::{
        registry::TypeRegistry,
        type_info::{CapabilityKey, TypeKey, TypeRef},
    },
};

/// JSON description of the bindable object model.
///
/// ```json
/// {
///   "capabilities": ["Tappable"],
///   "types": [
///     { "name": "View", "members": [{ "name": "alpha", "type": "d" }] },
///     { "name": "Button", "parent": "View", "capabilities": ["Tappable"] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    /// Parent object type; `AnyObject` when absent.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

/// A loaded schema: the type registry plus the declared members.
#[derive(Clone, Debug)]
pub struct Schema {
    types: Arc<TypeRegistry>,
    members: SchemaMembers,
}

impl SchemaFile {
    pub fn from_path(path: &Path) -> ReflectResult<Self> {
        let f = File::open(path).with_context(|| format!("open schema '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReflectError::serde(format!("schema '{}': {e}", path.display())))
    }

    pub fn from_json_str(json: &str) -> ReflectResult<Self> {
        serde_json::from_str(json).map_err(|e| ReflectError::serde(e.to_string()))
    }

    /// Register every capability and type.
    ///
    /// Types may appear in any order; each is registered once its parent is.
    #[tracing::instrument(skip_all, fields(types = self.types.len()))]
    pub fn build(&self) -> ReflectResult<Schema> {
        let mut registry = TypeRegistry::new();
        for capability in &self.capabilities {
            registry.register_capability(CapabilityKey::new(capability.as_str()))?;
        }

        let mut pending: Vec<&TypeDecl> = self.types.iter().collect();
        for decl in &pending {
            if let Some(parent) = decl.parent.as_deref()
                && registry.get(parent).is_none()
                && !self.types.iter().any(|t| t.name == parent)
            {
                return Err(ReflectError::schema(format!(
                    "type `{}` names unknown parent `{parent}`",
                    decl.name
                )));
            }
        }

        while !pending.is_empty() {
            let before = pending.len();
            let mut blocked = Vec::new();
            for decl in pending {
                let ready = decl
                    .parent
                    .as_deref()
                    .is_none_or(|parent| registry.get(parent).is_some());
                if !ready {
                    blocked.push(decl);
                    continue;
                }
                registry.register_type(
                    TypeKey::new(decl.name.as_str()),
                    decl.parent.as_deref(),
                    decl.capabilities
                        .iter()
                        .map(|c| CapabilityKey::new(c.as_str())),
                )?;
            }
            if blocked.len() == before {
                let names: Vec<&str> = blocked.iter().map(|d| d.name.as_str()).collect();
                return Err(ReflectError::schema(format!(
                    "cyclic parent chain among {}",
                    names.join(", ")
                )));
            }
            pending = blocked;
        }

        let mut members = SchemaMembers::new();
        for decl in &self.types {
            members.declare_all(TypeKey::new(decl.name.as_str()), decl.members.iter().cloned());
        }

        tracing::debug!(
            types = registry.object_types().count(),
            capabilities = registry.capabilities().count(),
            "schema built"
        );
        Ok(Schema {
            types: Arc::new(registry),
            members,
        })
    }
}

impl Schema {
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    pub fn members(&self) -> &SchemaMembers {
        &self.members
    }

    /// Look up a registered type by name.
    pub fn get(&self, name: &str) -> ReflectResult<&TypeRef> {
        self.types
            .get(name)
            .ok_or_else(|| ReflectError::schema(format!("unknown type `{name}`")))
    }

    /// A fresh property catalog over this schema.
    pub fn catalog(&self) -> PropertyCatalog {
        PropertyCatalog::new(Arc::clone(&self.types), self.members.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/file.rs"]
mod tests;
