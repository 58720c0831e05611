//! layout-reflect is the runtime type and property reflection core of a
//! declarative layout framework.
//!
//! An expression evaluator binds layout attributes to object members through
//! textual paths. This crate answers the questions it needs answered at
//! runtime:
//!
//! - What type does a property expect? See [`PropertyCatalog`] and [`TypeDescriptor`].
//! - Can this value be used for it, and in which form? See [`TypeDescriptor::cast`].
//! - How is the value applied to `layer.mask.cornerRadius`? See [`PathAccessor`] and [`Binder`].
//!
//! Types and capabilities are registered explicitly in a [`TypeRegistry`],
//! usually loaded from a [`SchemaFile`], and objects expose their members
//! through the [`Reflect`] trait.
#![forbid(unsafe_code)]

mod binding;
mod catalog;
mod foundation;
mod path;
mod schema;
mod types;

pub use crate::foundation::core::{AttributedString, Color, Point, Rect, Rgba8Premul, Size};
pub use crate::foundation::error::{ReflectError, ReflectResult};
pub use crate::foundation::value::Value;

pub use crate::types::bridge::{CoercionRules, Converter};
pub use crate::types::descriptor::{EnumMapping, TypeDescriptor};
pub use crate::types::registry::TypeRegistry;
pub use crate::types::type_info::{CapabilityKey, TypeInfo, TypeKey, TypeKind, TypeRef};

pub use crate::catalog::member::{MemberDecl, MemberType};
pub use crate::catalog::properties::{PropertyCatalog, PropertyMap};
pub use crate::catalog::source::{MemberSource, SchemaMembers};

pub use crate::path::accessor::{PATH_SEPARATOR, PathAccessor, TraversalError};
pub use crate::path::fields::{FieldTable, Getter, Setter};
pub use crate::path::object::{FieldError, ObjectRef, Reflect};

pub use crate::binding::binder::{Binder, BindingError};
pub use crate::schema::file::{Schema, SchemaFile, TypeDecl};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
pub(crate) mod fixtures;
