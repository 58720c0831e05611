use crate::{
    foundation::value::Value,
    path::object::{FieldError, ObjectRef},
    types::type_info::TypeKey,
};

/// Member path separator.
pub const PATH_SEPARATOR: char = '.';

/// Structural failure while applying a value along a member path.
///
/// Every variant names the offending segment, a description of the type that
/// owns it and the full path, so callers can attach the failure to the binding
/// that produced it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// The owner has no member with this name.
    #[error("unknown property `{segment}` of `{owner}` in `{path}`")]
    UnknownProperty {
        segment: String,
        owner: String,
        path: String,
    },

    /// An intermediate member exists but is nil.
    #[error("encountered nil value for `{segment}` of `{owner}` in `{path}`")]
    NilIntermediate {
        segment: String,
        owner: String,
        path: String,
    },

    /// The final member cannot be assigned.
    #[error("no valid setter found for property `{segment}` of `{owner}` in `{path}`")]
    NoSetter {
        segment: String,
        owner: String,
        path: String,
    },

    /// The final member's setter does not store values of this type.
    #[error("property `{segment}` of `{owner}` in `{path}` does not accept `{found}`")]
    Rejected {
        segment: String,
        owner: String,
        path: String,
        found: TypeKey,
    },
}

impl TraversalError {
    /// The path segment the failure is attached to.
    pub fn segment(&self) -> &str {
        match self {
            TraversalError::UnknownProperty { segment, .. }
            | TraversalError::NilIntermediate { segment, .. }
            | TraversalError::NoSetter { segment, .. }
            | TraversalError::Rejected { segment, .. } => segment,
        }
    }

    /// The full path that was being traversed.
    pub fn path(&self) -> &str {
        match self {
            TraversalError::UnknownProperty { path, .. }
            | TraversalError::NilIntermediate { path, .. }
            | TraversalError::NoSetter { path, .. }
            | TraversalError::Rejected { path, .. } => path,
        }
    }

    fn unknown_property(segment: &str, owner: impl ToString, path: &str) -> Self {
        TraversalError::UnknownProperty {
            segment: segment.to_string(),
            owner: owner.to_string(),
            path: path.to_string(),
        }
    }
}

/// Stateless get/set along dotted member paths.
pub struct PathAccessor;

impl PathAccessor {
    /// Assign `value` to the member at `path` below `root`.
    ///
    /// The value is stored as given; producing a value of the member's type is
    /// the caller's job (see [`crate::TypeDescriptor::cast`]).
    pub fn set(root: &ObjectRef, path: &str, value: Value) -> Result<(), TraversalError> {
        let (owner, segment) = Self::resolve_owner(root, path)?;
        Self::assign(&owner, segment, value, path)
    }

    /// Best-effort read of the member at `path` below `root`.
    ///
    /// Any unknown member, nil or non-object intermediate, or nil final value
    /// voids the whole lookup.
    pub fn get(root: &ObjectRef, path: &str) -> Option<Value> {
        let mut current = Value::Object(root.clone());
        for segment in path.split(PATH_SEPARATOR) {
            let Value::Object(object) = &current else {
                return None;
            };
            let next = object.get(segment)?;
            if next.is_null() {
                return None;
            }
            current = next;
        }
        Some(current)
    }

    /// Walk every segment but the last and return the object that owns the last
    /// one, together with that segment.
    pub(crate) fn resolve_owner<'p>(
        root: &ObjectRef,
        path: &'p str,
    ) -> Result<(ObjectRef, &'p str), TraversalError> {
        let (parents, last) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let mut current = Value::Object(root.clone());
        for segment in parents.into_iter().flat_map(|p| p.split(PATH_SEPARATOR)) {
            let Value::Object(object) = &current else {
                return Err(TraversalError::unknown_property(
                    segment,
                    current.type_key(),
                    path,
                ));
            };
            let next = match object.get(segment) {
                None => {
                    return Err(TraversalError::unknown_property(
                        segment,
                        object.type_ref(),
                        path,
                    ));
                }
                Some(Value::Null) => {
                    return Err(TraversalError::NilIntermediate {
                        segment: segment.to_string(),
                        owner: object.type_ref().to_string(),
                        path: path.to_string(),
                    });
                }
                Some(next) => next,
            };
            current = next;
        }

        match current {
            Value::Object(owner) => Ok((owner, last)),
            other => Err(TraversalError::unknown_property(
                last,
                other.type_key(),
                path,
            )),
        }
    }

    pub(crate) fn assign(
        owner: &ObjectRef,
        segment: &str,
        value: Value,
        path: &str,
    ) -> Result<(), TraversalError> {
        owner.set(segment, value).map_err(|err| {
            let owner = owner.type_ref().to_string();
            let segment = segment.to_string();
            let path = path.to_string();
            match err {
                FieldError::Missing | FieldError::ReadOnly => TraversalError::NoSetter {
                    segment,
                    owner,
                    path,
                },
                FieldError::Rejected(rejected) => TraversalError::Rejected {
                    segment,
                    owner,
                    path,
                    found: rejected.type_key(),
                },
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/accessor.rs"]
mod tests;
