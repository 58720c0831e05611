use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    foundation::value::Value,
    types::type_info::TypeRef,
};

/// Why an object refused a field assignment.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// No field (or alias) with that name.
    #[error("no such field")]
    Missing,
    /// The field exists but has no setter.
    #[error("field is read-only")]
    ReadOnly,
    /// The setter does not store values of this kind. The value is handed
    /// back untouched; its type is only inspected once the owner is unlocked.
    #[error("field rejected a value of type `{}`", .0.type_key())]
    Rejected(Value),
}

/// Named member access implemented by every bindable domain object.
///
/// `get` returns `None` when the object has no such member and `Some(Value::Null)`
/// when the member exists but is nil. Implementations usually delegate both
/// methods to a [`crate::FieldTable`].
pub trait Reflect: Send + Sync {
    /// Registered type of this object.
    fn type_ref(&self) -> TypeRef;

    /// Read a member by name.
    fn get(&self, name: &str) -> Option<Value>;

    /// Assign a member by name. No coercion is performed.
    fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError>;
}

/// Shared, interior-mutable handle to a reflected object.
///
/// Object graphs are built from these handles, so a path traversal can reach
/// and mutate a nested object without owning the root.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<dyn Reflect>>);

impl ObjectRef {
    pub fn new<T: Reflect + 'static>(object: T) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    pub fn type_ref(&self) -> TypeRef {
        self.read().type_ref()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name)
    }

    /// Assign through the object's setter. The write lock is released before
    /// this returns, so the error can be inspected freely.
    pub fn set(&self, name: &str, value: Value) -> Result<(), FieldError> {
        let mut object = self.write();
        object.set(name, value)
    }

    /// Identity comparison: true when both handles point at the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // A panic inside a setter leaves the object in whatever state the setter
    // reached; reads and writes keep working on that state.
    fn read(&self) -> RwLockReadGuard<'_, dyn Reflect + 'static> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, dyn Reflect + 'static> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Ok(object) => write!(f, "ObjectRef(<{}>)", object.type_ref()),
            Err(_) => f.write_str("ObjectRef(<locked>)"),
        }
    }
}
