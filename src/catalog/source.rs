use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    catalog::member::MemberDecl,
    types::type_info::{TypeKey, TypeRef},
};

/// Introspection facility: the members a type declares itself.
///
/// Inherited members are not reported; the catalog walks the parent chain.
pub trait MemberSource: Send + Sync {
    fn declared_members(&self, ty: &TypeRef) -> Vec<MemberDecl>;
}

impl<S: MemberSource + ?Sized> MemberSource for Arc<S> {
    fn declared_members(&self, ty: &TypeRef) -> Vec<MemberDecl> {
        (**self).declared_members(ty)
    }
}

/// Member declarations registered per type key, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct SchemaMembers {
    members: HashMap<TypeKey, Vec<MemberDecl>>,
}

impl SchemaMembers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, ty: TypeKey, member: MemberDecl) -> &mut Self {
        self.members.entry(ty).or_default().push(member);
        self
    }

    pub fn declare_all(
        &mut self,
        ty: TypeKey,
        members: impl IntoIterator<Item = MemberDecl>,
    ) -> &mut Self {
        self.members.entry(ty).or_default().extend(members);
        self
    }
}

impl MemberSource for SchemaMembers {
    fn declared_members(&self, ty: &TypeRef) -> Vec<MemberDecl> {
        self.members.get(ty.key()).cloned().unwrap_or_default()
    }
}
