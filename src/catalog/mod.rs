pub(crate) mod member;
pub(crate) mod properties;
pub(crate) mod source;
