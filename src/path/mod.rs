pub(crate) mod accessor;
pub(crate) mod fields;
pub(crate) mod object;
