pub(crate) mod bridge;
pub(crate) mod descriptor;
pub(crate) mod registry;
pub(crate) mod type_info;
