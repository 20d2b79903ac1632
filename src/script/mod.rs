pub(crate) mod model;
pub(crate) mod repair;
pub(crate) mod text;
