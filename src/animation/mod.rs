pub(crate) mod color;
pub(crate) mod ease;
pub(crate) mod keyframes;
pub(crate) mod legacy;
pub(crate) mod spatial;
