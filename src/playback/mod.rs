pub(crate) mod listeners;
pub(crate) mod scheduler;
pub(crate) mod state;
pub(crate) mod timeline;
