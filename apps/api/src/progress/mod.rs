// Saved roadmap progress: the per-user document store and the completion
// statistics derived from it.

pub mod handlers;
pub mod store;
pub mod summary;
