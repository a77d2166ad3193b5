//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against a [`Library`](crate::Library).

pub mod backup;
pub mod filter;
pub mod references;
pub mod settings;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use filter::execute as filter;
pub use settings::execute as settings;
pub use tag::execute as tag;
pub use tag::untag;
pub use tags::execute as tags;
