//! Trait definitions for the collaborators of the expansion pass

pub mod identity;
pub mod sink;

// Re-export all types
pub use identity::{IdentitySource, ModelIdentities, SequentialIdentities};
pub use sink::{JournalSink, ScopeSink};
