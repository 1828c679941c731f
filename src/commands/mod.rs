//! Command implementations
//!
//! Session-level operations behind the two binaries: content generation,
//! delivery, and the fixed daily schedules.

pub mod generate;
pub mod publish;
pub mod schedule;

// Re-export commonly used types
pub use generate::Session;
pub use publish::{BulkReport, Publisher};
pub use schedule::{Mode, Runner};
