pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod logger;
pub mod store;

// Re-export the collaborator-facing surface
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use entry::CaptionEntry;
pub use error::{LogError, Result};
pub use logger::CaptionLogger;
pub use store::LogStore;
