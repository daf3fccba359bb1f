// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod errors; // Shared error types
pub mod utils; // Shared utilities

// Re-exports for convenience
pub use errors::{AppError, AppResult};
pub use utils::notify::{Notifier, Severity, TracingNotifier};
