pub mod logger;
pub mod notify;

pub use logger::init_logger;
pub use notify::{Notifier, Severity, TracingNotifier};
