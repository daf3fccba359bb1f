use tracing::{info, warn};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Negative,
    Positive,
    Info,
}

/// Outbound seam for user-facing messages.
///
/// The pipeline never renders UI; validation failures and other
/// user-visible events go through this trait with fixed message strings.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Default notifier that writes notifications to the tracing log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Negative => warn!("{}", message),
            Severity::Positive | Severity::Info => info!("{}", message),
        }
    }
}
