use std::sync::Once;
use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the logging system.
/// This should be called once at application startup.
pub fn init_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default level, more verbose for our crate, reduce HTTP and
            // runtime noise.
            EnvFilter::new("info,tokenscope=debug,reqwest=warn,hyper=warn,tokio=warn")
        });

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();

        info!("Logging system initialized");
    });
}
