use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr. `RUST_LOG` takes
/// precedence over `level`. A second call leaves the first subscriber in place.
pub fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    match result {
        Ok(()) => info!("Logging initialized"),
        Err(e) => debug!("Logging already initialized: {}", e),
    }
}
