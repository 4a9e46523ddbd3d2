use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber. `RUST_LOG` takes precedence over
/// `level`; an unparseable level falls back to `info`.
///
/// Returns false if a global subscriber was already set.
pub fn init(level: &str) -> bool {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level))
		.unwrap_or_else(|_| EnvFilter::new("info"));

	fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.is_ok()
}
