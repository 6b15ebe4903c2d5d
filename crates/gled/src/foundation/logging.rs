//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Default filter applied when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system
///
/// Honours `RUST_LOG` and falls back to [`DEFAULT_FILTER`]. Calling it more
/// than once is harmless; later calls are ignored.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize the logging system with an explicit fallback filter
pub fn init_with_filter(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::trace!("Logger already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init_with_filter("debug");
        info!("logger survives a second init");
    }
}
