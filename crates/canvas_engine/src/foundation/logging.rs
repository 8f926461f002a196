//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use crate::core::config::EngineConfig;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level
///
/// `RUST_LOG` still wins when it is set. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}

/// Initialize the logging system from the engine configuration
pub fn init_from_config(config: &EngineConfig) {
    init_with_level(&config.log_level);
}
