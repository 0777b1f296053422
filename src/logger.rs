use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Configures `env_logger` once per process. `RUST_LOG` overrides the defaults.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("addrquota::cs", LevelFilter::Warn)
            .filter_module("addrquota::quota", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // A test harness or embedding binary may already have installed a logger.
        let _ = builder.try_init();
    });
}
