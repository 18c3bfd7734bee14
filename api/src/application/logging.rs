use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Installs the global tracing subscriber. `RUST_LOG` wins over `--log-filter`.
pub fn init_logger(args: &LogArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
