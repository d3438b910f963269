use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_INIT: Once = Once::new();

/// Initialise the global tracing subscriber once per process.
///
/// `RUST_LOG` wins when it is set; otherwise `default_value` is used as the
/// filter directive. Passing `None` with no `RUST_LOG` keeps the
/// `tracing-subscriber` default (errors only).
///
/// Logs are written to stderr so that command line tools keep stdout for
/// their own output.
pub fn log_init(default_value: Option<&str>) {
    LOG_INIT.call_once(|| {
        if std::env::var("RUST_BACKTRACE").is_err() {
            unsafe {
                std::env::set_var("RUST_BACKTRACE", "1");
            }
        }

        if std::env::var("RUST_LOG").is_err() {
            if let Some(default_value) = default_value {
                unsafe {
                    std::env::set_var("RUST_LOG", default_value);
                }
            }
        }

        tracing_setup();
    });
}

fn tracing_setup() {
    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .compact();

    // `try_init` so that a subscriber installed by a test harness is not an error
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(format)
        .try_init();
}
