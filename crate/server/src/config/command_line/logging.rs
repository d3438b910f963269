use clap::Args;

#[derive(Debug, Default, Args, Clone)]
pub struct LoggingConfig {
    /// An alternative to setting the `RUST_LOG` environment variable.
    /// Setting this variable will override the `RUST_LOG` environment variable
    #[clap(long, env("SEATRACE_RUST_LOG"), verbatim_doc_comment)]
    pub rust_log: Option<String>,
}
