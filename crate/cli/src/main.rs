use std::process;

use clap::{Parser, error::ErrorKind};
use seatrace_cli::{
    actions::export_jwks::ExportJwksAction,
    error::{CliError, result::CliResult},
};
use seatrace_logger::log_init;

fn main() {
    // Logs go to stderr, stdout only carries the summary
    log_init(Some("warn"));

    if let Some(err) = main_().err() {
        eprintln!("ERROR: {err}");
        for hint in err.hints() {
            eprintln!("{hint}");
        }
        process::exit(err.exit_code());
    }
}

fn main_() -> CliResult<()> {
    let action = match ExportJwksAction::try_parse() {
        Ok(action) => action,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return Err(CliError::Usage(e.render().to_string())),
    };

    let summary = action.run()?;
    println!("{summary}");
    Ok(())
}
