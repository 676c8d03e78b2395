use std::process::ExitCode;

use feed_membership::{
    errors::{AppError, error_report},
    init_logging, run_from,
};

/// Main entry point for the `add_user` binary.
///
/// Exits 0 on success (including when the DID is already listed), 1 on any
/// usage, resolution or file error.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    match run_from(std::env::args_os()).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(AppError::Usage(err)) => {
            // --help and --version come through here too
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{}", error_report(&err));
            ExitCode::FAILURE
        }
    }
}
