use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Creates the loading indicator shown while a request is in flight.
///
/// The spinner ticks on its own until the caller finishes it. Nothing is drawn when
/// stderr is not a terminal.
///
/// # Example
///
/// ```no_run
/// use pliego_cli::ui;
///
/// # fn main() -> Result<(), pliego_cli::errors::AppError> {
/// let spinner = ui::create_spinner("Generando pliego...")?;
/// spinner.finish_and_clear();
/// # Ok(())
/// # }
/// ```
pub fn create_spinner(message: &str) -> AppResult<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| AppError::IoError(format!("Failed to create spinner template: {e}")))?,
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or `debug` when
/// `verbose` is on.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pliego_cli=debug,info"
    } else {
        "pliego_cli=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
