use std::path::PathBuf;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};

const APP_NAME: &str = "gas-meter";

/// Returns the appropriate log directory for the current OS, using the app name.
pub fn get_log_directory() -> PathBuf {
    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_NAME);
    }
    // Fallback to home directory if data_dir is not available
    if let Some(home) = dirs::home_dir() {
        return home.join(format!(".{}", APP_NAME));
    }
    PathBuf::from(".")
}

/// Starts a rotating file logger in the app data directory.
/// Keeps at most 5 log files, each up to 1 MB. Warnings and errors also go to stderr.
///
/// The returned handle must stay alive for as long as logging is wanted.
pub fn init_logging(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    let log_dir = get_log_directory();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
    }

    Logger::try_with_str(level)?
        .log_to_file(FileSpec::default()
            .directory(log_dir)
            .basename(APP_NAME)
            .suffix("log"))
        .rotate(
            Criterion::Size(1_000_000), // 1 MB per file
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .start()
}
