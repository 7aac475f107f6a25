use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use daylog::config::{self, LoggerConfig};
use daylog::logging::{self, LogWriter};
use daylog::{log_debug, log_error, log_info, log_warn};

fn main() -> Result<()> {
    // Diagnostics first so directory problems during setup are visible
    logging::init_diagnostics()?;

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let config = LoggerConfig::load(&config_path)?;

    let logger = Arc::new(LogWriter::from_config(&config));
    logger.prune_old_files(config.retain_days);

    log_debug!(logger, "Loaded config from {}", config_path.display());
    log_info!(logger, "Logging to {}", logger.directory().display());
    log_warn!(logger, "Keeping {} days of logs", config.retain_days);
    log_error!(logger, "Sample error line");

    logger.close_logs_file();
    Ok(())
}
