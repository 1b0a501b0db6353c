use anyhow::{anyhow, Result};
use twyg::{LogLevel, OptsBuilder};
use verso_etl::LoggingConfig;

/// Install twyg as the logger, from the `[logging]` section.
pub fn init(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        parse_level(logging.level())?
    };

    let opts = OptsBuilder::new()
        .coloured(logging.coloured())
        .level(level)
        .build()
        .map_err(|e| anyhow!("Invalid logging options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow!("Could not set up logger: {e:?}"))?;
    Ok(())
}

fn parse_level(level: &str) -> Result<LogLevel> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        other => Err(anyhow!(
            "Unknown log level {other:?} (expected trace, debug, info, warn, or error)"
        )),
    }
}
