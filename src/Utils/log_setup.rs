use crate::taylor::settings::ExpansionSettings;
use crate::taylor::taylor_errors::{TaylorError, TaylorResult};
use chrono::Local;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// "debug" | "info" | "warn" | "error" | "off" | "none"
pub fn level_from_str(loglevel: &str) -> TaylorResult<LevelFilter> {
    match loglevel {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(TaylorError::Config(format!("unknown log level '{}'", other))),
    }
}

/// e.g. taylor_2026-10-14_12-30-00.log
pub fn timestamped_log_name(prefix: &str) -> String {
    format!("{}_{}.log", prefix, Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

/// Terminal logger, plus a file logger when `log_file` is given.
/// Defaults to info. A global logger that is already set is left in place.
pub fn init_logging(loglevel: Option<&str>, log_file: Option<&str>) -> TaylorResult<()> {
    let level = match loglevel {
        Some(loglevel) => level_from_str(loglevel)?,
        None => LevelFilter::Info,
    };
    if level == LevelFilter::Off {
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(filename) = log_file {
        let file = File::create(filename)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

pub fn init_logging_from_settings(settings: &ExpansionSettings) -> TaylorResult<()> {
    init_logging(settings.loglevel.as_deref(), None)
}
