use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: LogLevel,
    /// Forces the file log to DEBUG and echoes INFO to stdout.
    pub verbose: bool,
    pub log_path: PathBuf,
    pub json: bool,
}

impl LogOptions {
    pub fn file_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            self.level.into()
        }
    }
}

/// `<log_path>/<command>_<timestamp>.log`
pub fn log_file_path(log_path: &Path, command: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S%6f");
    log_path.join(format!("{}_{}.log", command, stamp))
}

/// Install the global subscriber. Returns the log file in use.
pub fn init(options: &LogOptions, command: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(&options.log_path)
        .with_context(|| format!("Failed to create log directory {:?}", options.log_path))?;

    let path = log_file_path(&options.log_path, command);
    let file = File::create(&path).with_context(|| format!("Failed to create log file {:?}", path))?;

    let file_layer: Box<dyn Layer<Registry> + Send + Sync> = if options.json {
        fmt::layer().json().with_writer(Mutex::new(file)).boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .boxed()
    };

    let stdout_layer = options.verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_filter(LevelFilter::INFO)
    });

    tracing_subscriber::registry()
        .with(file_layer.with_filter(options.file_level()))
        .with(stdout_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(path)
}
