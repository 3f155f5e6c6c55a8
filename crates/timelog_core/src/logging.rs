//! Process-wide logging for the timelog server.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend once, writing rotated files under a
//!   log directory or plain stderr.
//! - Route panics through the logger so request-thread crashes are kept.
//!
//! # Invariants
//! - A second `init_logging` call with the same settings is a no-op; any
//!   different settings are refused rather than silently ignored.
//! - Nothing here panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const FILE_BASENAME: &str = "timelog";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_MESSAGE_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Rotated `timelog*.log` files under an absolute directory.
    Directory(PathBuf),
    Stderr,
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory(dir) => write!(f, "{}", dir.display()),
            Self::Stderr => write!(f, "stderr"),
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDirectory(PathBuf),
    CreateDirectory { dir: PathBuf, source: std::io::Error },
    /// Logging is already running with other settings.
    Conflict {
        active: (LevelFilter, LogTarget),
        requested: (LevelFilter, LogTarget),
    },
    Backend(flexi_logger::FlexiLoggerError),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; use trace, debug, info, warn or error"
            ),
            Self::RelativeDirectory(dir) => {
                write!(f, "log directory `{}` must be absolute", dir.display())
            }
            Self::CreateDirectory { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Conflict { active, requested } => write!(
                f,
                "logging already runs at {} to {}; refusing to switch to {} to {}",
                active.0, active.1, requested.0, requested.1
            ),
            Self::Backend(err) => write!(f, "logger backend failed: {err}"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

struct ActiveLogger {
    level: LevelFilter,
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Starts logging at `level`; rotated files under `log_dir` when given,
/// stderr otherwise.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let target = match log_dir {
        Some(dir) if dir.is_absolute() => LogTarget::Directory(dir.to_path_buf()),
        Some(dir) => return Err(LoggingError::RelativeDirectory(dir.to_path_buf())),
        None => LogTarget::Stderr,
    };

    let active = ACTIVE.get_or_try_init(|| {
        let handle = start_backend(level, &target)?;
        install_panic_hook();
        info!(
            "event=logging_start module=core status=ok level={level} target={target} version={}",
            env!("CARGO_PKG_VERSION")
        );
        Ok::<_, LoggingError>(ActiveLogger {
            level,
            target: target.clone(),
            _handle: handle,
        })
    })?;

    if active.level != level || active.target != target {
        return Err(LoggingError::Conflict {
            active: (active.level, active.target.clone()),
            requested: (level, target),
        });
    }
    Ok(())
}

/// Level and target of the running logger, `None` before `init_logging`.
pub fn logging_status() -> Option<(LevelFilter, LogTarget)> {
    ACTIVE.get().map(|active| (active.level, active.target.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = level.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    match trimmed.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(LoggingError::UnknownLevel(trimmed.to_string())),
        Ok(parsed) => Ok(parsed),
    }
}

fn start_backend(level: LevelFilter, target: &LogTarget) -> Result<LoggerHandle, LoggingError> {
    let logger = Logger::with(LogSpecification::builder().default(level).build());
    let logger = match target {
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                dir: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .append()
                .write_mode(WriteMode::BufferAndFlush)
                .format_for_files(flexi_logger::detailed_format)
        }
        LogTarget::Stderr => logger.log_to_stderr().format(flexi_logger::detailed_format),
    };
    logger.start().map_err(LoggingError::Backend)
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=core status=error location={location} payload={}",
            one_line(&payload, PANIC_MESSAGE_LIMIT)
        );
        previous(info);
    }));
}

/// Flattens `value` to one line of at most `limit` chars; panic payloads can
/// carry submitted form text.
fn one_line(value: &str, limit: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut cut: String = flat.chars().take(limit).collect();
    cut.push_str("...");
    cut
}
