use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub struct Logger {
    write_to_file: bool,
    write_to_stderr: bool,
    severity: Level,
    file: Option<Arc<Mutex<File>>>,
    enable_colors: bool,
}

impl Logger {
    /// Create a new logger
    pub fn new(
        file_path: Option<PathBuf>,
        severity: Option<Level>,
        write_to_stderr: bool,
        write_to_file: bool,
        enable_colors: bool,
    ) -> Self {
        let path = file_path.unwrap_or_else(|| PathBuf::from("tinywiki.log"));
        let mut file = None;

        if write_to_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            file = File::create(&path).ok().map(|f| Arc::new(Mutex::new(f)));
        }

        Logger {
            write_to_file,
            write_to_stderr,
            severity: severity.unwrap_or(Level::Info),
            file,
            enable_colors,
        }
    }

    fn get_timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }

    /// Get color code for log level
    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m", // Red
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Info => "\x1b[36m",  // Cyan
            Level::Debug => "\x1b[35m", // Magenta
            Level::Trace => "\x1b[37m", // White
        }
    }

    fn get_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Install as the global logger.
    ///
    /// `TINYWIKI_LOG` (falling back to `RUST_LOG`) picks the level,
    /// `TINYWIKI_LOG_FILE` names a file to mirror output into, and
    /// `NO_COLOR` turns off ANSI colors.
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("TINYWIKI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);

        let log_file = std::env::var("TINYWIKI_LOG_FILE").ok().map(PathBuf::from);
        let write_to_file = log_file.is_some();
        let enable_colors = std::env::var("NO_COLOR").is_err();

        let logger = Logger::new(
            log_file,
            Some(severity),
            true,
            write_to_file,
            enable_colors,
        );
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }

    fn format_line(&self, record: &Record, timestamp: &str, colored: bool) -> String {
        let level_str = record.level().as_str();
        let args = record.args();
        if colored {
            let color = Self::get_color(record.level());
            let reset = Self::get_reset();
            format!("{color}[{timestamp}] {level_str}{reset} {args}")
        } else {
            format!("[{timestamp}] {level_str} {args}")
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::get_timestamp();

        if self.write_to_stderr {
            let line = self.format_line(record, &timestamp, self.enable_colors);
            let _ = writeln!(std::io::stderr(), "{line}");
        }

        // File output never carries colors
        if self.write_to_file {
            if let Some(file) = &self.file {
                if let Ok(mut file_guard) = file.lock() {
                    let _ = writeln!(file_guard, "{}", self.format_line(record, &timestamp, false));
                }
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = file_guard.flush();
            }
        }
    }
}
