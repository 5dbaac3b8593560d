use colored::Colorize;
use log::{Level, LevelFilter};
use std::sync::OnceLock;

struct Logger {
  max_level: LevelFilter,
}

impl log::Log for Logger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    metadata.level() <= self.max_level
  }

  fn log(&self, record: &log::Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let time = chrono::Local::now()
      .format("%Y-%m-%d %H:%M:%S")
      .to_string()
      .magenta();

    let level = match record.level() {
      Level::Error => "ERROR".red(),
      Level::Warn => "WARN".yellow(),
      Level::Info => "INFO".green(),
      Level::Debug => "DEBUG".green(),
      Level::Trace => "TRACE".green(),
    };

    let log = format!("{} {} {} {}", time, level, record.target().cyan(), record.args());
    println!("{}", log);
  }

  fn flush(&self) {}
}

static LOGGER: OnceLock<()> = OnceLock::new();

/// Installs the console logger. The level defaults to `info` and can be
/// overridden with the `POLYBUILD_LOG` environment variable.
pub fn init_logger() {
  init_logger_with_level(level_from_env());
}

pub fn init_logger_with_level(max_level: LevelFilter) {
  if LOGGER.get().is_some() {
    return;
  }

  LOGGER.get_or_init(|| {
    log::set_boxed_logger(Box::new(Logger { max_level })).unwrap();
    log::set_max_level(max_level);
  });
}

fn level_from_env() -> LevelFilter {
  match std::env::var("POLYBUILD_LOG").as_deref() {
    Ok("off") => LevelFilter::Off,
    Ok("error") => LevelFilter::Error,
    Ok("warn") => LevelFilter::Warn,
    Ok("debug") => LevelFilter::Debug,
    Ok("trace") => LevelFilter::Trace,
    _ => LevelFilter::Info,
  }
}
