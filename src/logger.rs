//! Logging setup and batch progress reporting.

use std::io::Write;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

/// Install the `env_logger` backend with a colored `[HH:MM:SS] LEVEL: message` format.
///
/// `RUST_LOG` is read first; `level` applies to this crate on top of it.
pub fn init_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("roach", level);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);

    builder.format(|buf, record| {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let tag = format!("[{}] {}", timestamp, record.level());
        let tag = match record.level() {
            log::Level::Error => tag.red(),
            log::Level::Warn => tag.yellow(),
            log::Level::Info => tag.cyan(),
            log::Level::Debug | log::Level::Trace => tag.dimmed(),
        };
        writeln!(buf, "{}: {}", tag, record.args())
    });

    // Already installed is fine (tests, repeated calls).
    let _ = builder.try_init();
}

/// Receives events from a batch run.
pub trait BatchReporter {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    /// Called after each subnet; `current` is 1-based.
    fn progress(&self, current: usize, total: usize, subnet: &str);
}

/// Rounded completion percentage; an empty batch counts as complete.
pub fn percent(current: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((current as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

/// Text bar used in progress log lines, e.g. `[█████░░░░░░░░░░░░░░░]`.
pub fn progress_bar(percentage: u8, width: usize) -> String {
    let filled = ((f64::from(percentage) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Logs through `log` and drives an `indicatif` bar on stderr.
pub struct ConsoleReporter {
    bar: ProgressBar,
}

impl ConsoleReporter {
    pub fn new(total: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        };
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BatchReporter for ConsoleReporter {
    fn info(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
    }

    fn warn(&self, message: &str) {
        self.bar.suspend(|| log::warn!("{}", message));
    }

    fn error(&self, message: &str) {
        self.bar.suspend(|| log::error!("{}", message));
    }

    fn progress(&self, current: usize, total: usize, subnet: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(subnet.to_string());
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::sync::Mutex;

    use super::BatchReporter;

    /// Keeps every event for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingReporter {
        pub(crate) events: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        pub(crate) fn lines(&self, prefix: &str) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.starts_with(prefix))
                .cloned()
                .collect()
        }
    }

    impl BatchReporter for RecordingReporter {
        fn info(&self, message: &str) {
            self.events.lock().unwrap().push(format!("INFO {}", message));
        }

        fn warn(&self, message: &str) {
            self.events.lock().unwrap().push(format!("WARN {}", message));
        }

        fn error(&self, message: &str) {
            self.events.lock().unwrap().push(format!("ERROR {}", message));
        }

        fn progress(&self, current: usize, total: usize, subnet: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("PROGRESS {}/{} {}", current, total, subnet));
        }
    }
}
