use log::{debug, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the `env_logger` backend. Later calls are no-ops, so tests and
/// `bootstrap` can both call it.
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .filter_module("anicatalog_lib", log::LevelFilter::Debug)
            .filter_module("diesel", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Catalog logging initialized");
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log database operations
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("DB: {} on {} completed in {}ms", operation, table, duration),
            None => debug!("DB: Starting {} on {}", operation, table),
        }
    }

    /// Log storage operations
    pub fn storage_operation(operation: &str, reference: &str, outcome: Result<(), &str>) {
        match outcome {
            Ok(()) => debug!("Storage: {} {} ok", operation, reference),
            Err(reason) => warn!("Storage: {} {} failed: {}", operation, reference, reason),
        }
    }

    /// Log the outcome of a media set reconciliation
    pub fn reconciliation_summary(owner: &str, created: usize, deleted: usize, failures: usize) {
        if failures > 0 {
            warn!(
                "Media: {} reconciled with partial failure (+{} -{} !{})",
                owner, created, deleted, failures
            );
        } else {
            info!("Media: {} reconciled (+{} -{})", owner, created, deleted);
        }
    }

    fn elapsed(operation: &str, duration_ms: u64, detail: Option<&str>) {
        match detail {
            Some(detail) => info!("Timing: {} took {}ms ({})", operation, duration_ms, detail),
            None => info!("Timing: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Logs how long a unit of work took once finished
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::elapsed(&self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::elapsed(&self.operation, duration, Some(info));
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_is_idempotent() {
        init_logger();
        init_logger();
    }

    #[test]
    fn test_timed_operation_reports_elapsed_millis() {
        let timer = TimedOperation::new("noop");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.finish_with_info("slept") >= 5);
    }
}
