//! Structured failure reporting.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use hookhub_core::error::{AppError, ErrorKind};

use crate::activity::ActivityLog;

/// A structured report of one failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Unique report ID.
    pub id: Uuid,
    /// Category of the underlying error.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Where the failure originated, e.g. `"user_login/send_email"`.
    pub origin: String,
    /// When the report was created.
    pub timestamp: DateTime<Utc>,
}

/// Formats failures into [`ErrorReport`]s and records them.
///
/// Configuration failures propagate to the caller of the operation that
/// raised them; hook-execution failures are swallowed at the dispatch
/// boundary. Neither is fatal to the process.
#[derive(Debug)]
pub struct ErrorReporter {
    log: Arc<ActivityLog>,
    reports: RwLock<Vec<ErrorReport>>,
    capacity: usize,
}

impl ErrorReporter {
    /// Creates a reporter retaining at most `capacity` reports (minimum 1).
    pub fn new(log: Arc<ActivityLog>, capacity: usize) -> Self {
        Self {
            log,
            reports: RwLock::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Records a failure, emitting a tracing event and an activity-log
    /// entry, and returns the structured report.
    pub fn report(&self, origin: &str, err: &AppError) -> ErrorReport {
        let report = ErrorReport {
            id: Uuid::new_v4(),
            kind: err.kind,
            message: err.message.clone(),
            origin: origin.to_string(),
            timestamp: Utc::now(),
        };

        error!(origin, kind = %err.kind, "{}", err.message);
        self.log
            .append(format!("[error] [{origin}] {}: {}", err.kind, err.message));

        let mut reports = self.reports.write();
        if reports.len() == self.capacity {
            reports.remove(0);
        }
        reports.push(report.clone());

        report
    }

    /// Snapshot of retained reports, oldest first.
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_reporter(capacity: usize) -> (Arc<ActivityLog>, ErrorReporter) {
        let log = Arc::new(ActivityLog::new(64));
        let reporter = ErrorReporter::new(Arc::clone(&log), capacity);
        (log, reporter)
    }

    #[test]
    fn test_report_is_structured() {
        let (_, reporter) = make_reporter(8);
        let err = AppError::hook_execution("boom");
        let report = reporter.report("login/audit", &err);

        assert_eq!(report.kind, ErrorKind::HookExecution);
        assert_eq!(report.message, "boom");
        assert_eq!(report.origin, "login/audit");
    }

    #[test]
    fn test_report_appends_log_entry() {
        let (log, reporter) = make_reporter(8);
        reporter.report("login/audit", &AppError::hook_execution("boom"));

        let entries = log.read();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].message.contains("HOOK_EXECUTION"));
        assert!(entries[0].message.contains("boom"));
    }

    #[test]
    fn test_reports_are_bounded() {
        let (_, reporter) = make_reporter(2);
        for i in 0..4 {
            reporter.report("origin", &AppError::internal(format!("err {i}")));
        }

        let reports = reporter.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].message, "err 2");
        assert_eq!(reports[1].message, "err 3");
    }
}
