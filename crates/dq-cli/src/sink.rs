//! Replays audit entries through `tracing`.
//!
//! The cleaning core only records what it did. This module is where those
//! records become log events, so they reach the console and the log file
//! with the same severity the core assigned.

use dq_model::{AuditEntry, Severity, ValueChange};

use crate::logging::redact_value;

/// Target every replayed audit event is logged under.
pub const AUDIT_TARGET: &str = "dq_cli::audit";

macro_rules! audit_event {
    ($level:expr, $entry:expr, $change:expr) => {
        tracing::event!(
            target: AUDIT_TARGET,
            $level,
            stage = %$entry.stage,
            kind = ?$entry.kind,
            column = $entry.column.as_deref(),
            row = $entry.row,
            affected = $entry.affected,
            change = $change,
            "{}",
            $entry.message
        )
    };
}

/// Log every entry in order.
pub fn emit_audit(entries: &[AuditEntry]) {
    for entry in entries {
        emit_entry(entry);
    }
}

pub fn emit_entry(entry: &AuditEntry) {
    let change = entry.change.as_ref().map(describe_change);
    let change = change.as_deref();
    match entry.severity {
        Severity::Debug => audit_event!(tracing::Level::DEBUG, entry, change),
        Severity::Info => audit_event!(tracing::Level::INFO, entry, change),
        Severity::Warning => audit_event!(tracing::Level::WARN, entry, change),
        Severity::Error => audit_event!(tracing::Level::ERROR, entry, change),
    }
}

/// `before -> after`, with both values redacted unless data logging is on.
pub fn describe_change(change: &ValueChange) -> String {
    let before = change.before.to_string();
    let after = change.after.to_string();
    format!("{} -> {}", redact_value(&before), redact_value(&after))
}
