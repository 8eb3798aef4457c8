//! Sinks for per-operation records.
use socialdrive_core::{FailureClass, OperationRecord, Outcome};
use tracing::{error, info, warn};

/// Receives one record for every attempted remote call, before the caller sees the result.
pub trait Reporter {
    fn record(&mut self, record: &OperationRecord);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record(&mut self, record: &OperationRecord) {
        (**self).record(record);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn record(&mut self, record: &OperationRecord) {
        (**self).record(record);
    }
}

/// Tees records into two sinks.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn record(&mut self, record: &OperationRecord) {
        self.0.record(record);
        self.1.record(record);
    }
}

/// Writes records as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn record(&mut self, record: &OperationRecord) {
        let kind = record.kind.to_string();
        let subject = &record.subject;
        match &record.outcome {
            Outcome::Succeeded(detail) => {
                info!(operation = %kind, outcome = "success", "{subject}: {detail}");
            }
            Outcome::Failed(failure) => match failure.class() {
                FailureClass::Logical => {
                    warn!(
                        operation = %kind,
                        outcome = "failure",
                        class = %failure.class(),
                        "{subject}: {failure}"
                    );
                }
                FailureClass::Status | FailureClass::Unexpected => {
                    error!(
                        operation = %kind,
                        outcome = "failure",
                        class = %failure.class(),
                        "{subject}: {failure}"
                    );
                }
            },
        }
    }
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    records: Vec<OperationRecord>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }
}

impl Reporter for MemoryReporter {
    fn record(&mut self, record: &OperationRecord) {
        self.records.push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialdrive_core::{Failure, OperationKind, StatusCode, Subject};

    fn record(outcome: Outcome) -> OperationRecord {
        OperationRecord {
            kind: OperationKind::CreateAccount,
            subject: Subject::Account {
                name: "Usuario_Rs_Alfa_000001".to_string(),
            },
            outcome,
        }
    }

    #[tracing_test::traced_test]
    #[test]
    fn tracing_reporter_logs_outcome() {
        let mut reporter = TracingReporter;
        reporter.record(&record(Outcome::Succeeded("id-1".to_string())));
        reporter.record(&record(Outcome::Failed(Failure::status(
            StatusCode::Unavailable,
            "connection refused",
        ))));

        assert!(logs_contain("id-1"));
        assert!(logs_contain("UNAVAILABLE: connection refused"));
    }

    #[test]
    fn tee_reaches_both_sinks() {
        let mut first = MemoryReporter::new();
        let mut second = MemoryReporter::new();
        {
            let mut tee = (&mut first, &mut second);
            tee.record(&record(Outcome::Succeeded("id-1".to_string())));
        }
        assert_eq!(first.records().len(), 1);
        assert_eq!(first.records(), second.records());
    }
}
