//! Result sinks: where a finished round's outcome goes.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use zerotrust_core::components::AssignmentInterval;
use zerotrust_core::state::RoundOutcome;

use crate::error::AppError;

/// Accepts the outcome and action log of a terminated round.
pub trait ResultSink {
    fn submit(&mut self, outcome: &RoundOutcome, action_log: &[AssignmentInterval]) -> Result<(), AppError>;
}

/// Outcome plus action log, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub outcome: RoundOutcome,
    pub action_log: Vec<AssignmentInterval>,
}

/// Logs the outcome.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn submit(&mut self, outcome: &RoundOutcome, action_log: &[AssignmentInterval]) -> Result<(), AppError> {
        info!(
            defender_won = outcome.defender_won,
            score = outcome.score,
            cured = outcome.threats_cured,
            total = outcome.threats_total,
            destroyed = outcome.systems_destroyed,
            leaked = outcome.data_leaked,
            intervals = action_log.len(),
            "{}",
            outcome.end_reason
        );
        Ok(())
    }
}

/// Writes a [`RoundRecord`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSink for JsonFileSink {
    fn submit(&mut self, outcome: &RoundOutcome, action_log: &[AssignmentInterval]) -> Result<(), AppError> {
        let record = RoundRecord {
            outcome: outcome.clone(),
            action_log: action_log.to_vec(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        info!(path = %self.path.display(), "round record written");
        Ok(())
    }
}

/// Collects records in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<RoundRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RoundRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ResultSink for MemorySink {
    fn submit(&mut self, outcome: &RoundOutcome, action_log: &[AssignmentInterval]) -> Result<(), AppError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AppError::Sink("memory sink poisoned".into()))?;
        records.push(RoundRecord {
            outcome: outcome.clone(),
            action_log: action_log.to_vec(),
        });
        Ok(())
    }
}

/// Fan out to several sinks. Every sink is tried; the first failure is
/// returned.
impl ResultSink for Vec<Box<dyn ResultSink + Send>> {
    fn submit(&mut self, outcome: &RoundOutcome, action_log: &[AssignmentInterval]) -> Result<(), AppError> {
        let mut first_error = None;
        for sink in self.iter_mut() {
            if let Err(e) = sink.submit(outcome, action_log) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> RoundOutcome {
        RoundOutcome {
            defender_won: true,
            end_reason: "All threats neutralised before time ran out".into(),
            threats_cured: 3,
            threats_total: 3,
            systems_destroyed: 0,
            data_leaked: 0,
            score: 10_200,
            duration_ms: 42_000,
            accuracy_bps: 10_000,
        }
    }

    fn log() -> Vec<AssignmentInterval> {
        vec![AssignmentInterval {
            responder_index: 1,
            threat_index: 0,
            assigned_at_ms: 1_600,
            unassigned_at_ms: 35_000,
        }]
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let mut handle = sink.clone();
        handle.submit(&outcome(), &log()).unwrap();
        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.records()[0].action_log, log());
    }

    #[test]
    fn test_json_file_sink_writes_record() {
        let path = std::env::temp_dir().join(format!("zerotrust-outcome-{}.json", std::process::id()));
        let mut sink = JsonFileSink::new(&path);
        sink.submit(&outcome(), &log()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let record: RoundRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(record.outcome, outcome());
        assert!(text.contains("\"dev_index\": 1"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_fanout_tries_every_sink() {
        let memory = MemorySink::new();
        let mut sinks: Vec<Box<dyn ResultSink + Send>> = vec![
            Box::new(JsonFileSink::new("/nonexistent-dir/zerotrust/outcome.json")),
            Box::new(memory.clone()),
        ];
        assert!(sinks.submit(&outcome(), &log()).is_err());
        assert_eq!(memory.records().len(), 1);
    }
}
