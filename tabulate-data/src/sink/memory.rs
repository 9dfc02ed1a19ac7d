use tabulate_core::ShapedRecord;

use super::{SinkError, TabularSink};

/// Keeps shaped records in memory, in arrival order.
///
/// Useful for tests and for callers that post-process rows themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    records: Vec<ShapedRecord>,
    finished: bool,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            finished: false,
        }
    }

    /// Records received so far.
    #[must_use]
    pub fn records(&self) -> &[ShapedRecord] {
        &self.records
    }

    /// Whether [`TabularSink::finish`] has been called.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take ownership of the collected records.
    #[must_use]
    pub fn into_records(self) -> Vec<ShapedRecord> {
        self.records
    }
}

impl TabularSink for MemorySink {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
