//! Append-only output sinks of the expansion pass

use crate::branch::{JournalEntry, ResultRecord};
use crate::error::BranchResult;

/// Receives provenance journal entries as the scan produces them
pub trait JournalSink {
    /// Append one entry; a failure aborts the pass
    fn record(&mut self, entry: JournalEntry) -> BranchResult<()>;
}

/// Receives the expanded scope records after a successful scan
pub trait ScopeSink {
    /// Append one record; a failure aborts the pass
    fn write(&mut self, record: &ResultRecord) -> BranchResult<()>;
}

impl JournalSink for Vec<JournalEntry> {
    fn record(&mut self, entry: JournalEntry) -> BranchResult<()> {
        self.push(entry);
        Ok(())
    }
}

impl ScopeSink for Vec<ResultRecord> {
    fn write(&mut self, record: &ResultRecord) -> BranchResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<T: JournalSink + ?Sized> JournalSink for &mut T {
    fn record(&mut self, entry: JournalEntry) -> BranchResult<()> {
        (**self).record(entry)
    }
}

impl<T: ScopeSink + ?Sized> ScopeSink for &mut T {
    fn write(&mut self, record: &ResultRecord) -> BranchResult<()> {
        (**self).write(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::JournalCode;
    use uuid::Uuid;

    fn drain<S: ScopeSink>(mut sink: S, records: &[ResultRecord]) {
        for record in records {
            sink.write(record).unwrap();
        }
    }

    #[test]
    fn test_vec_sinks_append_in_order() {
        let record = ResultRecord {
            identity: Uuid::from_u128(1),
            origin_module: Uuid::from_u128(2),
            depth: 0,
            label: Some("a".into()),
        };
        let mut scopes: Vec<ResultRecord> = Vec::new();
        drain(&mut scopes, &[record.clone(), record.clone()]);
        assert_eq!(scopes, vec![record.clone(), record]);

        let mut journal: Vec<JournalEntry> = Vec::new();
        let entry = JournalEntry::new(JournalCode::InstanceRoot, Uuid::from_u128(1));
        (&mut journal).record(entry).unwrap();
        assert_eq!(journal, vec![entry]);
    }
}
