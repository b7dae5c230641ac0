use arrayvec::ArrayVec;
use tracing::warn;

pub const LOG_CAPACITY: usize = 50;

/// Append-only battle report. Records past capacity are dropped.
#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    entries: ArrayVec<String, LOG_CAPACITY>,
    dropped: usize,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: impl Into<String>) {
        if self.entries.try_push(entry.into()).is_err() {
            if self.dropped == 0 {
                warn!(capacity = LOG_CAPACITY, "battle log full; dropping further records");
            }
            self.dropped += 1;
        }
    }

    /// Non-empty entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str).filter(|e| !e.is_empty())
    }

    pub fn report(&self) -> Vec<String> {
        self.entries().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// How many records were turned away at capacity.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_entries_are_kept_but_not_reported() {
        let mut log = BattleLog::new();
        log.record("first");
        log.record("");
        log.record("third");
        assert_eq!(log.len(), 3);
        assert_eq!(log.report(), vec!["first", "third"]);
    }

    #[test]
    fn dropped_records_are_counted() {
        let mut log = BattleLog::new();
        for i in 0..LOG_CAPACITY + 3 {
            log.record(format!("event {i}"));
        }
        assert!(log.is_full());
        assert_eq!(log.dropped(), 3);
    }
}
