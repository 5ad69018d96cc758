use std::collections::VecDeque;

/// Category of an in-game log line, used by the presentation layer for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogKind {
    Info,
    Combat,
    Dialogue,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Monotonic sequence number, unique within a session.
    pub seq: u64,
    pub kind: LogKind,
    pub message: String,
}

/// Capped, most-recent-first message log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl GameLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        let entry = LogEntry {
            seq: self.next_seq,
            kind,
            message: message.into(),
        };
        self.next_seq += 1;
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogKind::Info, message);
    }

    pub fn combat(&mut self, message: impl Into<String>) {
        self.push(LogKind::Combat, message);
    }

    pub fn dialogue(&mut self, message: impl Into<String>) {
        self.push(LogKind::Dialogue, message);
    }

    pub fn system(&mut self, message: impl Into<String>) {
        self.push(LogKind::System, message);
    }

    /// Newest entry first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_entries() {
        let mut log = GameLog::with_capacity(3);
        for i in 0..5 {
            log.info(format!("line {i}"));
        }

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["line 4", "line 3", "line 2"]);
        assert_eq!(log.latest().map(|e| e.seq), Some(4));
    }
}
