//! The developer log: a capped, append-only sequence of timestamped entries shown in the
//! system terminal, plus the label extraction used by click capture.

use crate::constants::{CLICK_LABEL_MAX_CHARS, MAX_LOG_ENTRIES};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// Severity/category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Warn,
    Error,
    /// Captured user interaction
    Event,
    /// Echo of a submitted terminal command
    Cmd,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Event => "event",
            Self::Cmd => "cmd",
        }
    }

    fn level(self) -> log::Level {
        match self {
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
            Self::Info | Self::Event | Self::Cmd => log::Level::Info,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the developer log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: Uuid,
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
    pub source: String,
    pub message: String,
    pub kind: LogKind,
}

impl LogEntry {
    /// Separator shown between the source and the message; commands read like a prompt.
    pub fn separator(&self) -> char {
        if self.kind == LogKind::Cmd {
            '>'
        } else {
            ':'
        }
    }
}

/// Capped log sequence; the oldest entries are evicted first.
#[derive(Debug, Clone, Default)]
pub struct SystemLog {
    entries: VecDeque<LogEntry>,
}

impl SystemLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a timestamped entry and evicts from the front beyond the capacity.
    ///
    /// The entry is mirrored to the `log` facade under the `devlog` target.
    pub fn append(&mut self, source: impl Into<String>, message: impl Into<String>, kind: LogKind) {
        let entry = LogEntry {
            id: Uuid::new_v4(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            source: source.into(),
            message: message.into(),
            kind,
        };
        log::log!(target: "devlog", kind.level(), "[{}] {}: {}", kind, entry.source, entry.message);

        self.entries.push_back(entry);
        while self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

/// What a click landed on, as registered by the widget that drew it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// Visible text of the widget
    pub text: Option<String>,
    /// Stable widget name
    pub id: Option<String>,
    /// Widget kind, e.g. `button` or `card`
    pub class: Option<String>,
}

impl ClickTarget {
    /// Best-effort label: visible text, else id, else class, else `Unknown`.
    ///
    /// Newlines are collapsed to spaces and the result is cut to
    /// [`CLICK_LABEL_MAX_CHARS`] characters.
    pub fn describe(&self) -> String {
        let raw = [&self.text, &self.id, &self.class]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown");
        click_label(raw)
    }
}

/// Normalizes a label for the click log.
pub fn click_label(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(CLICK_LABEL_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_stamps_entries() {
        let mut log = SystemLog::new();
        log.append("SYSTEM", "Boot sequence complete", LogKind::Info);
        let entry = log.last().expect("entry appended");
        assert_eq!(entry.source, "SYSTEM");
        assert_eq!(entry.kind, LogKind::Info);
        assert_eq!(entry.timestamp.len(), 8);
        assert_eq!(entry.timestamp.matches(':').count(), 2);
    }

    #[test]
    fn keeps_only_most_recent_hundred_in_order() {
        let mut log = SystemLog::new();
        for i in 0..105 {
            log.append("TEST", format!("entry {i}"), LogKind::Info);
        }
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        let messages: Vec<_> = log.entries().map(|e| e.message.clone()).collect();
        assert_eq!(messages.first().map(String::as_str), Some("entry 5"));
        assert_eq!(messages.last().map(String::as_str), Some("entry 104"));
        assert!(messages.windows(2).all(|w| {
            let n = |s: &str| s.trim_start_matches("entry ").parse::<u32>().unwrap_or(0);
            n(&w[0]) + 1 == n(&w[1])
        }));
    }

    #[test]
    fn entry_ids_are_unique() {
        let mut log = SystemLog::new();
        log.append("A", "one", LogKind::Info);
        log.append("A", "two", LogKind::Info);
        let ids: Vec<_> = log.entries().map(|e| e.id).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn clear_empties_log() {
        let mut log = SystemLog::new();
        log.append("A", "one", LogKind::Warn);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn click_label_prefers_text_then_id_then_class() {
        let full = ClickTarget {
            text: Some("Dashboard".into()),
            id: Some("nav-dashboard".into()),
            class: Some("button".into()),
        };
        assert_eq!(full.describe(), "Dashboard");

        let no_text = ClickTarget {
            text: Some("   ".into()),
            ..full.clone()
        };
        assert_eq!(no_text.describe(), "nav-dashboard");

        let class_only = ClickTarget {
            class: Some("card".into()),
            ..Default::default()
        };
        assert_eq!(class_only.describe(), "card");
        assert_eq!(ClickTarget::default().describe(), "Unknown");
    }

    #[test]
    fn click_label_is_truncated_and_single_line() {
        let target = ClickTarget {
            text: Some("Central Processing\nUnit detail".into()),
            ..Default::default()
        };
        let label = target.describe();
        assert_eq!(label, "Central Process");
        assert!(label.chars().count() <= CLICK_LABEL_MAX_CHARS);
        assert!(!click_label("a\nb\r\nc").contains('\n'));
    }

    #[test]
    fn command_entries_use_prompt_separator() {
        let mut log = SystemLog::new();
        log.append("USER", "help", LogKind::Cmd);
        assert_eq!(log.last().map(LogEntry::separator), Some('>'));
    }
}
