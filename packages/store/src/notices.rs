//! User-visible notices: the uniform surface for recoverable failures and for
//! the confirmations the UI owes the user (signup done, request sent).

use crate::state::{Notifier, State};

/// Oldest notices are dropped past this many.
pub const MAX_NOTICES: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct NoticeLog {
    entries: Vec<Notice>,
    next_id: u64,
}

/// Append-only notice log shared by both controllers.
#[derive(Clone, Debug)]
pub struct Notices {
    log: State<NoticeLog>,
}

impl Notices {
    pub fn new(notifier: &Notifier) -> Self {
        Self {
            log: State::new(NoticeLog::default(), notifier),
        }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        self.log.update(|log| {
            log.next_id += 1;
            log.entries.push(Notice {
                id: log.next_id,
                level,
                message,
            });
            if log.entries.len() > MAX_NOTICES {
                let excess = log.entries.len() - MAX_NOTICES;
                log.entries.drain(..excess);
            }
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.log.update(|log| log.entries.retain(|n| n.id != id));
    }

    pub fn clear(&self) {
        self.log.update(|log| log.entries.clear());
    }

    pub fn entries(&self) -> Vec<Notice> {
        self.log.with(|log| log.entries.clone())
    }

    pub fn last(&self) -> Option<Notice> {
        self.log.with(|log| log.entries.last().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_and_cap() {
        let notices = Notices::new(&Notifier::new());
        notices.error("Login failed");
        notices.success("Request sent");

        let first = notices.entries()[0].id;
        notices.dismiss(first);
        assert_eq!(notices.entries().len(), 1);
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Success);

        for i in 0..(MAX_NOTICES + 5) {
            notices.info(format!("n{i}"));
        }
        let entries = notices.entries();
        assert_eq!(entries.len(), MAX_NOTICES);
        assert_eq!(entries.last().unwrap().message, format!("n{}", MAX_NOTICES + 4));

        notices.clear();
        assert!(notices.entries().is_empty());
    }
}
