use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::submitter::{ActionKind, ActionStatus};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short message shown to the user (toast).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Receives user-facing notices and action status changes.
pub trait NoticeSink {
    fn notify(&self, notice: Notice);

    fn status_changed(&self, _kind: ActionKind, _status: ActionStatus) {}
}

impl<T: NoticeSink + ?Sized> NoticeSink for Rc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }

    fn status_changed(&self, kind: ActionKind, status: ActionStatus) {
        (**self).status_changed(kind, status)
    }
}

/// Sends notices to the tracing subscriber only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => warn!(title = %notice.title, "{}", notice.description),
            _ => info!(title = %notice.title, "{}", notice.description),
        }
    }
}

/// Keeps every notice and status change in memory for a UI layer to drain.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
    transitions: RefCell<Vec<(ActionKind, ActionStatus)>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain(..).collect()
    }

    /// Status changes of one action, oldest first.
    pub fn transitions(&self, kind: ActionKind) -> Vec<ActionStatus> {
        self.transitions
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, status)| *status)
            .collect()
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn status_changed(&self, kind: ActionKind, status: ActionStatus) {
        self.transitions.borrow_mut().push((kind, status));
    }
}
