//! User-visible notifications (toasts).

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Receives notices for display.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Records notices in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Messages of every notice of `kind`.
    pub fn messages(&self, kind: NoticeKind) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Forwards notices to `tracing`: successes at info, errors at warn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::info!("{}", notice.message),
            NoticeKind::Error => tracing::warn!("{}", notice.message),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/notify.rs"]
mod tests;
