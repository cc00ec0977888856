//! User-visible notifications.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Danger,
}

pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => log::info!("[farm] {}", message),
            NoticeLevel::Warning => log::warn!("[farm] {}", message),
            NoticeLevel::Danger => log::error!("[farm] {}", message),
        }
    }
}
