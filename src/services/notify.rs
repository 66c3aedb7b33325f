use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// Fire-and-forget outcome signal toward whatever surface is listening.
/// The core never depends on the sink's implementation.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, message: &str, level: Level);
}

/// Default sink: outcomes go to the log stream.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, message: &str, level: Level) {
        match level {
            Level::Error => tracing::error!(target: "outcome", "{message}"),
            Level::Warning => tracing::warn!(target: "outcome", "{message}"),
            _ => tracing::info!(target: "outcome", level = level.as_str(), "{message}"),
        }
    }
}
