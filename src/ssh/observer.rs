// 会话事件输出
use log::{error, info};

/// Receives the outcome of every session operation.
pub trait SessionObserver {
    fn info(&self, message: &str);
    fn error(&self, message: &str, detail: &str);
}

/// Forwards session events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str, detail: &str) {
        if detail.is_empty() {
            error!("{}", message);
        } else {
            error!("{} ({})", message, detail);
        }
    }
}
