// src/messaging.rs
use log::info;

use crate::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Text,
    Html,
}

/// Outbound chat transport. Fire and forget: delivery is never confirmed.
pub trait Messenger: Send + Sync {
    /// Announce to the whole chat.
    fn broadcast(&self, format: MessageFormat, text: &str);
    /// Message a single user directly.
    fn send_private(&self, recipient: &UserId, text: &str);
}

/// Messenger that writes to the process log, used when no chat transport
/// is attached.
pub struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    fn broadcast(&self, format: MessageFormat, text: &str) {
        info!("broadcast [{:?}]: {}", format, text);
    }

    fn send_private(&self, recipient: &UserId, text: &str) {
        info!("private to {}: {}", recipient, text);
    }
}
