use chrono::{DateTime, Utc};
use hostel_platform_shared::{NotificationLevel, MAX_RETAINED_NOTIFICATIONS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// A user-facing toast/alert entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// In-memory notification center with read/unread state.
///
/// Constructed explicitly and injected into the services that emit
/// notifications; lifecycle is owned by the application, not module load.
#[derive(Clone)]
pub struct NotificationCenter {
    entries: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn push(&self, level: NotificationLevel, title: &str, message: &str) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            title: title.to_string(),
            message: message.to_string(),
            read: false,
            created_at: Utc::now(),
        };
        let id = notification.id;

        let mut entries = self.entries.write().await;
        entries.insert(0, notification);
        entries.truncate(MAX_RETAINED_NOTIFICATIONS);
        debug!("Queued {} notification: {}", level, title);
        id
    }

    pub async fn success(&self, title: &str, message: &str) -> Uuid {
        self.push(NotificationLevel::Success, title, message).await
    }

    pub async fn info(&self, title: &str, message: &str) -> Uuid {
        self.push(NotificationLevel::Info, title, message).await
    }

    pub async fn warning(&self, title: &str, message: &str) -> Uuid {
        self.push(NotificationLevel::Warning, title, message).await
    }

    pub async fn error(&self, title: &str, message: &str) -> Uuid {
        self.push(NotificationLevel::Error, title, message).await
    }

    /// Newest first.
    pub async fn list(&self) -> Vec<Notification> {
        self.entries.read().await.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.entries.read().await.iter().filter(|n| !n.read).count()
    }

    pub async fn mark_read(&self, id: Uuid) -> bool {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub async fn mark_all_read(&self) {
        let mut entries = self.entries.write().await;
        for notification in entries.iter_mut() {
            notification.read = true;
        }
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracks_read_state() {
        let center = NotificationCenter::new();
        let id = center.success("Booking approved", "2 guests confirmed").await;
        center.warning("Billing", "3 invoices failed").await;

        assert_eq!(center.unread_count().await, 2);
        assert!(center.mark_read(id).await);
        assert_eq!(center.unread_count().await, 1);

        center.mark_all_read().await;
        assert_eq!(center.unread_count().await, 0);
    }

    #[tokio::test]
    async fn mark_read_on_unknown_id_is_a_no_op() {
        let center = NotificationCenter::new();
        center.info("Note", "message").await;
        assert!(!center.mark_read(Uuid::new_v4()).await);
        assert_eq!(center.unread_count().await, 1);
    }

    #[tokio::test]
    async fn newest_entries_come_first_and_retention_is_bounded() {
        let center = NotificationCenter::new();
        for i in 0..(MAX_RETAINED_NOTIFICATIONS + 5) {
            center.info("Note", &format!("message {}", i)).await;
        }

        let entries = center.list().await;
        assert_eq!(entries.len(), MAX_RETAINED_NOTIFICATIONS);
        assert_eq!(
            entries[0].message,
            format!("message {}", MAX_RETAINED_NOTIFICATIONS + 4)
        );
    }
}
