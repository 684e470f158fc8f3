//! PromoteWaitlistHandler - notifies waitlisted clients when a slot frees up.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::booking::Booking;
use crate::domain::foundation::{DayDate, DomainError, QueueId, WaitlistEntryId};
use crate::ports::{NotificationDispatcher, WaitlistRepository, WaitlistSlotOpen};

/// Outcome of one promotion sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionSummary {
    /// Entries that received a slot-open notification.
    pub notified: u32,

    /// Entries that were no longer eligible when re-checked.
    pub skipped: u32,

    /// Entries whose notification failed.
    pub failed: u32,
}

/// Handler that offers freed slots to waiting clients.
///
/// Notification only: entries stay promotable until a client actually claims
/// the slot through the booking flow, so several cancellations on the same
/// day may re-notify the same entry.
pub struct PromoteWaitlistHandler {
    waitlist_repository: Arc<dyn WaitlistRepository>,
    notifications: Arc<dyn NotificationDispatcher>,

    /// Base URL the claim link is built from.
    claim_base_url: String,
}

impl PromoteWaitlistHandler {
    pub fn new(
        waitlist_repository: Arc<dyn WaitlistRepository>,
        notifications: Arc<dyn NotificationDispatcher>,
        claim_base_url: impl Into<String>,
    ) -> Self {
        Self {
            waitlist_repository,
            notifications,
            claim_base_url: claim_base_url.into(),
        }
    }

    /// Offers the slot freed by a cancelled booking to every still-eligible
    /// entry on the same queue-day. Per-entry failures are logged and the
    /// sweep continues.
    pub async fn notify_for_cancelled_booking(
        &self,
        booking: &Booking,
    ) -> Result<PromotionSummary, DomainError> {
        self.notify_for_slot(&booking.queue_id, &booking.date).await
    }

    pub async fn notify_for_slot(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<PromotionSummary, DomainError> {
        let candidates = self
            .waitlist_repository
            .find_promotable(queue_id, date)
            .await?;

        let mut summary = PromotionSummary::default();
        for candidate in candidates {
            // Re-load right before acting: another cancellation sweep or a
            // claim may have consumed the entry since the query.
            let entry = match self.waitlist_repository.find_by_id(&candidate.id).await? {
                Some(entry) if entry.is_promotable() => entry,
                _ => {
                    summary.skipped += 1;
                    continue;
                }
            };

            let notification = WaitlistSlotOpen {
                entry_id: entry.id,
                commerce_id: entry.commerce_id,
                queue_id: entry.queue_id,
                date: entry.date,
                user: entry.user.clone(),
                claim_url: self.claim_url(&entry.id),
            };
            match self.notifications.send_waitlist_slot_open(&notification).await {
                Ok(()) => summary.notified += 1,
                Err(e) => {
                    warn!(entry_id = %entry.id, error = %e, "Slot-open notification failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            %queue_id,
            %date,
            notified = summary.notified,
            skipped = summary.skipped,
            failed = summary.failed,
            "Waitlist promotion sweep finished"
        );
        Ok(summary)
    }

    fn claim_url(&self, entry_id: &WaitlistEntryId) -> String {
        format!(
            "{}/waitlist/{}/book",
            self.claim_base_url.trim_end_matches('/'),
            entry_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWaitlistRepository;
    use crate::domain::catalog::UserSnapshot;
    use crate::domain::foundation::{BookingId, CommerceId};
    use crate::domain::waitlist::WaitlistEntry;
    use crate::ports::BookingNotification;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingDispatcher {
        slot_open: Mutex<Vec<WaitlistSlotOpen>>,
        fail: bool,
    }

    impl RecordingDispatcher {
        fn new() -> Self {
            Self {
                slot_open: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                slot_open: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<WaitlistSlotOpen> {
            self.slot_open.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationDispatcher for RecordingDispatcher {
        async fn send_booking_created(
            &self,
            _: &BookingNotification,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_booking_cancelled(
            &self,
            _: &BookingNotification,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_booking_reminder(
            &self,
            _: &BookingNotification,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_waitlist_slot_open(
            &self,
            notification: &WaitlistSlotOpen,
        ) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::transient("notifications", "down"));
            }
            self.slot_open.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn entry(queue_id: QueueId, date: DayDate, name: &str) -> WaitlistEntry {
        WaitlistEntry::new(
            queue_id,
            CommerceId::new(),
            date,
            "web",
            UserSnapshot::new(name),
            None,
        )
    }

    #[tokio::test]
    async fn notifies_every_eligible_entry_with_claim_link() {
        let repo = Arc::new(InMemoryWaitlistRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let handler = PromoteWaitlistHandler::new(
            repo.clone(),
            dispatcher.clone(),
            "https://booking.example.com/",
        );

        let queue_id = QueueId::new();
        let date = DayDate::today().add_days(1);
        let first = entry(queue_id, date, "Ana");
        let second = entry(queue_id, date, "Luis");
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let summary = handler.notify_for_slot(&queue_id, &date).await.unwrap();
        assert_eq!(summary.notified, 2);

        let sent = dispatcher.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[0].claim_url,
            format!("https://booking.example.com/waitlist/{}/book", sent[0].entry_id)
        );
    }

    #[tokio::test]
    async fn promoted_entries_are_not_renotified() {
        let repo = Arc::new(InMemoryWaitlistRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let handler =
            PromoteWaitlistHandler::new(repo.clone(), dispatcher.clone(), "http://x");

        let queue_id = QueueId::new();
        let date = DayDate::today().add_days(1);
        let mut promoted = entry(queue_id, date, "Eva");
        promoted.promote(BookingId::new()).unwrap();
        repo.save(&promoted).await.unwrap();
        repo.save(&entry(queue_id, date, "Ana")).await.unwrap();

        let summary = handler.notify_for_slot(&queue_id, &date).await.unwrap();
        assert_eq!(summary.notified, 1);
        assert_eq!(dispatcher.sent().len(), 1);
    }

    #[tokio::test]
    async fn notification_failure_is_counted_not_fatal() {
        let repo = Arc::new(InMemoryWaitlistRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::failing());
        let handler =
            PromoteWaitlistHandler::new(repo.clone(), dispatcher.clone(), "http://x");

        let queue_id = QueueId::new();
        let date = DayDate::today().add_days(1);
        repo.save(&entry(queue_id, date, "Ana")).await.unwrap();

        let summary = handler.notify_for_slot(&queue_id, &date).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.notified, 0);
    }

    #[tokio::test]
    async fn sweep_does_not_mark_entries_processed() {
        let repo = Arc::new(InMemoryWaitlistRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let handler =
            PromoteWaitlistHandler::new(repo.clone(), dispatcher.clone(), "http://x");

        let queue_id = QueueId::new();
        let date = DayDate::today().add_days(1);
        let e = entry(queue_id, date, "Ana");
        repo.save(&e).await.unwrap();

        handler.notify_for_slot(&queue_id, &date).await.unwrap();

        let stored = repo.find_by_id(&e.id).await.unwrap().unwrap();
        assert!(stored.is_promotable());
    }
}
