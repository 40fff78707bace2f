use crate::api::ApiClient;
use crate::error::AppError;
use crate::models::{validate_submission, Booking};
use crate::services::notification_service::NotificationCenter;
use crate::services::student_service::StudentCache;
use hostel_platform_shared::{
    ApproveBookingRequest, ApproveBookingResponse, BookingStatsResponse, CancelBookingRequest,
    CreateBookingRequest, GuestAssignmentFailure, Pagination, RejectBookingRequest,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;


/// Result of an approve/confirm call. Not an error: a partial result carries
/// both the guests that were assigned and the ones that were not, and the UI
/// must render both.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub booking: Booking,
    pub confirmed_guests: usize,
    pub total_guests: usize,
    pub failed_assignments: Vec<GuestAssignmentFailure>,
}

impl ApprovalOutcome {
    pub fn from_response(response: ApproveBookingResponse) -> Self {
        let booking = Booking::from_record(response.booking);
        Self {
            confirmed_guests: booking.confirmed_guests(),
            total_guests: booking.total_guests(),
            booking,
            failed_assignments: response.failed_assignments,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.confirmed_guests < self.total_guests
    }
}

/// Booking reconciliation service: one unified view over heterogeneous
/// booking records, plus their status transitions.
#[derive(Clone)]
pub struct BookingService {
    api: ApiClient,
    notifications: NotificationCenter,
    student_cache: StudentCache,
    /// Bookings with an action currently in flight. The de facto concurrency
    /// guard for approve/reject/cancel: a duplicate trigger is rejected while
    /// the first call is outstanding.
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl BookingService {
    pub fn new(
        api: ApiClient,
        notifications: NotificationCenter,
        student_cache: StudentCache,
    ) -> Self {
        Self {
            api,
            notifications,
            student_cache,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<(Vec<Booking>, Pagination), AppError> {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };
        let batch = self.api.list_bookings(page.max(1), limit).await?;
        let bookings = batch.items.into_iter().map(Booking::from_record).collect();
        Ok((bookings, batch.pagination))
    }

    pub async fn pending(&self) -> Result<Vec<Booking>, AppError> {
        let records = self.api.pending_bookings().await?;
        Ok(records.into_iter().map(Booking::from_record).collect())
    }

    pub async fn stats(&self) -> Result<BookingStatsResponse, AppError> {
        self.api.booking_stats().await
    }

    /// Submit a booking. Validation runs locally first; on violation the
    /// field-keyed error map is returned and the backend is never called. On
    /// success the normalized multi-guest payload is posted even for a single
    /// guest, and the created booking comes back `Pending`.
    pub async fn submit(&self, request: CreateBookingRequest) -> Result<Booking, AppError> {
        let errors = validate_submission(&request);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let record = self.api.create_booking(&request).await?;
        let booking = Booking::from_record(record);

        info!(
            "Submitted booking {} with {} guest(s)",
            booking.booking_reference,
            booking.total_guests()
        );
        self.notifications
            .success(
                "Booking submitted",
                &format!(
                    "Booking {} created for {} guest(s)",
                    booking.booking_reference,
                    booking.total_guests()
                ),
            )
            .await;

        Ok(booking)
    }

    /// Approve a pending booking: a student record is created per guest and
    /// each guest's bed is marked occupied.
    pub async fn approve(&self, id: Uuid, processed_by: &str) -> Result<ApprovalOutcome, AppError> {
        self.transition_approve(id, processed_by, "approve").await
    }

    /// Confirm is the same transition under its workflow name.
    pub async fn confirm(&self, id: Uuid, processed_by: &str) -> Result<ApprovalOutcome, AppError> {
        self.transition_approve(id, processed_by, "confirm").await
    }

    async fn transition_approve(
        &self,
        id: Uuid,
        processed_by: &str,
        action: &'static str,
    ) -> Result<ApprovalOutcome, AppError> {
        self.begin_action(id).await?;
        let result = self.do_approve(id, processed_by, action).await;
        self.end_action(id).await;
        result
    }

    async fn do_approve(
        &self,
        id: Uuid,
        processed_by: &str,
        action: &'static str,
    ) -> Result<ApprovalOutcome, AppError> {
        let current = Booking::from_record(self.api.booking(id).await?);
        ensure_actionable(&current, action)?;

        let request = ApproveBookingRequest {
            create_student: true,
            processed_by: processed_by.to_string(),
        };
        let response = self.api.approve_booking(id, &request).await?;
        let outcome = ApprovalOutcome::from_response(response);

        // New student records exist now; any cached students read-view is
        // stale.
        self.student_cache.invalidate().await;

        if outcome.is_partial() {
            let failed_names: Vec<&str> = outcome
                .failed_assignments
                .iter()
                .map(|f| f.guest_name.as_str())
                .collect();
            warn!(
                "Booking {} partially confirmed: {}/{} guests, failed: {:?}",
                id, outcome.confirmed_guests, outcome.total_guests, failed_names
            );
            self.notifications
                .warning(
                    "Booking partially confirmed",
                    &format!(
                        "{} of {} guests confirmed; could not assign: {}",
                        outcome.confirmed_guests,
                        outcome.total_guests,
                        failed_names.join(", ")
                    ),
                )
                .await;
        } else {
            info!(
                "Booking {} {}d: {} guest(s) confirmed",
                id, action, outcome.confirmed_guests
            );
            self.notifications
                .success(
                    "Booking confirmed",
                    &format!("All {} guest(s) confirmed", outcome.total_guests),
                )
                .await;
        }

        Ok(outcome)
    }

    /// Reject a booking. The reason is mandatory; the transition is terminal
    /// and releases any tentatively held beds.
    pub async fn reject(&self, id: Uuid, reason: &str) -> Result<Booking, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::field("reason", "A rejection reason is required"));
        }

        self.begin_action(id).await?;
        let result = self.do_reject(id, reason).await;
        self.end_action(id).await;
        result
    }

    async fn do_reject(&self, id: Uuid, reason: &str) -> Result<Booking, AppError> {
        let current = Booking::from_record(self.api.booking(id).await?);
        ensure_actionable(&current, "reject")?;

        let request = RejectBookingRequest {
            reason: reason.to_string(),
        };
        let record = self.api.reject_booking(id, &request).await?;
        let booking = Booking::from_record(record);

        info!("Booking {} rejected: {}", id, reason);
        self.notifications
            .info(
                "Booking rejected",
                &format!("Booking {} rejected", booking.booking_reference),
            )
            .await;
        Ok(booking)
    }

    /// Cancel a booking; same terminal rules as reject, with the operator
    /// recorded.
    pub async fn cancel(
        &self,
        id: Uuid,
        reason: &str,
        processed_by: &str,
    ) -> Result<Booking, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::field(
                "reason",
                "A cancellation reason is required",
            ));
        }

        self.begin_action(id).await?;
        let result = self.do_cancel(id, reason, processed_by).await;
        self.end_action(id).await;
        result
    }

    async fn do_cancel(
        &self,
        id: Uuid,
        reason: &str,
        processed_by: &str,
    ) -> Result<Booking, AppError> {
        let current = Booking::from_record(self.api.booking(id).await?);
        ensure_actionable(&current, "cancel")?;

        let request = CancelBookingRequest {
            reason: reason.to_string(),
            processed_by: processed_by.to_string(),
        };
        let record = self.api.cancel_booking(id, &request).await?;
        let booking = Booking::from_record(record);

        info!("Booking {} cancelled by {}: {}", id, processed_by, reason);
        self.notifications
            .info(
                "Booking cancelled",
                &format!("Booking {} cancelled", booking.booking_reference),
            )
            .await;
        Ok(booking)
    }

    pub(crate) async fn begin_action(&self, id: Uuid) -> Result<(), AppError> {
        let mut in_flight = self.in_flight.lock().await;
        if !in_flight.insert(id) {
            return Err(AppError::Conflict(format!(
                "An action for booking {} is already in progress",
                id
            )));
        }
        Ok(())
    }

    pub(crate) async fn end_action(&self, id: Uuid) {
        self.in_flight.lock().await.remove(&id);
    }
}

/// Status gate shared by approve/reject/cancel: a booking that already
/// reached a terminal status is reported as such, never re-submitted to the
/// backend.
pub(crate) fn ensure_actionable(booking: &Booking, action: &'static str) -> Result<(), AppError> {
    if booking.is_terminal() {
        return Err(AppError::InvalidTransition {
            from: booking.status,
            action,
        });
    }
    Ok(())
}
