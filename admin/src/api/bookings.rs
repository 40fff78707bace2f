use super::{decode, ApiClient};
use crate::error::AppError;
use hostel_platform_shared::{
    ApproveBookingRequest, ApproveBookingResponse, BookingRecord, BookingStatsResponse,
    CancelBookingRequest, CreateBookingRequest, Paginated, RejectBookingRequest,
};
use serde_json::json;
use uuid::Uuid;

impl ApiClient {
    pub async fn list_bookings(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<Paginated<BookingRecord>, AppError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let value = self.get("/booking-requests", &query).await?;
        decode(value)
    }

    pub async fn pending_bookings(&self) -> Result<Vec<BookingRecord>, AppError> {
        let value = self.get("/booking-requests/pending", &[]).await?;
        decode(value)
    }

    pub async fn booking(&self, id: Uuid) -> Result<BookingRecord, AppError> {
        let value = self.get(&format!("/booking-requests/{}", id), &[]).await?;
        decode(value)
    }

    pub async fn booking_stats(&self) -> Result<BookingStatsResponse, AppError> {
        let value = self.get("/booking-requests/stats", &[]).await?;
        decode(value)
    }

    /// The create endpoint expects the unified multi-guest payload wrapped in
    /// a `data` envelope.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<BookingRecord, AppError> {
        let body = json!({ "data": request });
        let value = self.post("/booking-requests", &body).await?;
        decode(value)
    }

    pub async fn approve_booking(
        &self,
        id: Uuid,
        request: &ApproveBookingRequest,
    ) -> Result<ApproveBookingResponse, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self
            .post(&format!("/booking-requests/{}/approve", id), &body)
            .await?;
        decode(value)
    }

    pub async fn reject_booking(
        &self,
        id: Uuid,
        request: &RejectBookingRequest,
    ) -> Result<BookingRecord, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self
            .post(&format!("/booking-requests/{}/reject", id), &body)
            .await?;
        decode(value)
    }

    pub async fn cancel_booking(
        &self,
        id: Uuid,
        request: &CancelBookingRequest,
    ) -> Result<BookingRecord, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self
            .post(&format!("/booking-requests/{}/cancel", id), &body)
            .await?;
        decode(value)
    }
}
