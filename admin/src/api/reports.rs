use super::{decode, ApiClient};
use crate::error::AppError;
use hostel_platform_shared::AttendanceSummaryResponse;

impl ApiClient {
    /// Today's attendance summary.
    pub async fn attendance_summary(&self) -> Result<AttendanceSummaryResponse, AppError> {
        let value = self.get("/attendance/summary", &[]).await?;
        decode(value)
    }
}
