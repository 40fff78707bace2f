use chrono::{DateTime, Utc};
use hostel_platform_shared::{
    AttendanceSummaryResponse, BookingStatsResponse, MonthlyStatsResponse,
};
use serde::{Deserialize, Serialize};

/// Aggregated dashboard read view. Each source degrades independently to its
/// default when its fetch fails; a snapshot is never all-or-nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub fetched_at: Option<DateTime<Utc>>,
    pub attendance: AttendanceSummaryResponse,
    pub booking_stats: BookingStatsResponse,
    pub monthly_billing: MonthlyStatsResponse,
    pub overdue_invoices: usize,
    /// Sources that failed to load for this snapshot, by name.
    pub degraded_sources: Vec<String>,
}
