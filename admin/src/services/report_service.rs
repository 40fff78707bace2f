use crate::api::ApiClient;
use crate::models::DashboardSnapshot;
use chrono::{Datelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};


/// Dashboard read views, refreshed on a fixed poll interval. Every source
/// degrades independently: a failed fetch leaves that section at its default
/// and records the source name, while the rest of the snapshot still loads.
#[derive(Clone)]
pub struct ReportService {
    api: ApiClient,
    snapshot: Arc<RwLock<DashboardSnapshot>>,
}

impl ReportService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::default())),
        }
    }

    /// The most recent snapshot. Empty defaults until the first refresh.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Fetch all dashboard sources and swap in a fresh snapshot.
    pub async fn refresh(&self) -> DashboardSnapshot {
        let now = Utc::now();
        let mut next = DashboardSnapshot {
            fetched_at: Some(now),
            ..DashboardSnapshot::default()
        };

        match self.api.attendance_summary().await {
            Ok(attendance) => next.attendance = attendance,
            Err(err) => {
                warn!("Attendance summary unavailable: {}", err);
                next.degraded_sources.push("attendance".to_string());
            }
        }

        match self.api.booking_stats().await {
            Ok(stats) => next.booking_stats = stats,
            Err(err) => {
                warn!("Booking stats unavailable: {}", err);
                next.degraded_sources.push("bookings".to_string());
            }
        }

        match self.api.monthly_stats(now.month(), now.year()).await {
            Ok(stats) => next.monthly_billing = stats,
            Err(err) => {
                warn!("Monthly billing stats unavailable: {}", err);
                next.degraded_sources.push("billing".to_string());
            }
        }

        match self.api.overdue_invoices().await {
            Ok(invoices) => next.overdue_invoices = invoices.len(),
            Err(err) => {
                warn!("Overdue invoice list unavailable: {}", err);
                next.degraded_sources.push("overdue".to_string());
            }
        }

        debug!(
            "Dashboard refreshed, {} degraded source(s)",
            next.degraded_sources.len()
        );
        *self.snapshot.write().await = next.clone();
        next
    }

    /// Poll until the shutdown signal flips. The first refresh fires
    /// immediately, then once per interval.
    pub async fn start_polling(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!("Dashboard polling every {:?}", interval);
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Dashboard polling stopped");
                        return;
                    }
                }
            }
        }
    }
}
