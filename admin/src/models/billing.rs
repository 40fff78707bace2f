use crate::error::FieldErrors;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use hostel_platform_shared::{
    BillingJobStatus, BillingTrigger, GenerateMonthlyResponse, MAX_SCHEDULE_DAY, MIN_SCHEDULE_DAY,
    SCHEDULING_HORIZON_MONTHS,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One execution (scheduled or manual) of monthly invoice generation.
/// Terminal once `completed` or `failed`; immutable history afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingJob {
    pub id: Uuid,
    pub month: u32,
    pub year: i32,
    pub status: BillingJobStatus,
    pub trigger: BillingTrigger,
    pub generated_invoices: i64,
    pub failed_invoices: i64,
    pub total_amount: Decimal,
    pub errors: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BillingJob {
    pub fn new(month: u32, year: i32, trigger: BillingTrigger) -> Self {
        Self {
            id: Uuid::new_v4(),
            month,
            year,
            status: BillingJobStatus::Pending,
            trigger,
            generated_invoices: 0,
            failed_invoices: 0,
            total_amount: Decimal::ZERO,
            errors: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn start(&mut self) {
        self.status = BillingJobStatus::Running;
    }

    /// The generation call returned. The job is `completed` even when some
    /// invoices failed; per-item failures are recorded on the job, not
    /// promoted to job failure.
    pub fn complete(&mut self, response: &GenerateMonthlyResponse) {
        self.generated_invoices = response.generated;
        self.failed_invoices = response.failed;
        self.total_amount = if response.invoices.is_empty() {
            response.total_amount
        } else {
            response.invoices.iter().map(|i| i.amount).sum()
        };
        self.errors = response.errors.clone();
        self.status = BillingJobStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// The generation call itself threw (network/server error). Only this
    /// path marks the job `failed`.
    pub fn fail(&mut self, message: String) {
        self.errors.push(message);
        self.status = BillingJobStatus::Failed;
        self.completed_at = Some(Utc::now());
    }
}

/// Billing automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    pub enabled: bool,
    /// Day of month the generation fires, 1-28 so every month qualifies.
    pub schedule_day: u32,
    pub due_date_offset_days: i64,
    pub auto_send_invoices: bool,
    pub notify_on_generation: bool,
    pub notify_on_failure: bool,
    pub retry_failed_invoices: bool,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            schedule_day: 1,
            due_date_offset_days: 10,
            auto_send_invoices: false,
            notify_on_generation: true,
            notify_on_failure: true,
            retry_failed_invoices: false,
        }
    }
}

impl AutomationConfig {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.schedule_day < MIN_SCHEDULE_DAY || self.schedule_day > MAX_SCHEDULE_DAY {
            errors.insert(
                "scheduleDay".to_string(),
                format!(
                    "Schedule day must be between {} and {}",
                    MIN_SCHEDULE_DAY, MAX_SCHEDULE_DAY
                ),
            );
        }
        if self.due_date_offset_days < 0 {
            errors.insert(
                "dueDateOffsetDays".to_string(),
                "Due date offset cannot be negative".to_string(),
            );
        }
        errors
    }
}

/// A deferred trigger armed for one (month, year) key. Persisted so the
/// schedule survives restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledRun {
    pub month: u32,
    pub year: i32,
    pub run_at: DateTime<Utc>,
}

/// Invoice due date for a billing period: `schedule_day` of that month plus
/// the configured offset.
pub fn due_date(year: i32, month: u32, schedule_day: u32, offset_days: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, schedule_day).map(|d| d + Duration::days(offset_days))
}

/// Next occurrence of `schedule_day` in each of the next
/// `SCHEDULING_HORIZON_MONTHS` calendar months, strictly after `now`.
///
/// An out-of-range day yields no runs. The configure path validates the
/// bound, but a persisted state file is replayed unvalidated on restore and
/// must not spin the horizon loop forever.
pub fn next_run_times(now: DateTime<Utc>, schedule_day: u32) -> Vec<ScheduledRun> {
    if !(MIN_SCHEDULE_DAY..=MAX_SCHEDULE_DAY).contains(&schedule_day) {
        return Vec::new();
    }

    let mut runs = Vec::new();
    let mut year = now.year();
    let mut month = now.month();

    while runs.len() < SCHEDULING_HORIZON_MONTHS {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, schedule_day) {
            let run_at = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
            if run_at > now {
                runs.push(ScheduledRun {
                    month,
                    year,
                    run_at,
                });
            }
        }

        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    runs
}
