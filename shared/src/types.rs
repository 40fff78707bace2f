use serde::{Deserialize, Serialize};
use std::fmt;

// Booking-related enums

/// Aggregate status of a booking request. The backend spells these wire
/// values with a leading capital; `Partially_Confirmed` keeps its historical
/// underscore form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Confirmed,
    #[serde(rename = "Partially_Confirmed")]
    PartiallyConfirmed,
    Completed,
}

impl BookingStatus {
    /// Terminal statuses admit no further transitions. Only `Pending` and
    /// `Partially_Confirmed` bookings are still actionable; an approved or
    /// confirmed booking already created its students and occupied its beds.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Approved
                | BookingStatus::Rejected
                | BookingStatus::Cancelled
                | BookingStatus::Confirmed
                | BookingStatus::Completed
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "Pending"),
            BookingStatus::Approved => write!(f, "Approved"),
            BookingStatus::Rejected => write!(f, "Rejected"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
            BookingStatus::PartiallyConfirmed => write!(f, "Partially_Confirmed"),
            BookingStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Status of one guest within a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuestStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestStatus::Pending => write!(f, "Pending"),
            GuestStatus::Confirmed => write!(f, "Confirmed"),
            GuestStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Where a booking submission originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    Admin,
    Website,
    WalkIn,
    Phone,
}

// Student-related enums

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
    Suspended,
    Graduated,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentStatus::Active => write!(f, "Active"),
            StudentStatus::Inactive => write!(f, "Inactive"),
            StudentStatus::Suspended => write!(f, "Suspended"),
            StudentStatus::Graduated => write!(f, "Graduated"),
        }
    }
}

// Billing-related enums

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingJobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl BillingJobStatus {
    /// A job is immutable history once it reaches a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BillingJobStatus::Completed | BillingJobStatus::Failed | BillingJobStatus::Cancelled
        )
    }
}

impl fmt::Display for BillingJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingJobStatus::Pending => write!(f, "pending"),
            BillingJobStatus::Running => write!(f, "running"),
            BillingJobStatus::Completed => write!(f, "completed"),
            BillingJobStatus::Failed => write!(f, "failed"),
            BillingJobStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingTrigger {
    Scheduled,
    Manual,
}

impl fmt::Display for BillingTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingTrigger::Scheduled => write!(f, "scheduled"),
            BillingTrigger::Manual => write!(f, "manual"),
        }
    }
}

// Notification-related enums

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}
