//! Domain models for the hostel admin runtime.
//!
//! Wire DTOs live in `hostel-platform-shared`; these types are the ingested,
//! validated shapes the services operate on, plus the pure business rules
//! (aggregate booking status, charge totals, schedule computation) that the
//! rest of the crate leans on.

pub mod billing;
pub mod booking;
pub mod charge;
pub mod report;
pub mod student;

#[cfg(test)]
pub mod tests;

pub use billing::{due_date, next_run_times, AutomationConfig, BillingJob, ScheduledRun};
pub use booking::{validate_submission, Booking, BookingKind, Contact, Guest};
pub use charge::{Academic, AdditionalCharge, ChargeConfiguration, Guardian};
pub use report::DashboardSnapshot;
pub use student::{enhance_student, is_pending_configuration, EnhancedStudent, GuestProfile};
