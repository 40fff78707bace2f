pub mod auth_service;
pub mod billing_service;
pub mod booking_service;
pub mod notification_service;
pub mod report_service;
pub mod student_service;

pub use auth_service::AuthService;
pub use billing_service::BillingAutomationService;
pub use booking_service::{ApprovalOutcome, BookingService};
pub use notification_service::{Notification, NotificationCenter};
pub use report_service::ReportService;
pub use student_service::{StudentCache, StudentService};
