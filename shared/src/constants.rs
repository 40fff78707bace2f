use std::time::Duration;

// Persisted session state keys (carried over from the browser front end's
// local-storage contract; the admin runtime stores them in its state file)
pub const USER_TOKEN_KEY: &str = "kaha_user_token";
pub const BUSINESS_TOKEN_KEY: &str = "kaha_business_token";
pub const SELECTED_BUSINESS_KEY: &str = "kaha_selected_business";

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// Booking constraints
pub const MIN_GUEST_AGE: i32 = 1;
pub const MAX_GUEST_AGE: i32 = 120;

// Charge configuration
pub const GUARDIAN_PHONE_DIGITS: usize = 10;
pub const CURRENCY_SCALE: u32 = 2;

// Billing automation
pub const MIN_SCHEDULE_DAY: u32 = 1;
pub const MAX_SCHEDULE_DAY: u32 = 28;
pub const SCHEDULING_HORIZON_MONTHS: usize = 6;

// Reporting
pub const DASHBOARD_POLL_INTERVAL: Duration = Duration::from_secs(30);

// Notification center
pub const MAX_RETAINED_NOTIFICATIONS: usize = 200;
