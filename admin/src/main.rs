use hostel_admin::api::ApiClient;
use hostel_admin::services::{
    AuthService, BillingAutomationService, BookingService, NotificationCenter, ReportService,
    StudentCache, StudentService,
};
use hostel_admin::session::SessionStore;
use hostel_admin::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting hostel admin runtime against {}", config.api_base_url);

    let session = Arc::new(SessionStore::load(config.session_path())?);
    let api = ApiClient::new(&config, session.clone())?;
    let auth = AuthService::new(api.clone(), session.clone());

    if session.is_authenticated().await {
        if let Some(business) = session.selected_business().await {
            info!("Session restored for business {}", business.name);
        } else {
            info!("Session restored, no business selected yet");
        }
    } else if let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        auth.login(&email, &password).await?;
        let businesses = auth.businesses(None).await?;
        match businesses.into_iter().next() {
            Some(business) => auth.select_business(business).await?,
            None => warn!("Login succeeded but no business is available to operate"),
        }
    } else {
        warn!("No stored session and no ADMIN_EMAIL/ADMIN_PASSWORD; API calls will be unauthenticated");
    }
    let notifications = NotificationCenter::new();
    let student_cache = StudentCache::default();

    let students = StudentService::new(api.clone(), student_cache.clone(), notifications.clone());
    let bookings = BookingService::new(api.clone(), notifications.clone(), student_cache);
    let reports = ReportService::new(api.clone());
    let billing = BillingAutomationService::new(
        api,
        notifications.clone(),
        config.billing_state_path(),
    )?;

    billing.restore().await?;

    if session.is_authenticated().await {
        match bookings.pending().await {
            Ok(pending) => info!("{} booking(s) awaiting review", pending.len()),
            Err(err) => warn!("Could not load pending bookings: {}", err),
        }
        match students.pending_configuration().await {
            Ok(pending) => info!("{} student(s) awaiting charge configuration", pending.len()),
            Err(err) => warn!("Could not load students pending configuration: {}", err),
        }
    }

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let poller = {
        let reports = reports.clone();
        let interval = config.poll_interval();
        tokio::spawn(async move {
            reports.start_polling(interval, shutdown_rx).await;
        })
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    shutdown_tx.send(true)?;
    billing.shutdown().await;
    poller.await?;

    let unread = notifications.unread_count().await;
    if unread > 0 {
        info!("{} unread notification(s) at shutdown", unread);
    }

    Ok(())
}
