use crate::api::ApiClient;
use crate::error::AppError;
use crate::models::{due_date, next_run_times, AutomationConfig, BillingJob, ScheduledRun};
use crate::services::notification_service::NotificationCenter;
use crate::utils::storage;
use chrono::Utc;
use hostel_platform_shared::{BillingTrigger, GenerateMonthlyRequest, StudentRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};


/// Everything the scheduler needs to survive a restart: settings, job
/// history, and the armed run times. Written back after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct BillingState {
    pub config: AutomationConfig,
    pub jobs: Vec<BillingJob>,
    pub armed: Vec<ScheduledRun>,
}

/// Billing automation scheduler: monthly invoice generation on a configured
/// day of month, with a durable schedule and an append-only job history.
#[derive(Clone)]
pub struct BillingAutomationService {
    api: ApiClient,
    notifications: NotificationCenter,
    state_path: PathBuf,
    state: Arc<Mutex<BillingState>>,
    /// Live timer handles keyed by billing period; arming a period again
    /// replaces (aborts) the previous timer instead of stacking a second one.
    timers: Arc<Mutex<HashMap<(u32, i32), JoinHandle<()>>>>,
    /// Periods with a generation call currently in progress.
    running: Arc<Mutex<HashSet<(u32, i32)>>>,
}

impl BillingAutomationService {
    pub fn new(
        api: ApiClient,
        notifications: NotificationCenter,
        state_path: PathBuf,
    ) -> Result<Self, AppError> {
        let state: BillingState = storage::read_json(&state_path)?.unwrap_or_default();
        Ok(Self {
            api,
            notifications,
            state_path,
            state: Arc::new(Mutex::new(state)),
            timers: Arc::new(Mutex::new(HashMap::new())),
            running: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Re-arm the persisted schedule after a restart. Runs whose time passed
    /// while the process was down are dropped with a warning, never fired
    /// retroactively; future runs get fresh timers. With automation enabled
    /// and nothing armed, a fresh schedule is laid out.
    pub async fn restore(&self) -> Result<(), AppError> {
        let now = Utc::now();
        let (mut future, enabled, schedule_day) = {
            let state = self.state.lock().await;
            let future: Vec<ScheduledRun> = state
                .armed
                .iter()
                .filter(|r| r.run_at > now)
                .cloned()
                .collect();
            for run in state.armed.iter().filter(|r| r.run_at <= now) {
                warn!(
                    "Dropping scheduled invoice run for {}/{} missed at {}",
                    run.month, run.year, run.run_at
                );
            }
            (future, state.config.enabled, state.config.schedule_day)
        };

        if enabled && future.is_empty() {
            future = next_run_times(now, schedule_day);
        }

        {
            let mut state = self.state.lock().await;
            state.armed = future.clone();
            storage::write_json(&self.state_path, &*state)?;
        }

        for run in &future {
            self.arm(run.clone()).await;
        }
        if !future.is_empty() {
            info!("Restored billing schedule with {} armed run(s)", future.len());
        }
        Ok(())
    }

    /// Replace the automation settings. Enabling lays out one run per
    /// calendar month over the scheduling horizon; disabling cancels every
    /// armed timer. The new schedule is persisted before any timer starts.
    pub async fn configure(&self, config: AutomationConfig) -> Result<Vec<ScheduledRun>, AppError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let runs = if config.enabled {
            next_run_times(Utc::now(), config.schedule_day)
        } else {
            Vec::new()
        };

        self.cancel_timers().await;
        {
            let mut state = self.state.lock().await;
            state.config = config.clone();
            state.armed = runs.clone();
            storage::write_json(&self.state_path, &*state)?;
        }

        for run in &runs {
            self.arm(run.clone()).await;
        }

        if config.enabled {
            info!(
                "Billing automation enabled: day {} of each month, {} run(s) armed",
                config.schedule_day,
                runs.len()
            );
        } else {
            info!("Billing automation disabled");
        }
        Ok(runs)
    }

    /// Operator-triggered generation for an arbitrary period, subject to the
    /// same single-run-per-period rule as the scheduler.
    pub async fn trigger_manual(&self, month: u32, year: i32) -> Result<BillingJob, AppError> {
        self.execute(month, year, BillingTrigger::Manual).await
    }

    pub async fn execute(
        &self,
        month: u32,
        year: i32,
        trigger: BillingTrigger,
    ) -> Result<BillingJob, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::field("month", "Month must be between 1 and 12"));
        }

        self.begin_run(month, year).await?;
        let result = self.run_generation(month, year, trigger).await;
        self.end_run(month, year).await;
        result
    }

    async fn run_generation(
        &self,
        month: u32,
        year: i32,
        trigger: BillingTrigger,
    ) -> Result<BillingJob, AppError> {
        let config = self.state.lock().await.config.clone();
        let due = due_date(year, month, config.schedule_day, config.due_date_offset_days)
            .ok_or_else(|| AppError::field("month", "No such calendar date"))?;

        let mut job = BillingJob::new(month, year, trigger);
        job.start();
        info!(
            "Generating monthly invoices for {}/{} ({:?} trigger), due {}",
            month, year, trigger, due
        );

        let request = GenerateMonthlyRequest {
            month,
            year,
            due_date: due,
        };
        match self.api.generate_monthly(&request).await {
            Ok(response) => {
                job.complete(&response);

                if config.auto_send_invoices && response.generated > 0 {
                    if let Err(err) = self.api.send_pending_invoices(month, year).await {
                        warn!("Auto-send of pending invoices failed: {}", err);
                    }
                }
                if config.retry_failed_invoices && response.failed > 0 {
                    if let Err(err) = self.api.retry_failed_invoices(month, year).await {
                        warn!("Retry of failed invoices failed: {}", err);
                    }
                }

                if response.failed > 0 {
                    warn!(
                        "Invoice generation for {}/{} finished with {} failure(s)",
                        month, year, response.failed
                    );
                    if config.notify_on_failure {
                        self.notifications
                            .warning(
                                "Invoices generated with failures",
                                &format!(
                                    "{} invoice(s) generated, {} failed for {}/{}",
                                    response.generated, response.failed, month, year
                                ),
                            )
                            .await;
                    }
                } else if config.notify_on_generation {
                    self.notifications
                        .success(
                            "Invoices generated",
                            &format!(
                                "{} invoice(s) totalling {} for {}/{}",
                                response.generated, job.total_amount, month, year
                            ),
                        )
                        .await;
                }
            }
            Err(err) => {
                error!("Invoice generation for {}/{} failed: {}", month, year, err);
                job.fail(err.to_string());
                if config.notify_on_failure {
                    self.notifications
                        .error(
                            "Invoice generation failed",
                            &format!("Generation for {}/{} failed: {}", month, year, err),
                        )
                        .await;
                }
            }
        }

        let snapshot = job.clone();
        {
            let mut state = self.state.lock().await;
            state.armed.retain(|r| !(r.month == month && r.year == year));
            state.jobs.push(job);
            storage::write_json(&self.state_path, &*state)?;
        }
        Ok(snapshot)
    }

    /// Students with completed charge configuration, the population a manual
    /// run would invoice. Shown to the operator before triggering.
    pub async fn students_ready(&self) -> Result<Vec<StudentRecord>, AppError> {
        self.api.students_ready().await
    }

    pub async fn config(&self) -> AutomationConfig {
        self.state.lock().await.config.clone()
    }

    /// Job history, oldest first.
    pub async fn history(&self) -> Vec<BillingJob> {
        self.state.lock().await.jobs.clone()
    }

    pub async fn scheduled_runs(&self) -> Vec<ScheduledRun> {
        self.state.lock().await.armed.clone()
    }

    /// Abort every armed timer. The schedule itself stays persisted, so a
    /// later `restore` picks it back up.
    pub async fn shutdown(&self) {
        self.cancel_timers().await;
    }

    async fn arm(&self, run: ScheduledRun) {
        let key = (run.month, run.year);
        let delay = (run.run_at - Utc::now()).to_std().unwrap_or_default();
        let service = self.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = service
                .execute(run.month, run.year, BillingTrigger::Scheduled)
                .await
            {
                error!(
                    "Scheduled invoice run for {}/{} failed: {}",
                    run.month, run.year, err
                );
            }
        });

        if let Some(previous) = self.timers.lock().await.insert(key, handle) {
            previous.abort();
        }
    }

    async fn cancel_timers(&self) {
        let mut timers = self.timers.lock().await;
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }

    pub(crate) async fn begin_run(&self, month: u32, year: i32) -> Result<(), AppError> {
        let mut running = self.running.lock().await;
        if !running.insert((month, year)) {
            return Err(AppError::Conflict(format!(
                "Invoice generation for {}/{} is already running",
                month, year
            )));
        }
        Ok(())
    }

    pub(crate) async fn end_run(&self, month: u32, year: i32) {
        self.running.lock().await.remove(&(month, year));
    }
}
