use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::config::ReminderSettings;
use crate::database::{connection::DatabaseManager, models::*};
use crate::services::notifier::Notifier;
use crate::utils::datetime::{format_appointment, today};
use crate::utils::logging::{log_database_error, log_delivery_error, log_reminder_event};

/// Counts from one pass over the due reminders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Clone)]
struct TickContext {
    notifier: Arc<dyn Notifier>,
    db: Arc<DatabaseManager>,
    admin_id: i64,
    retry_interval: Duration,
    retry_pending: Arc<AtomicBool>,
}

pub struct ReminderService {
    context: TickContext,
    tick_interval: Duration,
    scheduler: JobScheduler,
}

impl ReminderService {
    pub async fn new(
        notifier: Arc<dyn Notifier>,
        db: Arc<DatabaseManager>,
        admin_id: i64,
        settings: ReminderSettings,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            context: TickContext {
                notifier,
                db,
                admin_id,
                retry_interval: settings.retry_interval,
                retry_pending: Arc::new(AtomicBool::new(false)),
            },
            tick_interval: settings.tick_interval,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let context = self.context.clone();

        let reminder_job = Job::new_repeated_async(self.tick_interval, move |_uuid, scheduler| {
            tick_job(context.clone(), scheduler)
        })?;

        self.scheduler.add(reminder_job).await?;
        self.scheduler.start().await?;

        // Catch up on anything that fell due while the bot was down
        tokio::spawn(tick_job(self.context.clone(), self.scheduler.clone()));

        tracing::info!(
            "Reminder service started - checking every {}s, retrying failed checks after {}s",
            self.tick_interval.as_secs(),
            self.context.retry_interval.as_secs()
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Runs one check outside the schedule.
    pub async fn check_reminders_now(&self) -> Result<TickReport, sqlx::Error> {
        check_and_send_reminders(
            self.context.notifier.as_ref(),
            &self.context.db,
            today(),
            self.context.admin_id,
        )
        .await
    }
}

fn tick_job(
    context: TickContext,
    scheduler: JobScheduler,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        match check_and_send_reminders(
            context.notifier.as_ref(),
            &context.db,
            today(),
            context.admin_id,
        )
        .await
        {
            Ok(report) => {
                if report.due > 0 {
                    log_reminder_event(
                        "tick finished",
                        Some(&format!(
                            "{} due, {} sent, {} failed",
                            report.due, report.sent, report.failed
                        )),
                    );
                }
            }
            Err(e) => {
                tracing::error!("Reminder check failed: {}", e);
                schedule_retry(context, scheduler).await;
            }
        }
    })
}

async fn schedule_retry(context: TickContext, scheduler: JobScheduler) {
    // One recovery chain at a time
    if context.retry_pending.swap(true, Ordering::SeqCst) {
        return;
    }

    let retry_pending = context.retry_pending.clone();
    let delay = context.retry_interval;

    let added = match retry_job(context) {
        Ok(job) => scheduler.add(job).await.map(|_| ()),
        Err(e) => Err(e),
    };

    match added {
        Ok(()) => log_reminder_event(
            "retry scheduled",
            Some(&format!("next attempt in {}s", delay.as_secs())),
        ),
        Err(e) => {
            retry_pending.store(false, Ordering::SeqCst);
            tracing::error!("Failed to schedule reminder retry: {}", e);
        }
    }
}

fn retry_job(context: TickContext) -> Result<Job, JobSchedulerError> {
    let delay = context.retry_interval;

    Job::new_one_shot_async(delay, move |_uuid, scheduler| {
        context.retry_pending.store(false, Ordering::SeqCst);
        tick_job(context.clone(), scheduler)
    })
}

/// Delivers every reminder due on or before `today`.
///
/// A reminder is marked sent only after the requester received it; a failed
/// delivery leaves it for the next tick. Only a failure to read the due list
/// fails the whole tick.
pub async fn check_and_send_reminders(
    notifier: &dyn Notifier,
    db: &DatabaseManager,
    today: NaiveDate,
    admin_id: i64,
) -> Result<TickReport, sqlx::Error> {
    let due = Reminder::find_due(&db.pool, today).await?;
    let mut report = TickReport {
        due: due.len(),
        ..TickReport::default()
    };

    for reminder in &due {
        let text = reminder_text(reminder);

        if let Err(e) = notifier.notify(reminder.requester_id, &text).await {
            log_delivery_error("reminder", reminder.requester_id, &e.to_string());
            report.failed += 1;
            continue;
        }

        match Reminder::mark_sent(&db.pool, reminder.reminder_id).await {
            Ok(_) => {
                report.sent += 1;
                tracing::info!(
                    "Sent reminder {} for application #{}",
                    reminder.reminder_id,
                    reminder.application_id
                );
            }
            Err(e) => {
                log_database_error(
                    "UPDATE",
                    "reminders",
                    &e.to_string(),
                    Some(&format!("reminder {} delivered but not marked sent", reminder.reminder_id)),
                );
                report.failed += 1;
                continue;
            }
        }

        if let Err(e) = notifier.notify(admin_id, &admin_copy_text(reminder)).await {
            log_delivery_error("reminder copy", admin_id, &e.to_string());
        }
    }

    Ok(report)
}

pub fn reminder_text(reminder: &DueReminder) -> String {
    format!(
        "⏰ Reminder\n\nHello, {}! Your class is scheduled for {}.\n\n🆔 Application #{}",
        reminder.full_name,
        format_appointment(&reminder.appointment_date, reminder.appointment_time.as_ref()),
        reminder.application_id
    )
}

fn admin_copy_text(reminder: &DueReminder) -> String {
    format!(
        "⏰ Reminder sent for application #{}\n👤 {}\n📱 {}\n📅 {}",
        reminder.application_id,
        reminder.full_name,
        reminder.contact_type.display_contact(&reminder.contact_data),
        format_appointment(&reminder.appointment_date, reminder.appointment_time.as_ref())
    )
}
