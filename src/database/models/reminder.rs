use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::application::ContactType;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub application_id: i64,
    pub reminder_date: NaiveDate,
    pub sent: bool,
}

/// A due reminder joined with what is needed to deliver it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DueReminder {
    pub reminder_id: i64,
    pub application_id: i64,
    pub reminder_date: NaiveDate,
    pub requester_id: i64,
    pub requester_handle: Option<String>,
    pub full_name: String,
    pub contact_type: ContactType,
    pub contact_data: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: Option<NaiveTime>,
}

impl Reminder {
    /// The day before the appointment, or `None` for `NaiveDate::MIN`.
    pub fn date_for_appointment(appointment_date: NaiveDate) -> Option<NaiveDate> {
        appointment_date.pred_opt()
    }

    pub async fn create(
        pool: &sqlx::SqlitePool,
        application_id: i64,
        reminder_date: NaiveDate,
    ) -> Result<Self, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO reminders (application_id, reminder_date, sent) VALUES (?, ?, 0)"
        )
        .bind(application_id)
        .bind(reminder_date)
        .execute(pool)
        .await?;

        Ok(Reminder {
            id: result.last_insert_rowid(),
            application_id,
            reminder_date,
            sent: false,
        })
    }

    pub async fn find_by_application(
        pool: &sqlx::SqlitePool,
        application_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Reminder>(
            "SELECT id, application_id, reminder_date, sent FROM reminders WHERE application_id = ? ORDER BY id"
        )
        .bind(application_id)
        .fetch_all(pool)
        .await
    }

    /// Unsent reminders whose date is on or before `today`.
    pub async fn find_due(
        pool: &sqlx::SqlitePool,
        today: NaiveDate,
    ) -> Result<Vec<DueReminder>, sqlx::Error> {
        sqlx::query_as::<_, DueReminder>(
            r#"
            SELECT
                r.id as reminder_id,
                r.application_id as application_id,
                r.reminder_date as reminder_date,
                a.requester_id as requester_id,
                a.requester_handle as requester_handle,
                a.full_name as full_name,
                a.contact_type as contact_type,
                a.contact_data as contact_data,
                a.appointment_date as appointment_date,
                a.appointment_time as appointment_time
            FROM reminders r
            JOIN applications a ON r.application_id = a.id
            WHERE r.sent = 0 AND r.reminder_date <= ? AND a.appointment_date IS NOT NULL
            ORDER BY r.reminder_date, r.id
            "#
        )
        .bind(today)
        .fetch_all(pool)
        .await
    }

    /// Returns false when the reminder was already sent or does not exist.
    pub async fn mark_sent(
        pool: &sqlx::SqlitePool,
        reminder_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE reminders SET sent = 1 WHERE id = ? AND sent = 0")
            .bind(reminder_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
