use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// What the requester is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationType {
    Enrollment,
    Question,
    Other,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 3] = [Self::Enrollment, Self::Question, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::Enrollment => "enrollment",
            ApplicationType::Question => "question",
            ApplicationType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationType::Enrollment => "Class enrollment",
            ApplicationType::Question => "Course question",
            ApplicationType::Other => "Other",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the requester wants to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ContactType {
    Email,
    Phone,
    Telegram,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Email => "email",
            ContactType::Phone => "phone",
            ContactType::Telegram => "telegram",
        }
    }

    /// Renders stored contact data the way an operator would type it.
    pub fn display_contact(&self, contact_data: &str) -> String {
        match self {
            ContactType::Telegram => format!("@{contact_data}"),
            ContactType::Email | ContactType::Phone => contact_data.to_string(),
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status. `Processed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    New,
    Processed,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::Processed => "processed",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub requester_id: i64,
    pub requester_handle: Option<String>,
    pub full_name: String,
    pub contact_type: ContactType,
    pub contact_data: String,
    pub application_type: ApplicationType,
    pub message_text: String,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

/// Fields collected by the intake conversation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub requester_id: i64,
    pub requester_handle: Option<String>,
    pub full_name: String,
    pub contact_type: ContactType,
    pub contact_data: String,
    pub application_type: ApplicationType,
    pub message_text: String,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ApplicationStats {
    pub total: i64,
    pub new: i64,
    pub processed: i64,
}

const SELECT_COLUMNS: &str = "SELECT id, requester_id, requester_handle, full_name, contact_type, contact_data, \
     application_type, message_text, appointment_date, appointment_time, created_at, status \
     FROM applications";

impl Application {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        new: &NewApplication,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO applications (requester_id, requester_handle, full_name, contact_type, contact_data,
                application_type, message_text, appointment_date, appointment_time, created_at, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'new')
            "#,
        )
        .bind(new.requester_id)
        .bind(&new.requester_handle)
        .bind(&new.full_name)
        .bind(new.contact_type)
        .bind(&new.contact_data)
        .bind(new.application_type)
        .bind(&new.message_text)
        .bind(new.appointment_date)
        // A time without a date is never stored
        .bind(new.appointment_date.and(new.appointment_time))
        .bind(now)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first. `None` lists every status.
    pub async fn list(
        pool: &sqlx::SqlitePool,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match status {
            Some(status) => {
                sqlx::query_as::<_, Application>(&format!(
                    "{SELECT_COLUMNS} WHERE status = ? ORDER BY created_at DESC, id DESC"
                ))
                .bind(status)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Application>(&format!(
                    "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(pool)
                .await
            }
        }
    }

    /// Case-insensitive substring match on the full name, newest first.
    pub async fn search_by_name(
        pool: &sqlx::SqlitePool,
        fragment: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        // SQLite's LOWER() only folds ASCII, so match in Rust
        let needle = fragment.trim().to_lowercase();
        let all = Self::list(pool, None).await?;

        Ok(all
            .into_iter()
            .filter(|app| app.full_name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Returns false when no application had that id or it already had `status`.
    pub async fn update_status(
        pool: &sqlx::SqlitePool,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ? AND status != ?")
            .bind(status)
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes the application together with its reminders.
    pub async fn delete(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM reminders WHERE application_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn stats(pool: &sqlx::SqlitePool) -> Result<ApplicationStats, sqlx::Error> {
        sqlx::query_as::<_, ApplicationStats>(
            r#"
            SELECT
                COUNT(*) as total,
                COALESCE(SUM(CASE WHEN status = 'new' THEN 1 ELSE 0 END), 0) as new,
                COALESCE(SUM(CASE WHEN status = 'processed' THEN 1 ELSE 0 END), 0) as processed
            FROM applications
            "#,
        )
        .fetch_one(pool)
        .await
    }

    /// Application counts per type, in `ApplicationType::ALL` order.
    pub async fn count_by_type(
        pool: &sqlx::SqlitePool,
    ) -> Result<Vec<(ApplicationType, i64)>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (ApplicationType, i64)>(
            "SELECT application_type, COUNT(*) FROM applications GROUP BY application_type",
        )
        .fetch_all(pool)
        .await?;

        Ok(ApplicationType::ALL
            .iter()
            .map(|kind| {
                let count = rows
                    .iter()
                    .find(|(row_kind, _)| row_kind == kind)
                    .map_or(0, |(_, count)| *count);
                (*kind, count)
            })
            .collect())
    }
}
