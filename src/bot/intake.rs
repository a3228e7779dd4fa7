//! # Application intake conversation
//!
//! The dialogue that collects one application is a finite state machine.
//! [`advance`] is the whole transition table: it takes the current state and
//! the user's text and says what happens next, without touching Telegram or
//! the database. The Telegram handler stores the returned state in the
//! per-chat dialogue storage and renders the returned [`Prompt`].
//!
//! ```text
//! Idle -> CollectingName -> CollectingContactMethod -> CollectingContact
//!      -> (enrollment) CollectingDate -> CollectingTime -> CollectingMessage
//!      -> (question, other) CollectingMessage
//!      -> Complete, back to Idle
//! ```

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::database::connection::DatabaseManager;
use crate::database::models::{
    Application, ApplicationType, ContactType, NewApplication, Reminder,
};
use crate::utils::logging::log_database_error;
use crate::utils::validation::{
    validate_appointment_date, validate_contact, validate_free_text, validate_time,
    ValidationError,
};

pub const ENROLLMENT_BUTTON: &str = "📝 Enrollment";
pub const QUESTION_BUTTON: &str = "❓ Course question";
pub const OTHER_BUTTON: &str = "📋 Other";
pub const EMAIL_BUTTON: &str = "📧 Email";
pub const PHONE_BUTTON: &str = "📱 Phone";
pub const TELEGRAM_BUTTON: &str = "✈️ Telegram";
pub const CANCEL_BUTTON: &str = "❌ Cancel";
pub const SKIP_DATE_BUTTON: &str = "❌ No date";
pub const SKIP_TIME_BUTTON: &str = "❌ No time";

/// Who the user is and how to reach them, known once the contact is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub application_type: ApplicationType,
    pub full_name: String,
    pub contact_type: ContactType,
    pub contact_data: String,
}

/// Current step of one chat's intake dialogue, carrying the data collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IntakeState {
    #[default]
    Idle,
    CollectingName {
        application_type: ApplicationType,
    },
    CollectingContactMethod {
        application_type: ApplicationType,
        full_name: String,
    },
    CollectingContact {
        application_type: ApplicationType,
        full_name: String,
        contact_type: ContactType,
    },
    CollectingDate {
        applicant: Applicant,
    },
    CollectingTime {
        applicant: Applicant,
        date: NaiveDate,
    },
    CollectingMessage {
        applicant: Applicant,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
    },
}

impl IntakeState {
    pub fn name(&self) -> &'static str {
        match self {
            IntakeState::Idle => "idle",
            IntakeState::CollectingName { .. } => "collecting_name",
            IntakeState::CollectingContactMethod { .. } => "collecting_contact_method",
            IntakeState::CollectingContact { .. } => "collecting_contact",
            IntakeState::CollectingDate { .. } => "collecting_date",
            IntakeState::CollectingTime { .. } => "collecting_time",
            IntakeState::CollectingMessage { .. } => "collecting_message",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, IntakeState::Idle)
    }

    /// What the user should be asked while in this state.
    pub fn prompt(&self) -> Prompt {
        match self {
            IntakeState::Idle => Prompt::ChooseType,
            IntakeState::CollectingName { .. } => Prompt::AskName,
            IntakeState::CollectingContactMethod { .. } => Prompt::AskContactMethod,
            IntakeState::CollectingContact { contact_type, .. } => Prompt::AskContact(*contact_type),
            IntakeState::CollectingDate { .. } => Prompt::AskDate,
            IntakeState::CollectingTime { .. } => Prompt::AskTime,
            IntakeState::CollectingMessage { applicant, .. } => {
                Prompt::AskMessage(applicant.application_type)
            }
        }
    }
}

/// Question shown to the user together with a matching keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ChooseType,
    AskName,
    AskContactMethod,
    AskContact(ContactType),
    AskDate,
    AskTime,
    AskMessage(ApplicationType),
}

/// Everything needed to store a finished application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedIntake {
    pub applicant: Applicant,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
    pub message_text: String,
}

impl CompletedIntake {
    pub fn into_new_application(self, requester_id: i64, requester_handle: Option<String>) -> NewApplication {
        NewApplication {
            requester_id,
            requester_handle,
            full_name: self.applicant.full_name,
            contact_type: self.applicant.contact_type,
            contact_data: self.applicant.contact_data,
            application_type: self.applicant.application_type,
            message_text: self.message_text,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_date.and(self.appointment_time),
        }
    }
}

/// Outcome of feeding one text message to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Move to `next` and ask `prompt`.
    Advance { next: IntakeState, prompt: Prompt },
    /// Input rejected; `state` is unchanged and `prompt` is asked again.
    Reject {
        state: IntakeState,
        error: ValidationError,
        prompt: Prompt,
    },
    /// Working data discarded, back to idle.
    Cancelled,
    /// Conversation finished; the caller stores the application and resets to idle.
    Complete(CompletedIntake),
    /// Text that does not start a conversation while idle.
    Ignored,
}

pub fn is_cancel(text: &str) -> bool {
    let text = text.trim();
    text == CANCEL_BUTTON || text == "/cancel"
}

pub fn parse_application_type(text: &str) -> Option<ApplicationType> {
    match text.trim() {
        ENROLLMENT_BUTTON => Some(ApplicationType::Enrollment),
        QUESTION_BUTTON => Some(ApplicationType::Question),
        OTHER_BUTTON => Some(ApplicationType::Other),
        other => ApplicationType::ALL
            .into_iter()
            .find(|kind| other.eq_ignore_ascii_case(kind.as_str())),
    }
}

pub fn parse_contact_type(text: &str) -> Option<ContactType> {
    match text.trim() {
        EMAIL_BUTTON => Some(ContactType::Email),
        PHONE_BUTTON => Some(ContactType::Phone),
        TELEGRAM_BUTTON => Some(ContactType::Telegram),
        other => [ContactType::Email, ContactType::Phone, ContactType::Telegram]
            .into_iter()
            .find(|kind| other.eq_ignore_ascii_case(kind.as_str())),
    }
}

fn reject(state: IntakeState, error: ValidationError) -> Step {
    let prompt = state.prompt();
    Step::Reject { state, error, prompt }
}

fn advance_to(next: IntakeState) -> Step {
    let prompt = next.prompt();
    Step::Advance { next, prompt }
}

/// Applies one user message to `state`. `today` bounds the appointment date.
pub fn advance(state: IntakeState, text: &str, today: NaiveDate) -> Step {
    if state.is_idle() {
        return match parse_application_type(text) {
            Some(application_type) => advance_to(IntakeState::CollectingName { application_type }),
            None => Step::Ignored,
        };
    }

    if is_cancel(text) {
        return Step::Cancelled;
    }

    match state {
        IntakeState::Idle => Step::Ignored,
        IntakeState::CollectingName { application_type } => match validate_free_text(text) {
            Ok(full_name) => advance_to(IntakeState::CollectingContactMethod {
                application_type,
                full_name,
            }),
            Err(e) => reject(IntakeState::CollectingName { application_type }, e),
        },
        IntakeState::CollectingContactMethod { application_type, full_name } => {
            match parse_contact_type(text) {
                Some(contact_type) => advance_to(IntakeState::CollectingContact {
                    application_type,
                    full_name,
                    contact_type,
                }),
                None => reject(
                    IntakeState::CollectingContactMethod { application_type, full_name },
                    ValidationError::UnknownContactMethod,
                ),
            }
        }
        IntakeState::CollectingContact { application_type, full_name, contact_type } => {
            match validate_contact(contact_type, text) {
                Ok(contact_data) => {
                    let applicant = Applicant {
                        application_type,
                        full_name,
                        contact_type,
                        contact_data,
                    };
                    if application_type == ApplicationType::Enrollment {
                        advance_to(IntakeState::CollectingDate { applicant })
                    } else {
                        advance_to(IntakeState::CollectingMessage {
                            applicant,
                            date: None,
                            time: None,
                        })
                    }
                }
                Err(e) => reject(
                    IntakeState::CollectingContact { application_type, full_name, contact_type },
                    e,
                ),
            }
        }
        IntakeState::CollectingDate { applicant } => {
            if text.trim() == SKIP_DATE_BUTTON {
                return advance_to(IntakeState::CollectingMessage {
                    applicant,
                    date: None,
                    time: None,
                });
            }
            match validate_appointment_date(text, today) {
                Ok(date) => advance_to(IntakeState::CollectingTime { applicant, date }),
                Err(e) => reject(IntakeState::CollectingDate { applicant }, e),
            }
        }
        IntakeState::CollectingTime { applicant, date } => {
            if text.trim() == SKIP_TIME_BUTTON {
                return advance_to(IntakeState::CollectingMessage {
                    applicant,
                    date: Some(date),
                    time: None,
                });
            }
            match validate_time(text) {
                Ok(time) => advance_to(IntakeState::CollectingMessage {
                    applicant,
                    date: Some(date),
                    time: Some(time),
                }),
                Err(e) => reject(IntakeState::CollectingTime { applicant, date }, e),
            }
        }
        IntakeState::CollectingMessage { applicant, date, time } => match validate_free_text(text) {
            Ok(message_text) => Step::Complete(CompletedIntake {
                applicant,
                appointment_date: date,
                appointment_time: time,
                message_text,
            }),
            Err(e) => reject(IntakeState::CollectingMessage { applicant, date, time }, e),
        },
    }
}

/// A stored application and, when it has an appointment, its reminder.
#[derive(Debug, Clone)]
pub struct Submission {
    pub application: Application,
    pub reminder: Option<Reminder>,
}

/// Stores the application, then its day-before reminder.
///
/// Only the application insert can fail the submission. A reminder that
/// cannot be stored is logged and leaves `reminder` empty.
pub async fn submit(
    db: &DatabaseManager,
    new: &NewApplication,
) -> Result<Submission, sqlx::Error> {
    let application = Application::create(&db.pool, new).await?;

    let reminder_date = application
        .appointment_date
        .and_then(Reminder::date_for_appointment);

    let reminder = match reminder_date {
        Some(date) => match Reminder::create(&db.pool, application.id, date).await {
            Ok(reminder) => Some(reminder),
            Err(e) => {
                log_database_error(
                    "INSERT",
                    "reminders",
                    &e.to_string(),
                    Some(&format!("application #{}", application.id)),
                );
                warn!("Application #{} stored without a reminder", application.id);
                None
            }
        },
        None => None,
    };

    Ok(Submission { application, reminder })
}
