#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{NaiveDate, NaiveTime};
use class_intake_bot::bot::intake::*;
use class_intake_bot::database::{connection::DatabaseManager, models::*};
use class_intake_bot::utils::validation::ValidationError;
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> (DatabaseManager, TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.to_string_lossy());

    let db = DatabaseManager::new(&db_url).await.unwrap();
    db.run_migrations().await.unwrap();
    (db, dir)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Feeds every message that must advance, then returns the step for `last`.
fn run(inputs: &[&str], last: &str) -> (IntakeState, Step) {
    let mut state = IntakeState::Idle;
    for input in inputs {
        state = match advance(state, input, today()) {
            Step::Advance { next, .. } => next,
            other => panic!("input {input:?} did not advance: {other:?}"),
        };
    }
    let step = advance(state.clone(), last, today());
    (state, step)
}

const ENROLLMENT_TO_MESSAGE: [&str; 6] = [
    ENROLLMENT_BUTTON,
    "Ivan Petrov",
    TELEGRAM_BUTTON,
    "ivanpetrov1",
    "31.12.2099",
    "14:00",
];

#[test]
fn test_enrollment_flow_visits_every_state() {
    let mut state = IntakeState::Idle;
    let expected = [
        "collecting_name",
        "collecting_contact_method",
        "collecting_contact",
        "collecting_date",
        "collecting_time",
        "collecting_message",
    ];

    for (input, expected_name) in ENROLLMENT_TO_MESSAGE.iter().zip(expected) {
        match advance(state, input, today()) {
            Step::Advance { next, prompt } => {
                assert_eq!(next.name(), expected_name);
                assert_eq!(next.prompt(), prompt);
                state = next;
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    match advance(state, "test", today()) {
        Step::Complete(done) => {
            assert_eq!(done.applicant.full_name, "Ivan Petrov");
            assert_eq!(done.applicant.contact_type, ContactType::Telegram);
            assert_eq!(done.applicant.contact_data, "ivanpetrov1");
            assert_eq!(done.appointment_date, NaiveDate::from_ymd_opt(2099, 12, 31));
            assert_eq!(done.appointment_time, NaiveTime::from_hms_opt(14, 0, 0));
            assert_eq!(done.message_text, "test");
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_invalid_handle_keeps_state() {
    let (state, step) = run(&[ENROLLMENT_BUTTON, "Ivan Petrov", TELEGRAM_BUTTON], "ab");

    match step {
        Step::Reject { state: kept, error, prompt } => {
            assert_eq!(kept, state);
            assert_eq!(kept.name(), "collecting_contact");
            assert_eq!(error, ValidationError::InvalidHandle);
            assert_eq!(prompt, Prompt::AskContact(ContactType::Telegram));
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_past_date_is_rejected() {
    let (_, step) = run(&ENROLLMENT_TO_MESSAGE[..4], "01.01.2020");

    match step {
        Step::Reject { error, prompt, .. } => {
            assert_eq!(error, ValidationError::PastDate);
            assert_eq!(prompt, Prompt::AskDate);
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_unknown_contact_method_is_rejected() {
    let (_, step) = run(&[QUESTION_BUTTON, "Anna"], "carrier pigeon");
    assert!(matches!(
        step,
        Step::Reject { error: ValidationError::UnknownContactMethod, .. }
    ));
}

#[test]
fn test_cancel_from_every_collecting_state() {
    for depth in 1..=ENROLLMENT_TO_MESSAGE.len() {
        for cancel in [CANCEL_BUTTON, "/cancel"] {
            let (state, step) = run(&ENROLLMENT_TO_MESSAGE[..depth], cancel);
            assert!(!state.is_idle());
            assert_eq!(step, Step::Cancelled, "cancel {cancel:?} from {}", state.name());
        }
    }
}

#[test]
fn test_cancel_word_is_ordinary_input() {
    let (_, step) = run(&[QUESTION_BUTTON, "Anna", TELEGRAM_BUTTON], "Cancel");
    let next = match step {
        Step::Advance { next, .. } => next,
        other => panic!("unexpected step {other:?}"),
    };
    assert_eq!(next.name(), "collecting_message");

    match advance(next, "cancel", today()) {
        Step::Complete(done) => {
            assert_eq!(done.applicant.contact_data, "Cancel");
            assert_eq!(done.message_text, "cancel");
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_non_enrollment_skips_date_and_time() {
    let inputs = [QUESTION_BUTTON, "Anna Smirnova", EMAIL_BUTTON];
    let (state, step) = run(&inputs, "anna@example.com");
    assert_eq!(state.name(), "collecting_contact");

    let next = match step {
        Step::Advance { next, prompt } => {
            assert_eq!(prompt, Prompt::AskMessage(ApplicationType::Question));
            next
        }
        other => panic!("unexpected step {other:?}"),
    };
    assert_eq!(next.name(), "collecting_message");

    match advance(next, "When does the course start?", today()) {
        Step::Complete(done) => {
            assert_eq!(done.appointment_date, None);
            assert_eq!(done.appointment_time, None);
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_enrollment_without_date() {
    let (_, step) = run(&ENROLLMENT_TO_MESSAGE[..4], SKIP_DATE_BUTTON);
    match step {
        Step::Advance { next, .. } => {
            assert_eq!(next.name(), "collecting_message");
            let done = match advance(next, "Any evening works", today()) {
                Step::Complete(done) => done,
                other => panic!("unexpected step {other:?}"),
            };
            assert_eq!(done.appointment_date, None);
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_enrollment_with_date_but_no_time() {
    let (_, step) = run(&ENROLLMENT_TO_MESSAGE[..5], SKIP_TIME_BUTTON);
    match step {
        Step::Advance { next, .. } => match next {
            IntakeState::CollectingMessage { date, time, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2099, 12, 31));
                assert_eq!(time, None);
            }
            other => panic!("unexpected state {other:?}"),
        },
        other => panic!("unexpected step {other:?}"),
    }
}

#[tokio::test]
async fn test_completed_enrollment_is_stored_with_reminder() {
    let (db, _temp_dir) = setup_test_db().await;

    let (_, step) = run(&ENROLLMENT_TO_MESSAGE, "test");
    let completed = match step {
        Step::Complete(done) => done,
        other => panic!("unexpected step {other:?}"),
    };

    let new = completed.into_new_application(555, Some("ivan".to_string()));
    let submission = submit(&db, &new).await.unwrap();

    let app = &submission.application;
    assert_eq!(app.requester_id, 555);
    assert_eq!(app.requester_handle.as_deref(), Some("ivan"));
    assert_eq!(app.application_type, ApplicationType::Enrollment);
    assert_eq!(app.status, ApplicationStatus::New);
    assert_eq!(app.message_text, "test");

    let reminder = submission.reminder.unwrap();
    assert_eq!(reminder.reminder_date, NaiveDate::from_ymd_opt(2099, 12, 30).unwrap());
    assert!(!reminder.sent);

    let stored = Application::list(&db.pool, None).await.unwrap();
    assert_eq!(stored.len(), 1);
    let reminders = Reminder::find_by_application(&db.pool, app.id).await.unwrap();
    assert_eq!(reminders.len(), 1);
}

#[tokio::test]
async fn test_question_is_stored_without_reminder() {
    let (db, _temp_dir) = setup_test_db().await;

    let (_, step) = run(&[QUESTION_BUTTON, "Anna", PHONE_BUTTON, "+7 912 345 67 89"], "Price?");
    let completed = match step {
        Step::Complete(done) => done,
        other => panic!("unexpected step {other:?}"),
    };

    let submission = submit(&db, &completed.into_new_application(777, None)).await.unwrap();

    assert_eq!(submission.application.contact_data, "+79123456789");
    assert!(submission.reminder.is_none());
    assert!(Reminder::find_by_application(&db.pool, submission.application.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_reminder_failure_keeps_the_application() {
    let (db, _temp_dir) = setup_test_db().await;
    sqlx::query("DROP TABLE reminders").execute(&db.pool).await.unwrap();

    let (_, step) = run(&ENROLLMENT_TO_MESSAGE, "test");
    let completed = match step {
        Step::Complete(done) => done,
        other => panic!("unexpected step {other:?}"),
    };

    let submission = submit(&db, &completed.into_new_application(555, None)).await.unwrap();
    assert!(submission.reminder.is_none());
    assert_eq!(submission.application.application_type, ApplicationType::Enrollment);

    let stats = Application::stats(&db.pool).await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.new, 1);
}
