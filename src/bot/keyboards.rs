use chrono::NaiveDate;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::bot::admin::AdminAction;
use crate::bot::intake::{
    Prompt, CANCEL_BUTTON, EMAIL_BUTTON, ENROLLMENT_BUTTON, OTHER_BUTTON, PHONE_BUTTON,
    QUESTION_BUTTON, SKIP_DATE_BUTTON, SKIP_TIME_BUTTON, TELEGRAM_BUTTON,
};
use crate::utils::datetime::{format_date, format_time, time_slots, upcoming_dates};

pub const STATS_BUTTON: &str = "📊 Statistics";

/// How many days ahead the date keyboard offers.
const DATE_CHOICES: u32 = 7;

fn reply_keyboard(rows: Vec<Vec<&str>>) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard(true)
}

fn chunked(labels: Vec<String>, per_row: usize, tail: &[&str]) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = labels
        .chunks(per_row)
        .map(|chunk| chunk.iter().map(|label| KeyboardButton::new(label.as_str())).collect())
        .collect();

    for label in tail {
        rows.push(vec![KeyboardButton::new(*label)]);
    }

    KeyboardMarkup::new(rows).resize_keyboard(true)
}

pub fn main_menu() -> KeyboardMarkup {
    reply_keyboard(vec![
        vec![ENROLLMENT_BUTTON],
        vec![QUESTION_BUTTON],
        vec![OTHER_BUTTON],
        vec![STATS_BUTTON],
    ])
}

pub fn cancel_keyboard() -> KeyboardMarkup {
    reply_keyboard(vec![vec![CANCEL_BUTTON]])
}

pub fn contact_method_keyboard() -> KeyboardMarkup {
    reply_keyboard(vec![
        vec![EMAIL_BUTTON, PHONE_BUTTON, TELEGRAM_BUTTON],
        vec![CANCEL_BUTTON],
    ])
}

pub fn date_keyboard(today: NaiveDate) -> KeyboardMarkup {
    let dates = upcoming_dates(today, DATE_CHOICES)
        .iter()
        .map(format_date)
        .collect();

    chunked(dates, 2, &[SKIP_DATE_BUTTON, CANCEL_BUTTON])
}

pub fn time_keyboard() -> KeyboardMarkup {
    let times = time_slots().iter().map(format_time).collect();

    chunked(times, 3, &[SKIP_TIME_BUTTON, CANCEL_BUTTON])
}

/// Reply keyboard matching the question being asked.
pub fn keyboard_for(prompt: Prompt, today: NaiveDate) -> KeyboardMarkup {
    match prompt {
        Prompt::ChooseType => main_menu(),
        Prompt::AskContactMethod => contact_method_keyboard(),
        Prompt::AskDate => date_keyboard(today),
        Prompt::AskTime => time_keyboard(),
        Prompt::AskName | Prompt::AskContact(_) | Prompt::AskMessage(_) => cancel_keyboard(),
    }
}

pub fn admin_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📋 New applications", AdminAction::ShowNew.callback_data())],
        vec![InlineKeyboardButton::callback("📊 All applications", AdminAction::ShowAll.callback_data())],
        vec![InlineKeyboardButton::callback("📈 Statistics", AdminAction::ShowStats.callback_data())],
        vec![InlineKeyboardButton::callback("⏰ Due reminders", AdminAction::ShowReminders.callback_data())],
    ])
}

/// Buttons under a single application in admin listings.
pub fn application_actions(application_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Processed", AdminAction::Process(application_id).callback_data()),
        InlineKeyboardButton::callback("🔍 Details", AdminAction::View(application_id).callback_data()),
        InlineKeyboardButton::callback("🗑 Delete", AdminAction::Delete(application_id).callback_data()),
    ]])
}
