use crate::bot::intake::Prompt;
use crate::database::models::{
    Application, ApplicationStats, ApplicationStatus, ApplicationType, ContactType, DueReminder,
};
use crate::utils::datetime::{format_appointment, format_date};

/// Longest message excerpt shown in listings and notifications.
const EXCERPT_CHARS: usize = 50;

pub fn prompt_text(prompt: Prompt) -> String {
    match prompt {
        Prompt::ChooseType => "Choose the type of your request:".to_string(),
        Prompt::AskName => "👤 What is your full name?".to_string(),
        Prompt::AskContactMethod => "📞 How should we contact you?".to_string(),
        Prompt::AskContact(ContactType::Email) => "📧 Your email address:".to_string(),
        Prompt::AskContact(ContactType::Phone) => "📱 Your phone number (+7XXXXXXXXXX):".to_string(),
        Prompt::AskContact(ContactType::Telegram) => "✈️ Your Telegram username:".to_string(),
        Prompt::AskDate => "📅 Choose a date or type one (DD.MM.YYYY):".to_string(),
        Prompt::AskTime => "⏰ Choose a time or type one (HH:MM):".to_string(),
        Prompt::AskMessage(ApplicationType::Question) => "💬 Your question:".to_string(),
        Prompt::AskMessage(_) => "💬 Your message:".to_string(),
    }
}

pub fn welcome_text() -> String {
    "👋 Welcome!\n\nI can sign you up for a class, pass a question about a course to our team, \
     or take any other request.\n\nChoose the type of your request:"
        .to_string()
}

pub fn help_text(is_admin: bool) -> String {
    let mut text = String::from(
        "/start - Start over\n/help - This help\n/stats - Application statistics\n/cancel - Cancel the current request",
    );

    if is_admin {
        text.push_str(
            "\n\nAdmin:\n/admin - Admin panel\n/applications, /view_new - New applications\n/view_all - All applications\n\
             /search id <n> | name <text> - Find applications\n/stats_full - Statistics by type\n\
             /check_reminders - Send due reminders now",
        );
    }

    text
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }

    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{cut}...")
}

fn status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::New => "🆕 New",
        ApplicationStatus::Processed => "✅ Processed",
    }
}

fn appointment_line(application: &Application) -> Option<String> {
    application
        .appointment_date
        .as_ref()
        .map(|date| format!("📅 {}", format_appointment(date, application.appointment_time.as_ref())))
}

/// One line per application in admin listings.
pub fn application_summary(application: &Application) -> String {
    format!(
        "#{} | {} | {} | {}",
        application.id,
        application.full_name,
        application.application_type.label(),
        status_label(application.status)
    )
}

/// A listing entry with its message excerpt, shown above the action buttons.
pub fn application_card(application: &Application) -> String {
    let mut text = format!(
        "🆔 #{} {}\n👤 {}\n📱 {}\n",
        application.id,
        application.application_type.label(),
        application.full_name,
        application.contact_type.display_contact(&application.contact_data)
    );

    if let Some(line) = appointment_line(application) {
        text.push_str(&line);
        text.push('\n');
    }

    text.push_str(&format!("💬 {}", excerpt(&application.message_text)));
    text
}

pub fn application_details(application: &Application) -> String {
    let handle = application
        .requester_handle
        .as_deref()
        .map_or_else(|| "none".to_string(), |h| format!("@{h}"));

    format!(
        "🔍 Application #{}\n\n📋 Type: {}\n👤 Name: {}\n📱 Contact ({}): {}\n🙋 From: {} (id {})\n📅 Appointment: {}\n💬 Message: {}\n🕐 Created: {}\n📊 Status: {}",
        application.id,
        application.application_type.label(),
        application.full_name,
        application.contact_type,
        application.contact_type.display_contact(&application.contact_data),
        handle,
        application.requester_id,
        application
            .appointment_date
            .as_ref()
            .map_or_else(
                || "none".to_string(),
                |date| format_appointment(date, application.appointment_time.as_ref())
            ),
        application.message_text,
        application.created_at.format("%d.%m.%Y %H:%M UTC"),
        status_label(application.status)
    )
}

/// Sent to the requester once the application is stored.
pub fn confirmation_text(application: &Application) -> String {
    let mut text = format!(
        "✅ Application #{} received!\n👤 {}\n📱 {}\n",
        application.id,
        application.full_name,
        application.contact_type.display_contact(&application.contact_data)
    );

    if let Some(line) = appointment_line(application) {
        text.push_str(&line);
        text.push('\n');
    }

    text.push_str("\nWe will contact you soon!");
    text
}

/// Sent to the administrator for every new application.
pub fn admin_notification_text(application: &Application) -> String {
    format!("📝 NEW APPLICATION\n\n{}", application_card(application))
}

pub fn stats_text(stats: &ApplicationStats) -> String {
    format!(
        "📊 Applications: {}\n🆕 New: {}\n✅ Processed: {}",
        stats.total, stats.new, stats.processed
    )
}

pub fn full_stats_text(stats: &ApplicationStats, by_type: &[(ApplicationType, i64)]) -> String {
    let mut text = format!("📊 Full statistics\n\n{}\n\nBy type:\n", stats_text(stats));

    for (kind, count) in by_type {
        text.push_str(&format!("• {}: {}\n", kind.label(), count));
    }

    text
}

pub fn due_reminders_text(due: &[DueReminder]) -> String {
    let mut text = String::from("⏰ Due reminders:\n\n");

    for (i, reminder) in due.iter().enumerate() {
        text.push_str(&format!(
            "{}. #{} | {} | {} (remind on {})\n",
            i + 1,
            reminder.application_id,
            reminder.full_name,
            format_appointment(&reminder.appointment_date, reminder.appointment_time.as_ref()),
            format_date(&reminder.reminder_date)
        ));
    }

    text
}
