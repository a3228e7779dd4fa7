use teloxide::prelude::*;

use super::{BotContext, HandlerResult};
use crate::bot::admin::{parse_search, search};
use crate::bot::formatting::{
    application_card, application_details, application_summary, due_reminders_text,
    full_stats_text, stats_text,
};
use crate::bot::keyboards::{admin_menu, application_actions};
use crate::database::models::{Application, ApplicationStatus, Reminder};
use crate::services::reminder::check_and_send_reminders;
use crate::utils::datetime::today;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_database_error;

/// New applications shown one card each, with action buttons.
const NEW_LISTING_LIMIT: usize = 10;
/// Lines in the all-applications overview and search results.
const SUMMARY_LISTING_LIMIT: usize = 20;

pub async fn send_admin_menu(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, "👨‍💼 Admin panel:")
        .reply_markup(admin_menu())
        .await?;
    Ok(())
}

pub async fn send_new_applications(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    let applications = match Application::list(&ctx.db.pool, Some(ApplicationStatus::New)).await {
        Ok(applications) => applications,
        Err(e) => {
            log_database_error("SELECT", "applications", &e.to_string(), Some("status = new"));
            feedback.error("Failed to load applications").await?;
            return Ok(());
        }
    };

    if applications.is_empty() {
        feedback.info("📭 No new applications").await?;
        return Ok(());
    }

    if applications.len() > NEW_LISTING_LIMIT {
        feedback
            .info(&format!(
                "Showing {} of {} new applications",
                NEW_LISTING_LIMIT,
                applications.len()
            ))
            .await?;
    }

    for application in applications.iter().take(NEW_LISTING_LIMIT) {
        bot.send_message(chat_id, application_card(application))
            .reply_markup(application_actions(application.id))
            .await?;
    }

    Ok(())
}

pub async fn send_all_applications(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    let applications = match Application::list(&ctx.db.pool, None).await {
        Ok(applications) => applications,
        Err(e) => {
            log_database_error("SELECT", "applications", &e.to_string(), None);
            feedback.error("Failed to load applications").await?;
            return Ok(());
        }
    };

    if applications.is_empty() {
        feedback.info("📭 No applications yet").await?;
        return Ok(());
    }

    let new_count = applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::New)
        .count();

    let mut text = format!(
        "📋 All applications: {}\n🆕 New: {}\n\n",
        applications.len(),
        new_count
    );
    for application in applications.iter().take(SUMMARY_LISTING_LIMIT) {
        text.push_str(&application_summary(application));
        text.push('\n');
    }

    bot.send_message(chat_id, text).await?;
    Ok(())
}

pub async fn send_stats(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    match Application::stats(&ctx.db.pool).await {
        Ok(stats) => {
            bot.send_message(chat_id, stats_text(&stats)).await?;
        }
        Err(e) => {
            log_database_error("SELECT", "applications", &e.to_string(), Some("stats"));
            CommandFeedback::new(bot.clone(), chat_id)
                .error("Failed to load statistics")
                .await?;
        }
    }
    Ok(())
}

pub async fn send_full_stats(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    let loaded = match Application::stats(&ctx.db.pool).await {
        Ok(stats) => Application::count_by_type(&ctx.db.pool)
            .await
            .map(|by_type| (stats, by_type)),
        Err(e) => Err(e),
    };

    match loaded {
        Ok((stats, by_type)) => {
            bot.send_message(chat_id, full_stats_text(&stats, &by_type)).await?;
        }
        Err(e) => {
            log_database_error("SELECT", "applications", &e.to_string(), Some("full stats"));
            CommandFeedback::new(bot.clone(), chat_id)
                .error("Failed to load statistics")
                .await?;
        }
    }
    Ok(())
}

pub async fn send_due_reminders(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    match Reminder::find_due(&ctx.db.pool, today()).await {
        Ok(due) if due.is_empty() => {
            feedback.success("No reminders due").await?;
        }
        Ok(due) => {
            bot.send_message(chat_id, due_reminders_text(&due)).await?;
        }
        Err(e) => {
            log_database_error("SELECT", "reminders", &e.to_string(), Some("due"));
            feedback.error("Failed to load reminders").await?;
        }
    }
    Ok(())
}

pub async fn send_application_details(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &BotContext,
    application_id: i64,
) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    match Application::find_by_id(&ctx.db.pool, application_id).await {
        Ok(Some(application)) => {
            bot.send_message(chat_id, application_details(&application))
                .reply_markup(application_actions(application.id))
                .await?;
        }
        Ok(None) => {
            feedback.warning(&format!("Application #{application_id} not found")).await?;
        }
        Err(e) => {
            log_database_error("SELECT", "applications", &e.to_string(), Some(&format!("id {application_id}")));
            feedback.error("Failed to load the application").await?;
        }
    }
    Ok(())
}

pub async fn send_search_results(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &BotContext,
    args: &str,
) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    let query = match parse_search(args) {
        Ok(query) => query,
        Err(e) => {
            feedback.error(&e.to_string()).await?;
            return Ok(());
        }
    };

    let found = match search(&ctx.db, &query).await {
        Ok(found) => found,
        Err(e) => {
            log_database_error("SELECT", "applications", &e.to_string(), Some("search"));
            feedback.error("Search failed").await?;
            return Ok(());
        }
    };

    match found.as_slice() {
        [] => {
            feedback.info(&format!("Nothing found for: {}", args.trim())).await?;
        }
        [application] => {
            bot.send_message(chat_id, application_details(application))
                .reply_markup(application_actions(application.id))
                .await?;
        }
        many => {
            let mut text = format!("🔍 Found: {}\n\n", many.len());
            for application in many.iter().take(SUMMARY_LISTING_LIMIT) {
                text.push_str(&application_summary(application));
                text.push('\n');
            }
            bot.send_message(chat_id, text).await?;
        }
    }
    Ok(())
}

/// Runs a reminder pass immediately and reports the counts.
pub async fn run_reminder_check(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    match check_and_send_reminders(bot, &ctx.db, today(), ctx.admin_id).await {
        Ok(report) if report.due == 0 => {
            feedback.success("No reminders due").await?;
        }
        Ok(report) => {
            feedback
                .info(&format!(
                    "Reminders due: {}\nSent: {}\nFailed: {}",
                    report.due, report.sent, report.failed
                ))
                .await?;
        }
        Err(e) => {
            log_database_error("SELECT", "reminders", &e.to_string(), Some("manual check"));
            feedback.error("Reminder check failed").await?;
        }
    }
    Ok(())
}
