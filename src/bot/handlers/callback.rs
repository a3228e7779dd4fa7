use teloxide::prelude::*;

use super::{admin, BotContext, HandlerResult};
use crate::bot::admin::{is_admin, AdminAction};
use crate::database::models::{Application, ApplicationStatus};
use crate::utils::logging::{log_access_denied, log_admin_action, log_database_error};

pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: BotContext) -> HandlerResult {
    let user_id = q.from.id.0 as i64;

    let Some(action) = q.data.as_deref().and_then(AdminAction::parse) else {
        tracing::warn!("Unknown callback payload {:?} from user {}", q.data, user_id);
        bot.answer_callback_query(q.id).text("Unknown action").await?;
        return Ok(());
    };

    if !is_admin(user_id, ctx.admin_id) {
        log_access_denied(action.name(), user_id);
        bot.answer_callback_query(q.id)
            .text("❌ Access denied")
            .show_alert(true)
            .await?;
        return Ok(());
    }

    // Telegram omits the message once it is too old
    let Some(message) = q.message.clone() else {
        bot.answer_callback_query(q.id).text("Message is no longer available").await?;
        return Ok(());
    };
    let chat_id = message.chat.id;

    log_admin_action(action.name(), user_id, action_target(action).as_deref());

    match action {
        AdminAction::ShowNew => {
            bot.answer_callback_query(q.id).await?;
            admin::send_new_applications(&bot, chat_id, &ctx).await?;
        }
        AdminAction::ShowAll => {
            bot.answer_callback_query(q.id).await?;
            admin::send_all_applications(&bot, chat_id, &ctx).await?;
        }
        AdminAction::ShowStats => {
            bot.answer_callback_query(q.id).await?;
            admin::send_full_stats(&bot, chat_id, &ctx).await?;
        }
        AdminAction::ShowReminders => {
            bot.answer_callback_query(q.id).await?;
            admin::send_due_reminders(&bot, chat_id, &ctx).await?;
        }
        AdminAction::View(id) => {
            bot.answer_callback_query(q.id).await?;
            admin::send_application_details(&bot, chat_id, &ctx, id).await?;
        }
        AdminAction::Process(id) => {
            match Application::update_status(&ctx.db.pool, id, ApplicationStatus::Processed).await {
                Ok(true) => {
                    bot.answer_callback_query(q.id).text("✅ Marked as processed").await?;
                    let text = format!("{}\n\n✅ Processed", message.text().unwrap_or_default());
                    bot.edit_message_text(chat_id, message.id, text).await?;
                }
                Ok(false) => {
                    let reply = match Application::find_by_id(&ctx.db.pool, id).await {
                        Ok(Some(_)) => "Already processed".to_string(),
                        Ok(None) => format!("Application #{id} not found"),
                        Err(e) => {
                            log_database_error("SELECT", "applications", &e.to_string(), Some(&format!("id {id}")));
                            "Failed to update the application".to_string()
                        }
                    };
                    bot.answer_callback_query(q.id).text(reply).await?;
                }
                Err(e) => {
                    log_database_error("UPDATE", "applications", &e.to_string(), Some(&format!("id {id}")));
                    bot.answer_callback_query(q.id).text("Failed to update the application").await?;
                }
            }
        }
        AdminAction::Delete(id) => match Application::delete(&ctx.db.pool, id).await {
            Ok(true) => {
                bot.answer_callback_query(q.id).text("🗑 Deleted").await?;
                bot.edit_message_text(chat_id, message.id, format!("🗑 Application #{id} deleted"))
                    .await?;
            }
            Ok(false) => {
                bot.answer_callback_query(q.id)
                    .text(format!("Application #{id} not found"))
                    .await?;
            }
            Err(e) => {
                log_database_error("DELETE", "applications", &e.to_string(), Some(&format!("id {id}")));
                bot.answer_callback_query(q.id).text("Failed to delete the application").await?;
            }
        },
    }

    Ok(())
}

fn action_target(action: AdminAction) -> Option<String> {
    match action {
        AdminAction::Process(id) | AdminAction::View(id) | AdminAction::Delete(id) => {
            Some(format!("application #{id}"))
        }
        _ => None,
    }
}
