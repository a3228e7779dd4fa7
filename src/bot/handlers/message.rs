use teloxide::prelude::*;

use super::{admin, BotContext, HandlerResult, IntakeDialogue};
use crate::bot::admin::is_admin;
use crate::bot::commands::Command;
use crate::bot::formatting::{help_text, welcome_text};
use crate::bot::keyboards::main_menu;
use crate::utils::feedback::{CommandFeedback, FeedbackType};
use crate::utils::logging::{log_access_denied, log_admin_action, log_command};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: IntakeDialogue,
    ctx: BotContext,
) -> HandlerResult {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
    let username = msg.from().and_then(|u| u.username.as_deref()).unwrap_or("unknown");
    log_command(cmd.name(), username, user_id, msg.chat.id.0);

    if cmd.is_admin_only() {
        if !is_admin(user_id, ctx.admin_id) {
            log_access_denied(cmd.name(), user_id);
            CommandFeedback::new(bot, msg.chat.id).access_denied().await?;
            return Ok(());
        }
        log_admin_action(cmd.name(), user_id, None);
    }

    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, help_text(is_admin(user_id, ctx.admin_id))).await?;
        }
        Command::Start => {
            dialogue.reset().await?;
            bot.send_message(msg.chat.id, welcome_text())
                .reply_markup(main_menu())
                .await?;
        }
        Command::Cancel => {
            dialogue.reset().await?;
            CommandFeedback::new(bot, msg.chat.id)
                .send_with_markup(FeedbackType::Info, "Cancelled", main_menu())
                .await?;
        }
        Command::Stats => {
            admin::send_stats(&bot, msg.chat.id, &ctx).await?;
        }
        Command::Admin => {
            admin::send_admin_menu(&bot, msg.chat.id).await?;
        }
        Command::Applications | Command::ViewNew => {
            admin::send_new_applications(&bot, msg.chat.id, &ctx).await?;
        }
        Command::ViewAll => {
            admin::send_all_applications(&bot, msg.chat.id, &ctx).await?;
        }
        Command::Search { query } => {
            admin::send_search_results(&bot, msg.chat.id, &ctx, &query).await?;
        }
        Command::StatsFull => {
            admin::send_full_stats(&bot, msg.chat.id, &ctx).await?;
        }
        Command::CheckReminders => {
            admin::run_reminder_check(&bot, msg.chat.id, &ctx).await?;
        }
    }
    Ok(())
}
