use teloxide::prelude::*;

use super::{admin, BotContext, HandlerResult, IntakeDialogue};
use crate::bot::formatting::{admin_notification_text, confirmation_text, prompt_text};
use crate::bot::intake::{advance, submit, CompletedIntake, Prompt, Step};
use crate::bot::keyboards::{keyboard_for, main_menu, STATS_BUTTON};
use crate::services::notifier::Notifier;
use crate::utils::datetime::today;
use crate::utils::feedback::{CommandFeedback, FeedbackType};
use crate::utils::logging::{
    log_database_error, log_delivery_error, log_intake_complete, log_intake_step,
    log_validation_error,
};

/// Routes a plain text message through the intake state machine.
pub async fn intake_handler(
    bot: Bot,
    msg: Message,
    dialogue: IntakeDialogue,
    ctx: BotContext,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let state = dialogue.get_or_default().await?;

    let Some(text) = msg.text() else {
        if !state.is_idle() {
            CommandFeedback::new(bot, chat_id)
                .send_with_markup(
                    FeedbackType::Warning,
                    &format!("Please answer with text.\n\n{}", prompt_text(state.prompt())),
                    keyboard_for(state.prompt(), today()),
                )
                .await?;
        }
        return Ok(());
    };

    if state.is_idle() && text.trim() == STATS_BUTTON {
        return admin::send_stats(&bot, chat_id, &ctx).await;
    }

    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
    let from_state = state.name();
    let today = today();

    match advance(state, text, today) {
        Step::Advance { next, prompt } => {
            log_intake_step(chat_id.0, from_state, next.name());
            dialogue.update(next).await?;
            bot.send_message(chat_id, prompt_text(prompt))
                .reply_markup(keyboard_for(prompt, today))
                .await?;
        }
        Step::Reject { error, prompt, .. } => {
            log_validation_error(from_state, text, &error.to_string(), user_id, chat_id.0);
            CommandFeedback::new(bot, chat_id)
                .send_with_markup(
                    FeedbackType::Error,
                    &format!("{}\n\n{}", error, prompt_text(prompt)),
                    keyboard_for(prompt, today),
                )
                .await?;
        }
        Step::Cancelled => {
            log_intake_step(chat_id.0, from_state, "idle");
            dialogue.reset().await?;
            CommandFeedback::new(bot, chat_id)
                .send_with_markup(FeedbackType::Info, "Cancelled", main_menu())
                .await?;
        }
        Step::Complete(completed) => {
            dialogue.reset().await?;
            complete_intake(&bot, &msg, completed, &ctx).await?;
        }
        Step::Ignored => {
            bot.send_message(chat_id, prompt_text(Prompt::ChooseType))
                .reply_markup(main_menu())
                .await?;
        }
    }

    Ok(())
}

async fn complete_intake(
    bot: &Bot,
    msg: &Message,
    completed: CompletedIntake,
    ctx: &BotContext,
) -> HandlerResult {
    let (requester_id, requester_handle) = msg
        .from()
        .map(|u| (u.id.0 as i64, u.username.clone()))
        .unwrap_or((msg.chat.id.0, None));

    let new = completed.into_new_application(requester_id, requester_handle);

    let submission = match submit(&ctx.db, &new).await {
        Ok(submission) => submission,
        Err(e) => {
            log_database_error("INSERT", "applications", &e.to_string(), Some(&format!("user {requester_id}")));
            CommandFeedback::new(bot.clone(), msg.chat.id)
                .send_with_markup(
                    FeedbackType::Error,
                    "Sorry, we could not save your application. Please try again later.",
                    main_menu(),
                )
                .await?;
            return Ok(());
        }
    };

    let application = &submission.application;
    log_intake_complete(
        application.id,
        requester_id,
        submission
            .reminder
            .as_ref()
            .map(|r| format!("reminder on {}", r.reminder_date))
            .as_deref(),
    );

    bot.send_message(msg.chat.id, confirmation_text(application))
        .reply_markup(main_menu())
        .await?;

    if let Err(e) = bot.notify(ctx.admin_id, &admin_notification_text(application)).await {
        log_delivery_error("new application", ctx.admin_id, &e.to_string());
    }

    Ok(())
}
