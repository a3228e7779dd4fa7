pub mod admin;
pub mod callback;
pub mod intake;
pub mod message;

use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        UpdateHandler,
    },
    prelude::*,
};
use crate::bot::commands::Command;
use crate::bot::intake::IntakeState;
use crate::database::connection::DatabaseManager;

/// Per-chat intake conversation, backed by in-memory storage.
pub type IntakeDialogue = Dialogue<IntakeState, InMemStorage<IntakeState>>;
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Dependencies shared by every handler.
#[derive(Clone)]
pub struct BotContext {
    pub db: DatabaseManager,
    pub admin_id: i64,
}

pub struct BotHandler {
    pub context: BotContext,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, admin_id: i64) -> Self {
        Self {
            context: BotContext { db, admin_id },
        }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        use teloxide::dispatching::{HandlerExt, UpdateFilterExt};

        let ctx_command = self.context.clone();
        let ctx_intake = self.context.clone();
        let ctx_callback = self.context.clone();

        dialogue::enter::<Update, InMemStorage<IntakeState>, IntakeState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command, dialogue: IntakeDialogue| {
                        let ctx = ctx_command.clone();
                        async move { message::command_handler(bot, msg, cmd, dialogue, ctx).await }
                    }),
            )
            .branch(
                Update::filter_message().endpoint(move |bot: Bot, msg: Message, dialogue: IntakeDialogue| {
                    let ctx = ctx_intake.clone();
                    async move { intake::intake_handler(bot, msg, dialogue, ctx).await }
                }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                let ctx = ctx_callback.clone();
                async move { callback::callback_handler(bot, q, ctx).await }
            }))
    }
}
