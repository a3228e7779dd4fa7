use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;

/// Outbound plain-text delivery to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: i64, text: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl Notifier for Bot {
    async fn notify(&self, recipient: i64, text: &str) -> anyhow::Result<()> {
        self.send_message(ChatId(recipient), text).await?;
        Ok(())
    }
}
